//! Process exit codes
//!
//! Codes 1-3 are part of the command-line contract; the rest follow BSD sysexits.h.

/// Successful termination
pub const OK: i32 = 0;

/// Bundled `.env.example` not found
pub const MISSING_EXAMPLE_CONFIG: i32 = 1;

/// GROQ_MODEL or GROQ_API_KEY missing
pub const INCOMPLETE_CONFIG: i32 = 2;

/// Command line usage error (clap's own code)
pub const USAGE: i32 = 2;

/// code2prompt failed or could not be started
pub const TOOL_FAILED: i32 = 3;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;
