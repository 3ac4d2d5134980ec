//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner, etc.)
//! but are themselves concrete structs, not traits.

mod bootstrap;
mod code2prompt;
mod templates;

pub use bootstrap::DotenvService;
pub use code2prompt::Code2PromptService;
pub use templates::TemplateService;
