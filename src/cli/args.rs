//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::domain::DEFAULT_EXCLUDED_FOLDERS;

/// Wrapper around code2prompt tool
#[derive(Parser, Debug)]
#[command(name = "promptwrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Template name
    pub template: Option<String>,

    /// Target directory
    #[arg(value_hint = ValueHint::DirPath)]
    pub directory: Option<PathBuf>,

    /// List available templates
    #[arg(long)]
    pub list_templates: bool,

    /// Comma-separated folders code2prompt skips
    #[arg(long, value_name = "FOLDERS", default_value = DEFAULT_EXCLUDED_FOLDERS)]
    pub exclude_folders: String,

    /// Directory holding .env, .env.example and templates/ (default: executable's directory)
    #[arg(long, env = "PROMPTWRAP_HOME", value_hint = ValueHint::DirPath)]
    pub script_dir: Option<PathBuf>,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}
