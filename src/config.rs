//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Dotenv file: `<script_dir>/.env` (parsed, never exported to the process)
//! 2. Process environment
//!
//! Only the variables in [`KNOWN_KEYS`] are read.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::TEMPLATES_DIR;
use crate::infrastructure::traits::EnvSource;

/// Working configuration file inside the script directory.
pub const ENV_FILE: &str = ".env";

/// Bundled example copied to [`ENV_FILE`] on first run.
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

/// Executable invoked when `CODE2PROMPT_BIN` is not set.
pub const DEFAULT_TOOL: &str = "code2prompt";

pub const MODEL_VAR: &str = "GROQ_MODEL";
pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const DISPLAY_LOG_VAR: &str = "DISPLAY_LOG";
pub const TOOL_VAR: &str = "CODE2PROMPT_BIN";

pub const KNOWN_KEYS: [&str; 4] = [MODEL_VAR, API_KEY_VAR, DISPLAY_LOG_VAR, TOOL_VAR];

/// Raw settings as merged by the config crate (keys are lowercased).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub groq_model: Option<String>,
    pub groq_api_key: Option<String>,
    pub display_log: Option<String>,
    pub code2prompt_bin: Option<String>,
}

/// Effective configuration, immutable after load.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Model identifier (GROQ_MODEL)
    pub model: String,
    /// API key (GROQ_API_KEY), never printed
    pub api_key: String,
    /// Directory holding `.env`, `.env.example` and `templates/`
    pub script_dir: PathBuf,
    /// Whether DISPLAY_LOG enabled logging
    pub display_log: bool,
    /// code2prompt executable (name on PATH or path)
    pub tool: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("script_dir", &self.script_dir)
            .field("display_log", &self.display_log)
            .field("tool", &self.tool)
            .finish()
    }
}

/// Settings together with the warnings raised while reading the dotenv file.
///
/// Logging is not installed yet when settings are read, so warnings are
/// handed to the caller instead of being logged here.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

/// `<script_dir>/.env`
pub fn env_file_path(script_dir: &Path) -> PathBuf {
    script_dir.join(ENV_FILE)
}

/// `<script_dir>/.env.example`
pub fn env_example_path(script_dir: &Path) -> PathBuf {
    script_dir.join(ENV_EXAMPLE_FILE)
}

/// DISPLAY_LOG enables logging only for the exact values `True` and `1`.
pub fn display_log_enabled(value: &str) -> bool {
    matches!(value, "True" | "1")
}

impl Settings {
    /// Directory scanned for `*.hbs` templates.
    pub fn templates_dir(&self) -> PathBuf {
        self.script_dir.join(TEMPLATES_DIR)
    }

    /// Variables handed to the code2prompt child process.
    pub fn child_env(&self) -> Vec<(String, String)> {
        vec![
            (MODEL_VAR.to_string(), self.model.clone()),
            (API_KEY_VAR.to_string(), self.api_key.clone()),
        ]
    }

    /// Load settings from the dotenv file, overridden by `env`.
    ///
    /// Fails with [`ApplicationError::IncompleteConfig`] when GROQ_MODEL or
    /// GROQ_API_KEY is absent or empty in both layers.
    pub fn load(
        script_dir: &Path,
        env_file: &Path,
        env: &dyn EnvSource,
    ) -> ApplicationResult<Self> {
        Self::load_with_warnings(script_dir, env_file, env).map(|loaded| loaded.settings)
    }

    /// Like [`load`](Self::load), also returning one warning per invalid dotenv line.
    pub fn load_with_warnings(
        script_dir: &Path,
        env_file: &Path,
        env: &dyn EnvSource,
    ) -> ApplicationResult<LoadedSettings> {
        debug!("load: env_file={}", env_file.display());
        let (file_vars, warnings) = read_env_file(env_file)?;
        let process_vars: Map<String, String> = env
            .vars()
            .into_iter()
            .filter(|(k, _)| KNOWN_KEYS.contains(&k.as_str()))
            .collect();

        let config = Config::builder()
            .add_source(Environment::default().source(Some(file_vars)))
            .add_source(Environment::default().source(Some(process_vars)))
            .build()
            .map_err(config_err)?;
        let raw: RawSettings = config.try_deserialize().map_err(config_err)?;

        Ok(LoadedSettings {
            settings: Self::from_raw(script_dir, raw)?,
            warnings,
        })
    }

    /// Validate raw values and build the effective settings.
    pub fn from_raw(script_dir: &Path, raw: RawSettings) -> ApplicationResult<Self> {
        let model = non_empty(raw.groq_model);
        let api_key = non_empty(raw.groq_api_key);

        let (model, api_key) = match (model, api_key) {
            (Some(model), Some(api_key)) => (model, api_key),
            (model, api_key) => {
                let mut missing = Vec::new();
                if model.is_none() {
                    missing.push(MODEL_VAR.to_string());
                }
                if api_key.is_none() {
                    missing.push(API_KEY_VAR.to_string());
                }
                return Err(ApplicationError::IncompleteConfig { missing });
            }
        };

        let tool = non_empty(raw.code2prompt_bin)
            .map(|bin| shellexpand::tilde(&bin).into_owned())
            .unwrap_or_else(|| DEFAULT_TOOL.to_string());

        Ok(Self {
            model,
            api_key,
            script_dir: script_dir.to_path_buf(),
            display_log: raw.display_log.as_deref().is_some_and(display_log_enabled),
            tool,
        })
    }
}

/// Parse the dotenv file without touching the process environment.
///
/// Invalid lines are skipped and reported, unknown keys ignored.
fn read_env_file(path: &Path) -> ApplicationResult<(Map<String, String>, Vec<String>)> {
    let lines = dotenv::from_path_iter(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;

    let mut vars = Map::new();
    let mut warnings = Vec::new();
    for line in lines {
        match line {
            Ok((key, value)) if KNOWN_KEYS.contains(&key.as_str()) => {
                vars.insert(key, value);
            }
            Ok(_) => {}
            Err(e) => {
                warnings.push(format!("skipping invalid line in {}: {}", path.display(), e))
            }
        }
    }
    Ok((vars, warnings))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
