//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{Code2PromptService, DotenvService, TemplateService};
use crate::config::Settings;
use crate::infrastructure::traits::{
    CommandRunner, EnvSource, FileSystem, ProcessEnv, RealCommandRunner, RealFileSystem,
};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding the settings and the I/O implementations services run on.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Warnings raised while loading, reported once logging is set up
    pub warnings: Vec<String>,
}

impl ServiceContainer {
    /// Bootstrap `.env` in `script_dir`, load settings, use real implementations.
    pub fn load(script_dir: &Path) -> InfraResult<Self> {
        Self::load_with(
            script_dir,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
            &ProcessEnv,
        )
    }

    /// Bootstrap and load with custom dependencies (for testing).
    pub fn load_with(
        script_dir: &Path,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        env: &dyn EnvSource,
    ) -> InfraResult<Self> {
        let env_file = DotenvService::new(fs.clone()).ensure(script_dir)?;
        let loaded = Settings::load_with_warnings(script_dir, &env_file, env)?;
        debug!("load_with: {:?}", loaded.settings);
        let mut container = Self::with_deps(loaded.settings, fs, cmd);
        container.warnings = loaded.warnings;
        Ok(container)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            cmd,
            warnings: Vec::new(),
        }
    }

    pub fn template_service(&self) -> TemplateService {
        TemplateService::new(self.settings.clone())
    }

    pub fn code2prompt_service(&self) -> Code2PromptService {
        Code2PromptService::new(self.fs.clone(), self.cmd.clone(), self.settings.clone())
    }
}

/// Directory of the running executable, with symlinks resolved.
pub fn executable_dir() -> InfraResult<PathBuf> {
    let exe = std::env::current_exe()
        .and_then(std::fs::canonicalize)
        .map_err(|e| InfraError::io("locate executable", e))?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        InfraError::io(
            format!("locate executable directory of {}", exe.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "executable has no parent"),
        )
    })
}

/// `--script-dir` with `~` expanded, or the executable's directory.
pub fn resolve_script_dir(explicit: Option<&Path>) -> InfraResult<PathBuf> {
    match explicit {
        Some(dir) => Ok(match dir.to_str() {
            Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
            None => dir.to_path_buf(),
        }),
        None => executable_dir(),
    }
}
