//! First-run bootstrap of the dotenv configuration file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::{env_example_path, env_file_path};
use crate::infrastructure::traits::FileSystem;

/// Makes sure `<script_dir>/.env` exists before settings are read.
pub struct DotenvService {
    fs: Arc<dyn FileSystem>,
}

impl DotenvService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Return the path of `.env`, copying `.env.example` over if it is missing.
    ///
    /// # Errors
    /// - [`ApplicationError::MissingExampleConfig`] if neither file exists; nothing is created.
    /// - [`ApplicationError::OperationFailed`] if the copy fails.
    pub fn ensure(&self, script_dir: &Path) -> ApplicationResult<PathBuf> {
        let env_file = env_file_path(script_dir);
        if self.fs.is_file(&env_file) {
            debug!("ensure: using {}", env_file.display());
            return Ok(env_file);
        }

        let example = env_example_path(script_dir);
        if !self.fs.is_file(&example) {
            return Err(ApplicationError::MissingExampleConfig(example));
        }

        let created = self
            .fs
            .copy_new(&example, &env_file)
            .with_path_context("copy example config", &example)?;
        if created {
            debug!("ensure: created {} from {}", env_file.display(), example.display());
        } else {
            debug!("ensure: {} appeared concurrently, keeping it", env_file.display());
        }
        Ok(env_file)
    }
}
