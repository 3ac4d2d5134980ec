//! code2prompt invocation service
//!
//! Spawns the external tool once per request and waits for it. The tool is
//! opaque: only its exit status is interpreted.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::Invocation;
use crate::infrastructure::traits::{CommandRunner, FileSystem};

pub struct Code2PromptService {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl Code2PromptService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        settings: Arc<Settings>,
    ) -> Self {
        Self { fs, cmd, settings }
    }

    /// Run code2prompt for `invocation`.
    ///
    /// Returns the resolved absolute path of the target directory. A non-zero
    /// exit is reported as [`ApplicationError::ToolFailed`]; there is no retry.
    pub fn run(&self, invocation: &Invocation) -> ApplicationResult<PathBuf> {
        let tool = self.settings.tool.as_str();
        let args = invocation.args(&self.settings.templates_dir());
        debug!("run: {} {:?}", tool, args);

        let status = self
            .cmd
            .status(tool, &args, &self.settings.child_env())
            .map_err(|source| ApplicationError::ToolSpawn {
                tool: tool.to_string(),
                source,
            })?;

        if !status.success() {
            let shown: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
            return Err(ApplicationError::ToolFailed {
                command: format!("{} {}", tool, shown.join(" ")),
                exit_code: status.code(),
            });
        }

        let resolved = self
            .fs
            .canonicalize(&invocation.directory)
            .unwrap_or_else(|_| invocation.directory.clone());
        info!(
            "Successfully ran code2prompt with template \"{}\" on {}",
            invocation.template,
            resolved.display()
        );
        Ok(resolved)
    }
}
