//! Template discovery

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::TemplateName;

/// Lists the templates available in `<script_dir>/templates`.
pub struct TemplateService {
    settings: Arc<Settings>,
}

impl TemplateService {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Template names (file names minus `.hbs`), sorted.
    ///
    /// Only the top level of the directory is scanned; subdirectories are
    /// skipped even when their name ends in `.hbs`.
    pub fn list(&self) -> ApplicationResult<Vec<TemplateName>> {
        self.list_in(&self.settings.templates_dir())
    }

    /// Same as [`list`](Self::list) for an explicit directory.
    pub fn list_in(&self, dir: &Path) -> ApplicationResult<Vec<TemplateName>> {
        debug!("list_in: dir={}", dir.display());
        let mut names = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::OperationFailed {
                context: format!("read templates directory: {}", dir.display()),
                source: Box::new(e),
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            if let Some(name) = entry
                .file_name()
                .to_str()
                .and_then(TemplateName::from_file_name)
            {
                names.push(name);
            }
        }

        names.sort();
        debug!("list_in: found {} templates", names.len());
        Ok(names)
    }
}
