//! Domain entities: template names and code2prompt invocation requests

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::DomainError;

/// Folders excluded from the prompt unless the caller overrides them.
pub const DEFAULT_EXCLUDED_FOLDERS: &str = "node_modules,build,dist,venv";

/// Subdirectory of the script directory that holds the templates.
pub const TEMPLATES_DIR: &str = "templates";

/// File extension of code2prompt templates (without dot).
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Name of a Handlebars template, i.e. `<name>.hbs` without the extension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateName(String);

impl TemplateName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyTemplateName);
        }
        Ok(Self(name))
    }

    /// Derive the template name from a file name like `summary.hbs`.
    ///
    /// Returns `None` for other extensions and for a bare `.hbs`.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        file_name
            .strip_suffix(TEMPLATE_EXTENSION)
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
            .map(|stem| Self(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the template file inside `templates_dir`.
    pub fn file_in(&self, templates_dir: &Path) -> PathBuf {
        templates_dir.join(format!("{}.{}", self.0, TEMPLATE_EXTENSION))
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single code2prompt run: which template, which directory, which folders to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub template: TemplateName,
    pub directory: PathBuf,
    pub excluded_folders: String,
}

impl Invocation {
    /// Create an invocation with the default exclusion list.
    pub fn new(template: TemplateName, directory: impl Into<PathBuf>) -> Result<Self, DomainError> {
        Self::with_exclusions(template, directory, DEFAULT_EXCLUDED_FOLDERS)
    }

    pub fn with_exclusions(
        template: TemplateName,
        directory: impl Into<PathBuf>,
        excluded_folders: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let directory = directory.into();
        if directory.as_os_str().is_empty() {
            return Err(DomainError::EmptyDirectory);
        }
        let excluded_folders = excluded_folders.into();
        if excluded_folders.trim().is_empty() {
            return Err(DomainError::EmptyExclusionList);
        }
        Ok(Self {
            template,
            directory,
            excluded_folders,
        })
    }

    /// Argument vector handed to code2prompt, order preserved:
    /// `--exclude-folders=<list> -t <templates_dir>/<template>.hbs <directory>`
    ///
    /// Paths are kept as OS strings, non-UTF-8 names are not altered.
    pub fn args(&self, templates_dir: &Path) -> Vec<OsString> {
        let mut exclude = OsString::from("--exclude-folders=");
        exclude.push(&self.excluded_folders);
        vec![
            exclude,
            OsString::from("-t"),
            self.template.file_in(templates_dir).into_os_string(),
            self.directory.clone().into_os_string(),
        ]
    }
}
