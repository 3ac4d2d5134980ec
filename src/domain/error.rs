//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid invocation input.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("template name must not be empty")]
    EmptyTemplateName,

    #[error("target directory must not be empty")]
    EmptyDirectory,

    #[error("exclusion list must not be empty")]
    EmptyExclusionList,
}
