//! Argument resolution and command dispatch

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::domain::{Invocation, TemplateName};
use crate::infrastructure::di::ServiceContainer;

pub const USAGE_MESSAGE: &str = "Not enough parameters. Usage: promptwrap <template> <directory>";

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ListTemplates,
    Run(Invocation),
}

/// Decide the action from the parsed arguments.
///
/// `--list-templates` wins over positional arguments. A missing or empty
/// template or directory is a usage error.
pub fn resolve(cli: &Cli) -> CliResult<Action> {
    if cli.list_templates {
        return Ok(Action::ListTemplates);
    }

    let template = cli.template.as_deref().filter(|t| !t.is_empty());
    let directory = cli
        .directory
        .as_deref()
        .filter(|d| !d.as_os_str().is_empty());

    match (template, directory) {
        (Some(template), Some(directory)) => {
            let template = TemplateName::new(template).map_err(ApplicationError::from)?;
            let invocation =
                Invocation::with_exclusions(template, directory, cli.exclude_folders.as_str())
                    .map_err(ApplicationError::from)?;
            Ok(Action::Run(invocation))
        }
        _ => Err(CliError::Usage(USAGE_MESSAGE.to_string())),
    }
}

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match resolve(cli)? {
        Action::ListTemplates => _list_templates(container),
        Action::Run(invocation) => _run(container, &invocation),
    }
}

#[instrument(skip_all)]
fn _list_templates(container: &ServiceContainer) -> CliResult<()> {
    let names = container.template_service().list()?;
    for name in &names {
        output::info(name);
    }
    Ok(())
}

// No span here, the success line is logged without span context.
fn _run(container: &ServiceContainer, invocation: &Invocation) -> CliResult<()> {
    let resolved = container.code2prompt_service().run(invocation)?;
    debug!("done: {}", resolved.display());
    Ok(())
}
