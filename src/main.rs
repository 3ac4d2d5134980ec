use std::{io, process};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use promptwrap::cli::{execute_command, output, Cli, CliError, CliResult};
use promptwrap::infrastructure::di::service_container::{resolve_script_dir, ServiceContainer};
use promptwrap::infrastructure::logging::{self, LogSettings};

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    if let Err(e) = run(&cli) {
        exit_with(&e);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let script_dir = resolve_script_dir(cli.script_dir.as_deref())?;
    let container = ServiceContainer::load(&script_dir)?;
    logging::init(&LogSettings::from(container.settings.as_ref()))?;
    for warning in &container.warnings {
        report_warning(warning);
    }
    execute_command(cli, &container)
}

fn report_warning(msg: &str) {
    if tracing::dispatcher::has_been_set() {
        tracing::warn!("{}", msg);
    } else {
        output::warning(msg);
    }
}

fn exit_with(e: &CliError) -> ! {
    if let CliError::Usage(msg) = e {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, msg)
            .exit();
    }

    if tracing::dispatcher::has_been_set() {
        tracing::error!("{}", e);
    } else {
        output::error(e);
    }
    process::exit(e.exit_code());
}
