//! Tests for Code2PromptService with a recording command runner

#![cfg(unix)]

use std::ffi::{OsStr, OsString};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use promptwrap::application::services::Code2PromptService;
use promptwrap::application::ApplicationError;
use promptwrap::config::Settings;
use promptwrap::domain::{Invocation, TemplateName};
use promptwrap::infrastructure::logging::{fmt_layer, LogSettings};
use promptwrap::infrastructure::traits::{CommandRunner, RealFileSystem};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Call {
    cmd: String,
    args: Vec<OsString>,
    envs: Vec<(String, String)>,
}

/// Records every invocation and answers with a fixed exit code.
struct RecordingRunner {
    calls: Mutex<Vec<Call>>,
    exit_code: i32,
    spawn_error: bool,
}

impl RecordingRunner {
    fn exiting_with(exit_code: i32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            exit_code,
            spawn_error: false,
        }
    }

    fn not_found() -> Self {
        Self {
            spawn_error: true,
            ..Self::exiting_with(0)
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn status(
        &self,
        cmd: &str,
        args: &[OsString],
        envs: &[(String, String)],
    ) -> io::Result<ExitStatus> {
        self.calls.lock().unwrap().push(Call {
            cmd: cmd.to_string(),
            args: args.to_vec(),
            envs: envs.to_vec(),
        });
        if self.spawn_error {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
        }
        Ok(ExitStatus::from_raw(self.exit_code << 8))
    }
}

/// In-memory log sink
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn test_settings(script_dir: &Path) -> Settings {
    Settings {
        model: "llama3".to_string(),
        api_key: "xyz".to_string(),
        script_dir: script_dir.to_path_buf(),
        display_log: true,
        tool: "code2prompt".to_string(),
    }
}

fn service(script_dir: &Path, runner: Arc<RecordingRunner>) -> Code2PromptService {
    Code2PromptService::new(
        Arc::new(RealFileSystem),
        runner,
        Arc::new(test_settings(script_dir)),
    )
}

fn invocation(directory: &Path) -> Invocation {
    Invocation::new(TemplateName::new("summary").unwrap(), directory).unwrap()
}

// ============================================================
// argument shape
// ============================================================

#[test]
fn given_successful_tool_when_run_then_invokes_once_with_fixed_args() {
    // Arrange
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::exiting_with(0));
    let service = service(home.path(), runner.clone());

    // Act
    let resolved = service.run(&invocation(project.path())).unwrap();

    // Assert
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].cmd, "code2prompt");
    assert_eq!(
        calls[0].args,
        vec![
            OsString::from("--exclude-folders=node_modules,build,dist,venv"),
            OsString::from("-t"),
            home.path()
                .join("templates")
                .join("summary.hbs")
                .into_os_string(),
            project.path().as_os_str().to_os_string(),
        ]
    );
    assert_eq!(resolved, project.path().canonicalize().unwrap());
}

#[test]
fn given_custom_exclusions_when_run_then_passed_through() {
    // Arrange
    let home = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::exiting_with(0));
    let service = service(home.path(), runner.clone());
    let invocation = Invocation::with_exclusions(
        TemplateName::new("summary").unwrap(),
        home.path(),
        "target,.git",
    )
    .unwrap();

    // Act
    service.run(&invocation).unwrap();

    // Assert
    assert_eq!(runner.calls()[0].args[0], "--exclude-folders=target,.git");
}

#[test]
fn given_non_utf8_directory_when_run_then_child_receives_raw_bytes() {
    // Arrange
    let home = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::exiting_with(0));
    let service = service(home.path(), runner.clone());
    let directory = home.path().join(OsStr::from_bytes(b"proj\xff"));

    // Act
    service.run(&invocation(&directory)).unwrap();

    // Assert
    let args = &runner.calls()[0].args;
    assert_eq!(args[3].as_bytes(), directory.as_os_str().as_bytes());
    assert!(args[3].as_bytes().ends_with(b"proj\xff"));
}

#[test]
fn given_settings_when_run_then_child_receives_model_and_key() {
    // Arrange
    let home = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::exiting_with(0));
    let service = service(home.path(), runner.clone());

    // Act
    service.run(&invocation(home.path())).unwrap();

    // Assert
    let envs = &runner.calls()[0].envs;
    assert!(envs.contains(&("GROQ_MODEL".to_string(), "llama3".to_string())));
    assert!(envs.contains(&("GROQ_API_KEY".to_string(), "xyz".to_string())));
}

// ============================================================
// failures
// ============================================================

#[test]
fn given_failing_tool_when_run_then_tool_failed_without_retry() {
    // Arrange
    let home = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::exiting_with(7));
    let service = service(home.path(), runner.clone());

    // Act
    let result = service.run(&invocation(home.path()));

    // Assert
    match result {
        Err(ApplicationError::ToolFailed { command, exit_code }) => {
            assert_eq!(exit_code, Some(7));
            assert!(command.starts_with("code2prompt --exclude-folders="));
        }
        other => panic!("expected ToolFailed, got {other:?}"),
    }
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn given_missing_executable_when_run_then_tool_spawn_error() {
    // Arrange
    let home = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::not_found());
    let service = service(home.path(), runner.clone());

    // Act
    let result = service.run(&invocation(home.path()));

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::ToolSpawn { ref tool, .. }) if tool == "code2prompt"
    ));
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn given_nonexistent_directory_when_tool_succeeds_then_path_reported_as_given() {
    // Arrange: the tool owns directory validation
    let home = TempDir::new().unwrap();
    let missing = home.path().join("does-not-exist");
    let runner = Arc::new(RecordingRunner::exiting_with(0));
    let service = service(home.path(), runner);

    // Act
    let resolved = service.run(&invocation(&missing)).unwrap();

    // Assert
    assert_eq!(resolved, missing);
}

// ============================================================
// logging
// ============================================================

#[test]
fn given_logging_enabled_when_run_succeeds_then_logs_resolved_path() {
    // Arrange
    let home = TempDir::new().unwrap();
    let project = home.path().join("src");
    std::fs::create_dir_all(&project).unwrap();
    let runner = Arc::new(RecordingRunner::exiting_with(0));
    let service = service(home.path(), runner);
    let captured = Captured::default();
    let subscriber =
        tracing_subscriber::registry().with(fmt_layer(&LogSettings::new(true), captured.clone()));

    // Act
    let resolved = tracing::subscriber::with_default(subscriber, || {
        service.run(&invocation(&project))
    })
    .unwrap();

    // Assert
    let logs = captured.contents();
    assert!(
        logs.contains(" - INFO: Successfully ran code2prompt with template \"summary\""),
        "logs: {logs}"
    );
    assert!(logs.contains(&resolved.display().to_string()), "logs: {logs}");
    assert!(resolved.is_absolute());

    // <YYYY-MM-DD HH:MM> - INFO: <message>
    let line = logs.lines().next().unwrap();
    let (stamp, rest) = line.split_at(16);
    assert!(
        stamp.chars().enumerate().all(|(i, c)| match i {
            4 | 7 => c == '-',
            10 => c == ' ',
            13 => c == ':',
            _ => c.is_ascii_digit(),
        }),
        "line: {line}"
    );
    assert!(rest.starts_with(" - INFO: Successfully ran"), "line: {line}");
}

#[test]
fn given_logging_disabled_when_run_succeeds_then_nothing_logged() {
    // Arrange
    let home = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::exiting_with(0));
    let service = service(home.path(), runner);
    let captured = Captured::default();
    let subscriber =
        tracing_subscriber::registry().with(fmt_layer(&LogSettings::new(false), captured.clone()));

    // Act
    tracing::subscriber::with_default(subscriber, || service.run(&invocation(home.path())))
        .unwrap();

    // Assert
    assert!(captured.contents().is_empty());
}
