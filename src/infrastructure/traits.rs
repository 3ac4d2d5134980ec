//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with fake implementations.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Canonicalize path (resolve symlinks, make absolute).
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Copy `from` to `to` only if `to` does not exist yet.
    ///
    /// Creation of `to` is atomic: returns `Ok(false)` when another
    /// process created it first, `Ok(true)` when this call wrote it.
    /// A partially written `to` is removed again on error.
    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<bool>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with inherited stdio and extra environment, wait for it to exit.
    ///
    /// Arguments are passed as OS strings, so paths reach the child byte for byte.
    fn status(
        &self,
        cmd: &str,
        args: &[OsString],
        envs: &[(String, String)],
    ) -> io::Result<ExitStatus>;
}

/// Source of environment variables.
pub trait EnvSource: Send + Sync {
    /// All variables with UTF-8 names and values.
    fn vars(&self) -> Vec<(String, String)>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<bool> {
        let mut source = File::open(from)?;
        let mut target = match OpenOptions::new().write(true).create_new(true).open(to) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e),
        };
        let written = io::copy(&mut source, &mut target).and_then(|_| target.sync_all());
        if let Err(e) = written {
            drop(target);
            let _ = std::fs::remove_file(to);
            return Err(e);
        }
        Ok(true)
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn status(
        &self,
        cmd: &str,
        args: &[OsString],
        envs: &[(String, String)],
    ) -> io::Result<ExitStatus> {
        std::process::Command::new(cmd)
            .args(args)
            .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
    }
}

/// Process environment of the running binary.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

impl EnvSource for HashMap<String, String> {
    fn vars(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
