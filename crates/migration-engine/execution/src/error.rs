//! Errors from running an external database client.

use std::fmt;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{program} not found")]
    ClientNotFound { program: String },
    #[error("unable to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("unable to talk to {program}: {source}")]
    Io { program: String, source: io::Error },
    #[error("{program} exited with {status}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// The exit code of a finished client, if it had one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(pub Option<i32>);

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "status {code}"),
            None => f.write_str("no status (terminated by a signal)"),
        }
    }
}
