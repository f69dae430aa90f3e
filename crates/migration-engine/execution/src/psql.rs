//! Run SQL through the `psql` command-line client.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use supabase_admin_configuration::ConnectionParameters;

use crate::error::{Error, ExitStatus};

pub const DEFAULT_CLIENT: &str = "psql";

/// What the client printed on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
}

/// A `psql` executable, found on `PATH` unless given as a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psql {
    program: PathBuf,
}

impl Default for Psql {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT)
    }
}

impl Psql {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The name used in diagnostics: the executable's file name.
    pub fn name(&self) -> String {
        self.program.file_name().map_or_else(
            || self.program.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    fn command(&self, connection: &ConnectionParameters, sql: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-h")
            .arg(&connection.host)
            .arg("-U")
            .arg(&connection.user)
            .arg("-d")
            .arg(&connection.database)
            .arg("-c")
            .arg(sql)
            // psql reads passwords from the terminal rather than stdin
            .env("PGPASSWORD", connection.password.expose())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    /// Run `sql` against the database and wait for the client to exit.
    ///
    /// The password is also written to the client's standard input.
    pub fn execute(
        &self,
        connection: &ConnectionParameters,
        sql: &str,
    ) -> Result<CommandOutput, Error> {
        let program = self.name();
        let span = tracing::info_span!(
            "psql",
            program = %self.program.display(),
            host = %connection.host,
            database = %connection.database,
            user = %connection.user,
        );

        span.in_scope(|| {
            tracing::debug!(sql = %sql, "running client");

            let mut child = self
                .command(connection, sql)
                .spawn()
                .map_err(|source| match source.kind() {
                    io::ErrorKind::NotFound => Error::ClientNotFound {
                        program: program.clone(),
                    },
                    _ => Error::Spawn {
                        program: program.clone(),
                        source,
                    },
                })?;

            if let Some(mut stdin) = child.stdin.take() {
                // a client that never reads its input closes the pipe first
                match stdin.write_all(connection.password.expose().as_bytes()) {
                    Err(source) if source.kind() != io::ErrorKind::BrokenPipe => {
                        return Err(Error::Io {
                            program: program.clone(),
                            source,
                        });
                    }
                    _ => {}
                }
            }

            let output = child.wait_with_output().map_err(|source| Error::Io {
                program: program.clone(),
                source,
            })?;
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

            if output.status.success() {
                tracing::info!("client finished successfully");
                Ok(CommandOutput { stdout })
            } else {
                tracing::error!(status = ?output.status.code(), stderr = %stderr, "client failed");
                Err(Error::CommandFailed {
                    program,
                    status: ExitStatus(output.status.code()),
                    stderr,
                })
            }
        })
    }
}
