//! Shell scripts standing in for `psql`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A fake database client that records how it was called, prints fixed
/// output and exits with a fixed code.
pub struct FakeClient {
    directory: TempDir,
    path: PathBuf,
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

impl FakeClient {
    pub fn new(stdout: &str, stderr: &str, exit_code: i32) -> Self {
        let directory = tempfile::tempdir().expect("tempfile::tempdir");
        let path = directory.path().join("psql");
        let record = |name: &str| shell_quote(&directory.path().join(name).display().to_string());

        let script = format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > {args}\n\
             cat > {stdin}\n\
             printf '%s' \"$PGPASSWORD\" > {pgpassword}\n\
             printf '%s' {stdout}\n\
             printf '%s' {stderr} >&2\n\
             exit {exit_code}\n",
            args = record("args"),
            stdin = record("stdin"),
            pgpassword = record("pgpassword"),
            stdout = shell_quote(stdout),
            stderr = shell_quote(stderr),
        );
        fs::write(&path, script).expect("fs::write");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("fs::set_permissions");

        Self { directory, path }
    }

    /// A client that succeeds.
    pub fn succeeding(stdout: &str) -> Self {
        Self::new(stdout, "", 0)
    }

    /// A client that fails with `exit_code`.
    pub fn failing(stderr: &str, exit_code: i32) -> Self {
        Self::new("", stderr, exit_code)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn recorded(&self, name: &str) -> String {
        fs::read_to_string(self.directory.path().join(name)).unwrap_or_default()
    }

    /// The arguments of the last run, one per line.
    pub fn recorded_args(&self) -> Vec<String> {
        self.recorded("args").lines().map(str::to_string).collect()
    }

    /// Everything written to the client's standard input.
    pub fn recorded_stdin(&self) -> String {
        self.recorded("stdin")
    }

    /// The value of `PGPASSWORD` during the last run.
    pub fn recorded_password_variable(&self) -> String {
        self.recorded("pgpassword")
    }
}

/// A path where no executable exists.
pub fn missing_client() -> PathBuf {
    let directory = tempfile::tempdir().expect("tempfile::tempdir");
    directory.path().join("psql")
}
