//! Apply a script through `psql`.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use migration_engine_execution::psql::{Psql, DEFAULT_CLIENT};
use migration_engine_execution::Error as ExecutionError;
use migration_engine_sql::script::TAGS_AND_STATUS;
use migration_engine_sql::Script;
use supabase_admin_configuration::environment::Environment;
use supabase_admin_configuration::{ConnectionParameters, DatabaseConnectionSettings};

use crate::credentials;
use crate::error::Error;

#[derive(Debug, clap::Parser)]
#[command(about = "Apply a migration to the project database with psql")]
pub struct ApplyMigrationArgs {
    #[command(flatten)]
    pub connection: DatabaseConnectionSettings,
    /// The psql executable to run.
    #[arg(long, env = "PSQL", default_value = DEFAULT_CLIENT)]
    pub psql: PathBuf,
    /// The script to apply.
    #[arg(long, default_value = TAGS_AND_STATUS.name(), value_parser = Script::by_name)]
    pub script: Script,
}

/// How an attempt to apply a script ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    ClientNotFound,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Applied => ExitCode::SUCCESS,
            Outcome::Failed | Outcome::ClientNotFound => ExitCode::FAILURE,
        }
    }
}

/// Read the password, then apply the chosen script.
pub fn run(
    args: ApplyMigrationArgs,
    environment: &impl Environment,
    out: &mut impl Write,
) -> Result<Outcome, Error> {
    let password = credentials::read_password(environment)?;
    let connection = args.connection.with_password(password);
    apply(&Psql::new(args.psql), &connection, args.script, out)
}

/// Apply `script` and report the result on `out`.
///
/// A failing or missing client is reported, not returned as an error.
pub fn apply(
    psql: &Psql,
    connection: &ConnectionParameters,
    script: Script,
    out: &mut impl Write,
) -> Result<Outcome, Error> {
    writeln!(out, "🔄 Applying migration...")?;
    tracing::info!(script = script.name(), "applying script");

    match psql.execute(connection, script.sql()) {
        Ok(output) => {
            writeln!(out, "✅ Migration applied successfully!")?;
            writeln!(out, "{}", output.stdout)?;
            Ok(Outcome::Applied)
        }
        Err(ExecutionError::CommandFailed { stderr, .. }) => {
            writeln!(out, "❌ Migration failed:")?;
            writeln!(out, "{stderr}")?;
            Ok(Outcome::Failed)
        }
        Err(ExecutionError::ClientNotFound { program }) => {
            writeln!(out, "❌ {program} not found. Install PostgreSQL first.")?;
            Ok(Outcome::ClientNotFound)
        }
        Err(error) => Err(error.into()),
    }
}
