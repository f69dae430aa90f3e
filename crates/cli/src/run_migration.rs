//! Apply a script statement by statement through the project's `exec_sql`
//! RPC endpoint.

use std::io::Write;
use std::process::ExitCode;

use migration_engine_execution::rpc::{Outcome, RpcClient};
use migration_engine_sql::script::TAGS_AND_STATUS;
use migration_engine_sql::Script;
use supabase_admin_configuration::environment::Environment;
use supabase_admin_configuration::{ConfigurationError, ProjectSettings};

use crate::error::Error;

const PREVIEW_WIDTH: usize = 70;

#[derive(Debug, clap::Parser)]
#[command(about = "Apply a migration through the project's exec_sql endpoint")]
pub struct RunMigrationArgs {
    /// The script to apply.
    #[arg(long, default_value = TAGS_AND_STATUS.name(), value_parser = Script::by_name)]
    pub script: Script,
}

/// Tally of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Report {
    /// Statements the endpoint answered, whatever the status.
    pub answered: usize,
    /// Statements that could not be sent.
    pub failed: usize,
    pub total: usize,
}

impl Report {
    pub fn exit_code(self) -> ExitCode {
        if self.failed == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Resolve the project settings and apply the chosen script.
///
/// Returns `None`, after saying what is wrong, when the settings cannot be read.
pub async fn run(
    script: Script,
    settings: &ProjectSettings,
    environment: &impl Environment,
    out: &mut impl Write,
) -> Result<Option<Report>, Error> {
    let project = match settings.resolve(environment) {
        Ok(project) => project,
        Err(error @ ConfigurationError::MissingVariables(_)) => {
            writeln!(out, "❌ Error: {error}")?;
            writeln!(out, "Set them in .env.local")?;
            return Ok(None);
        }
        Err(error) => {
            writeln!(out, "❌ Error: {error}")?;
            return Ok(None);
        }
    };

    let client = RpcClient::new(&project);
    let report = apply(&client, script, out).await?;

    writeln!(out, "Your API query should now work! Test it:")?;
    writeln!(
        out,
        "curl \"{}/rest/v1/manga?select=id,title,status&limit=1\"",
        project.url.as_str().trim_end_matches('/')
    )?;
    writeln!(out)?;
    Ok(Some(report))
}

/// Send every statement of `script` in order, reporting each on `out`.
pub async fn apply(
    client: &RpcClient,
    script: Script,
    out: &mut impl Write,
) -> Result<Report, Error> {
    let statements = script.statements();
    let mut report = Report {
        total: statements.len(),
        ..Report::default()
    };

    writeln!(out, "🔄 Applying database migrations...")?;
    writeln!(out)?;

    for statement in &statements {
        writeln!(out, "  > {}...", statement.preview(PREVIEW_WIDTH))?;
        match client.exec_sql(statement.sql()).await {
            Ok(Outcome::Applied) => {
                report.answered += 1;
                writeln!(out, "    ✅ OK")?;
            }
            Ok(Outcome::Rejected { status }) => {
                report.answered += 1;
                writeln!(out, "    ⚠️  Status {status}")?;
            }
            Err(error) => {
                report.failed += 1;
                tracing::error!(%error, "unable to send statement");
                writeln!(out, "    ❌ {error}")?;
            }
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "✅ Completed: {}/{} migrations",
        report.answered, report.total
    )?;
    writeln!(out)?;
    Ok(report)
}
