use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use supabase_admin_cli::run_migration::{self, RunMigrationArgs};
use supabase_admin_configuration::environment::ProcessEnvironment;
use supabase_admin_configuration::ProjectSettings;

async fn try_main() -> anyhow::Result<ExitCode> {
    let args = RunMigrationArgs::parse();
    let report = run_migration::run(
        args.script,
        &ProjectSettings::default(),
        &ProcessEnvironment,
        &mut io::stdout(),
    )
    .await
    .context("migration aborted")?;

    Ok(report.map_or(ExitCode::FAILURE, run_migration::Report::exit_code))
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> ExitCode {
    env_logger::init();
    match try_main().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("❌ {error:#}");
            ExitCode::FAILURE
        }
    }
}
