use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use supabase_admin_cli::apply_migration::{self, ApplyMigrationArgs};
use supabase_admin_configuration::environment::ProcessEnvironment;

fn try_main() -> anyhow::Result<ExitCode> {
    let args = ApplyMigrationArgs::parse();
    let outcome = apply_migration::run(args, &ProcessEnvironment, &mut io::stdout())
        .context("migration aborted")?;
    Ok(outcome.exit_code())
}

pub fn main() -> ExitCode {
    env_logger::init();
    match try_main() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("❌ {error:#}");
            ExitCode::FAILURE
        }
    }
}
