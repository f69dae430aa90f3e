use std::io;
use std::process::ExitCode;

use clap::Parser;

use supabase_admin_cli::advisor::{self, AdvisorArgs};
use supabase_admin_configuration::environment::ProcessEnvironment;
use supabase_admin_configuration::ProjectSettings;

pub fn main() -> ExitCode {
    env_logger::init();
    let AdvisorArgs {} = AdvisorArgs::parse();

    // missing settings are reported on stdout and do not change the exit code
    match advisor::run(
        &ProjectSettings::default(),
        &ProcessEnvironment,
        &mut io::stdout(),
    ) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
