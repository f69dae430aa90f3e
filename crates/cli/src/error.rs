use std::io;

use thiserror::Error;

use supabase_admin_configuration::{environment, ConfigurationError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read the database password: {0}")]
    Password(io::Error),
    #[error("unable to read the database password: {0}")]
    PasswordVariable(environment::Error),
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Execution(#[from] migration_engine_execution::Error),
    #[error("unable to write output: {0}")]
    Output(#[from] io::Error),
}
