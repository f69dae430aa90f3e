//! Getting hold of the database password.

use supabase_admin_configuration::connection_settings::PASSWORD_VARIABLE;
use supabase_admin_configuration::environment::{Environment, Error as EnvironmentError};
use supabase_admin_configuration::Password;

use crate::error::Error;

pub const PASSWORD_PROMPT: &str = "Enter Supabase Postgres password: ";

/// Use the password from the environment if there is one, otherwise ask on
/// the terminal without echoing.
pub fn read_password(environment: &impl Environment) -> Result<Password, Error> {
    match environment.read(&PASSWORD_VARIABLE.into()) {
        Ok(password) => {
            tracing::debug!("using password from {PASSWORD_VARIABLE}");
            return Ok(Password::new(password));
        }
        Err(EnvironmentError::NonExistentVariable(_) | EnvironmentError::EmptyVariable(_)) => {}
        Err(error) => return Err(Error::PasswordVariable(error)),
    }

    rpassword::prompt_password(PASSWORD_PROMPT)
        .map(Password::new)
        .map_err(Error::Password)
}
