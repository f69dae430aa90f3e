//! Database connection settings.

use crate::values::Password;

pub const DEFAULT_HOST: &str = "db.ljmoqseafxhncpwzuwex.supabase.co";
pub const DEFAULT_DATABASE: &str = "postgres";
pub const DEFAULT_USER: &str = "postgres";

pub const HOST_VARIABLE: &str = "SUPABASE_DB_HOST";
pub const DATABASE_VARIABLE: &str = "SUPABASE_DB_NAME";
pub const USER_VARIABLE: &str = "SUPABASE_DB_USER";
pub const PASSWORD_VARIABLE: &str = "SUPABASE_DB_PASSWORD";

/// Where to connect, as given on the command line or through the environment.
#[derive(Clone, PartialEq, Eq, Debug, clap::Args)]
pub struct DatabaseConnectionSettings {
    /// Host name of the Postgres server.
    #[arg(long, env = HOST_VARIABLE, default_value = DEFAULT_HOST)]
    pub host: String,
    /// Name of the database.
    #[arg(long, env = DATABASE_VARIABLE, default_value = DEFAULT_DATABASE)]
    pub database: String,
    /// Role to connect as.
    #[arg(long, env = USER_VARIABLE, default_value = DEFAULT_USER)]
    pub user: String,
}

impl Default for DatabaseConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            user: DEFAULT_USER.to_string(),
        }
    }
}

impl DatabaseConnectionSettings {
    pub fn with_password(self, password: Password) -> ConnectionParameters {
        ConnectionParameters {
            host: self.host,
            database: self.database,
            user: self.user,
            password,
        }
    }
}

/// Everything the database client needs to connect.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConnectionParameters {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: Password,
}
