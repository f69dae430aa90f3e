//! Environments for configuration tests.

use std::collections::HashMap;

use supabase_admin_configuration::environment::Variable;
use supabase_admin_configuration::project_settings::{
    DEFAULT_PROJECT_URL_VARIABLE, DEFAULT_SERVICE_ROLE_KEY_VARIABLE,
};

pub const PROJECT_URL: &str = "https://abcd1234.supabase.co";
pub const SERVICE_ROLE_KEY: &str = "service-role-key";

/// An environment holding a project URL and a service-role key.
pub fn project_environment(url: &str, key: &str) -> HashMap<Variable, String> {
    HashMap::from([
        (Variable::from(DEFAULT_PROJECT_URL_VARIABLE), url.to_string()),
        (
            Variable::from(DEFAULT_SERVICE_ROLE_KEY_VARIABLE),
            key.to_string(),
        ),
    ])
}
