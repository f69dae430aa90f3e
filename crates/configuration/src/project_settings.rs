//! Settings identifying a hosted project and the key used to administer it.

use crate::environment::Environment;
use crate::error::ConfigurationError;
use crate::values::{ProjectUrl, Secret};

pub const DEFAULT_PROJECT_URL_VARIABLE: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const DEFAULT_SERVICE_ROLE_KEY_VARIABLE: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProjectSettings {
    /// Public URL of the project.
    pub url: Secret,
    /// The service-role API key.
    pub service_role_key: Secret,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            url: Secret::FromEnvironment {
                variable: DEFAULT_PROJECT_URL_VARIABLE.into(),
            },
            service_role_key: Secret::FromEnvironment {
                variable: DEFAULT_SERVICE_ROLE_KEY_VARIABLE.into(),
            },
        }
    }
}

/// Project settings with every secret read.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Project {
    pub url: ProjectUrl,
    pub service_role_key: String,
}

impl ProjectSettings {
    /// Read all settings, reporting every missing variable at once.
    pub fn resolve(&self, environment: &impl Environment) -> Result<Project, ConfigurationError> {
        let url = self.url.resolve(environment);
        let service_role_key = self.service_role_key.resolve(environment);

        match (url, service_role_key) {
            (Ok(url), Ok(service_role_key)) => {
                let url = ProjectUrl::parse(&url)?;
                tracing::debug!(project_id = url.project_id(), "resolved project settings");
                Ok(Project {
                    url,
                    service_role_key,
                })
            }
            (url, service_role_key) => {
                let missing = [url.err(), service_role_key.err()]
                    .into_iter()
                    .flatten()
                    .map(|error| error.variable().clone())
                    .collect();
                Err(ConfigurationError::MissingVariables(missing))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use similar_asserts::assert_eq;

    use super::*;
    use crate::environment::{EmptyEnvironment, Variable};

    #[test]
    fn reports_every_missing_variable() {
        let result = ProjectSettings::default().resolve(&EmptyEnvironment);

        assert_eq!(
            result,
            Err(ConfigurationError::MissingVariables(vec![
                DEFAULT_PROJECT_URL_VARIABLE.into(),
                DEFAULT_SERVICE_ROLE_KEY_VARIABLE.into(),
            ]))
        );
    }

    #[test]
    fn reports_only_the_missing_variable() {
        let environment = HashMap::from([(
            Variable::from(DEFAULT_PROJECT_URL_VARIABLE),
            "https://abcd1234.supabase.co".to_string(),
        )]);

        let result = ProjectSettings::default().resolve(&environment);

        assert_eq!(
            result,
            Err(ConfigurationError::MissingVariables(vec![
                DEFAULT_SERVICE_ROLE_KEY_VARIABLE.into()
            ]))
        );
    }

    #[test]
    fn resolves_a_complete_environment() {
        let environment = HashMap::from([
            (
                Variable::from(DEFAULT_PROJECT_URL_VARIABLE),
                "https://abcd1234.supabase.co".to_string(),
            ),
            (
                Variable::from(DEFAULT_SERVICE_ROLE_KEY_VARIABLE),
                "service-key".to_string(),
            ),
        ]);

        let project = ProjectSettings::default().resolve(&environment).unwrap();

        assert_eq!(project.url.project_id(), "abcd1234");
        assert_eq!(project.service_role_key, "service-key");
    }
}
