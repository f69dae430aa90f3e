//! Errors that can occur while reading configuration.

use thiserror::Error;

use crate::environment::Variable;
use crate::values::ProjectUrlError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Missing {}", join(.0))]
    MissingVariables(Vec<Variable>),
    #[error(transparent)]
    InvalidProjectUrl(#[from] ProjectUrlError),
}

fn join(variables: &[Variable]) -> String {
    variables
        .iter()
        .map(Variable::name)
        .collect::<Vec<_>>()
        .join(" and ")
}
