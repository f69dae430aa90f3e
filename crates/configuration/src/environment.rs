//! Access to environment variables, abstracted so tests can supply their own.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The name of an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("the environment variable {0} is not set")]
    NonExistentVariable(Variable),
    #[error("the environment variable {0} is empty")]
    EmptyVariable(Variable),
    #[error("the environment variable {0} is not valid unicode")]
    NonUnicodeValue(Variable),
}

impl Error {
    /// The variable this error is about.
    pub fn variable(&self) -> &Variable {
        match self {
            Error::NonExistentVariable(variable)
            | Error::EmptyVariable(variable)
            | Error::NonUnicodeValue(variable) => variable,
        }
    }
}

/// A source of environment variables.
///
/// Empty values are treated the same as unset ones by [`Environment::read`].
pub trait Environment {
    fn read(&self, variable: &Variable) -> Result<String, Error>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        match std::env::var(variable.name()) {
            Ok(value) if value.is_empty() => Err(Error::EmptyVariable(variable.clone())),
            Ok(value) => Ok(value),
            Err(std::env::VarError::NotPresent) => {
                Err(Error::NonExistentVariable(variable.clone()))
            }
            Err(std::env::VarError::NotUnicode(_)) => {
                Err(Error::NonUnicodeValue(variable.clone()))
            }
        }
    }
}

impl Environment for HashMap<Variable, String> {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        match self.get(variable) {
            Some(value) if value.is_empty() => Err(Error::EmptyVariable(variable.clone())),
            Some(value) => Ok(value.clone()),
            None => Err(Error::NonExistentVariable(variable.clone())),
        }
    }
}

/// An environment with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        Err(Error::NonExistentVariable(variable.clone()))
    }
}
