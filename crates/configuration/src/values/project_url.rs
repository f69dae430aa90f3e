//! The public URL of a hosted project, e.g. `https://abcd1234.supabase.co`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUrl(Url);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectUrlError {
    #[error("'{url}' is not a valid URL: {source}")]
    Unparseable {
        url: String,
        source: url::ParseError,
    },
    #[error("'{0}' has no host to derive a project id from")]
    MissingHost(String),
}

impl ProjectUrl {
    pub fn parse(input: &str) -> Result<Self, ProjectUrlError> {
        let url = Url::parse(input).map_err(|source| ProjectUrlError::Unparseable {
            url: input.to_string(),
            source,
        })?;
        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(url)),
            _ => Err(ProjectUrlError::MissingHost(input.to_string())),
        }
    }

    pub fn host(&self) -> &str {
        // checked in `parse`
        self.0.host_str().unwrap_or_default()
    }

    /// The project identifier: the leading dot-separated segment of the host.
    /// Hosts are normalised to lower case when parsed, so the identifier is too.
    pub fn project_id(&self) -> &str {
        let host = self.host();
        host.split('.').next().unwrap_or(host)
    }

    /// The URL of a PostgREST RPC function on this project.
    pub fn rpc_endpoint(&self, function: &str) -> String {
        format!(
            "{}/rest/v1/rpc/{function}",
            self.0.as_str().trim_end_matches('/')
        )
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for ProjectUrl {
    type Err = ProjectUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
