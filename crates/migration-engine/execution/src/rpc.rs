//! Run SQL through a PostgREST `exec_sql` function.
//!
//! Projects are not guaranteed to define `exec_sql`, so a non-success HTTP
//! status is reported rather than treated as a failure. Only transport errors
//! fail a statement.

use serde::Serialize;
use thiserror::Error;
use tracing::{info_span, Instrument};

use supabase_admin_configuration::Project;

pub const EXEC_SQL_FUNCTION: &str = "exec_sql";

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// How the endpoint answered a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Success, or the objects already existed.
    Applied,
    /// The endpoint answered with an error status.
    Rejected { status: u16 },
}

#[derive(Serialize)]
struct ExecSqlRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    key: String,
}

impl RpcClient {
    pub fn new(project: &Project) -> Self {
        Self::with_endpoint(
            project.url.rpc_endpoint(EXEC_SQL_FUNCTION),
            project.service_role_key.clone(),
        )
    }

    pub fn with_endpoint(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            key: key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one statement to the endpoint.
    pub async fn exec_sql(&self, sql: &str) -> Result<Outcome, RpcError> {
        async {
            let response = self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.key)
                .header("apikey", &self.key)
                .json(&ExecSqlRequest { query: sql })
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            tracing::debug!(status = status.as_u16(), body = %body, "exec_sql response");

            if status.is_success() || body.contains("already exists") {
                Ok(Outcome::Applied)
            } else {
                Ok(Outcome::Rejected {
                    status: status.as_u16(),
                })
            }
        }
        .instrument(info_span!("exec_sql", endpoint = %self.endpoint))
        .await
    }
}
