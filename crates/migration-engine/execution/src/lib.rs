//! Applying SQL scripts to a hosted Postgres database, either through the
//! `psql` command-line client or through a PostgREST `exec_sql` function.

pub mod error;
pub mod psql;
pub mod rpc;

pub use error::Error;
