//! The admin tools behind the `apply-migration`, `fix-comments-rls` and
//! `run-migration` binaries.
//!
//! Each tool writes its user-facing report to a caller-supplied writer and
//! leaves the choice of exit code to the binary.

pub mod advisor;
pub mod apply_migration;
pub mod credentials;
pub mod error;
pub mod run_migration;

pub use error::Error;
