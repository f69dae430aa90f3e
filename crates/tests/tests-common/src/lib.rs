//! Fixtures shared by the test suites of the workspace crates.

pub mod environment;
#[cfg(unix)]
pub mod fake_client;
pub mod rpc_server;

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
