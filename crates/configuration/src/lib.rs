pub mod connection_settings;
pub mod environment;
pub mod error;
pub mod project_settings;
pub mod values;

pub use connection_settings::{ConnectionParameters, DatabaseConnectionSettings};
pub use error::ConfigurationError;
pub use project_settings::{Project, ProjectSettings};
pub use values::{Password, ProjectUrl, Secret};
