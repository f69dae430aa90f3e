mod password;
mod project_url;
mod secret;

pub use password::Password;
pub use project_url::{ProjectUrl, ProjectUrlError};
pub use secret::Secret;
