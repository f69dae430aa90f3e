//! The SQL scripts the admin tools apply, and static checks over them.

pub mod guard;
pub mod script;
pub mod statement;

pub use guard::Guard;
pub use script::{Script, UnknownScript};
pub use statement::Statement;
