//! The scripts shipped with the admin tools.

use thiserror::Error;

use crate::guard::{self, Guard};
use crate::statement::{self, Statement};

/// A named SQL script embedded in the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script {
    name: &'static str,
    summary: &'static str,
    sql: &'static str,
}

/// Adds `color` and `category` to `tags`, `status` to `manga`, and indexes them.
pub const TAGS_AND_STATUS: Script = Script {
    name: "tags-and-status",
    summary: "add tag colour/category and manga status columns",
    sql: include_str!("scripts/tags_and_status.sql"),
};

/// Lets anyone insert into `public.comments`.
pub const COMMENTS_RLS: Script = Script {
    name: "comments-rls",
    summary: "allow anonymous inserts on public.comments",
    sql: include_str!("scripts/comments_rls.sql"),
};

pub const ALL: [Script; 2] = [TAGS_AND_STATUS, COMMENTS_RLS];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown script '{name}', expected one of: {}", known_names())]
pub struct UnknownScript {
    pub name: String,
}

fn known_names() -> String {
    ALL.iter().map(Script::name).collect::<Vec<_>>().join(", ")
}

impl Script {
    pub fn by_name(name: &str) -> Result<Script, UnknownScript> {
        ALL.into_iter()
            .find(|script| script.name == name)
            .ok_or_else(|| UnknownScript {
                name: name.to_string(),
            })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// The full script text, comments included.
    pub fn sql(&self) -> &'static str {
        self.sql
    }

    pub fn statements(&self) -> Vec<Statement> {
        statement::split(self.sql)
    }

    /// Statements that would fail if the script were applied a second time,
    /// with the reason.
    pub fn unguarded(&self) -> Vec<(Statement, String)> {
        let statements = self.statements();
        statements
            .iter()
            .enumerate()
            .filter_map(|(index, statement)| {
                match guard::check(statement, &statements[..index]) {
                    Guard::Unguarded(reason) => Some((statement.clone(), reason)),
                    Guard::Guarded | Guard::Repeatable => None,
                }
            })
            .collect()
    }
}
