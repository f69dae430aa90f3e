//! Checks that a statement can be applied more than once without failing.
//!
//! Postgres rejects `ADD COLUMN`, `CREATE INDEX` and friends when the object
//! already exists, unless the statement carries an existence guard. Policies
//! have no `IF NOT EXISTS` form, so a `CREATE POLICY` is only repeatable when
//! the same script drops the policy first.

use sqlparser::tokenizer::Token;

use crate::statement::Statement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// The statement carries an existence check.
    Guarded,
    /// The statement can be re-run as it is.
    Repeatable,
    /// Running the statement twice fails.
    Unguarded(String),
}

impl Guard {
    pub fn is_safe(&self) -> bool {
        !matches!(self, Guard::Unguarded(_))
    }
}

/// The keyword at `index`. Quoted identifiers are never keywords.
fn word(tokens: &[Token], index: usize) -> Option<&str> {
    match tokens.get(index) {
        Some(Token::Word(word)) if word.quote_style.is_none() => Some(&word.value),
        _ => None,
    }
}

fn words_at(tokens: &[Token], index: usize, expected: &[&str]) -> bool {
    expected
        .iter()
        .enumerate()
        .all(|(offset, expected)| word(tokens, index + offset) == Some(expected))
}

fn contains_words(tokens: &[Token], expected: &[&str]) -> bool {
    (0..tokens.len()).any(|index| words_at(tokens, index, expected))
}

/// The end of the possibly qualified name `a.b.c` starting at `index`.
fn object_name_end(tokens: &[Token], index: usize) -> Option<usize> {
    let Some(Token::Word(_)) = tokens.get(index) else {
        return None;
    };
    let mut end = index + 1;
    while let (Some(Token::Period), Some(Token::Word(_))) = (tokens.get(end), tokens.get(end + 1))
    {
        end += 2;
    }
    Some(end)
}

fn require(condition: bool, reason: impl FnOnce() -> String) -> Guard {
    if condition {
        Guard::Guarded
    } else {
        Guard::Unguarded(reason())
    }
}

/// Classify `statement`. `earlier` holds the statements that precede it in
/// the same script.
pub fn check(statement: &Statement, earlier: &[Statement]) -> Guard {
    let tokens = match statement.tokens() {
        Ok(tokens) => tokens,
        Err(error) => return Guard::Unguarded(format!("cannot tokenize statement: {error}")),
    };

    match word(&tokens, 0) {
        Some(
            "SELECT" | "WITH" | "SHOW" | "EXPLAIN" | "GRANT" | "REVOKE" | "COMMENT" | "SET"
            | "ANALYZE" | "UPDATE" | "DELETE",
        ) => Guard::Repeatable,
        Some("CREATE") => check_create(&tokens, earlier),
        Some("DROP") => require(contains_words(&tokens, &["IF", "EXISTS"]), || {
            "DROP without IF EXISTS".to_string()
        }),
        Some("ALTER") if word(&tokens, 1) == Some("TABLE") => check_alter_table(&tokens),
        Some("ALTER") => Guard::Repeatable,
        Some("INSERT") => require(contains_words(&tokens, &["ON", "CONFLICT"]), || {
            "INSERT without ON CONFLICT".to_string()
        }),
        Some(other) => Guard::Unguarded(format!("unrecognised statement {other}")),
        None => Guard::Unguarded("statement does not start with a keyword".to_string()),
    }
}

fn check_create(tokens: &[Token], earlier: &[Statement]) -> Guard {
    if words_at(tokens, 1, &["OR", "REPLACE"]) {
        return Guard::Repeatable;
    }

    let mut index = 1;
    while let Some("UNIQUE" | "TEMP" | "TEMPORARY" | "UNLOGGED" | "MATERIALIZED") =
        word(tokens, index)
    {
        index += 1;
    }

    match word(tokens, index) {
        Some("POLICY") => check_create_policy(tokens, index, earlier),
        Some("INDEX") => {
            let mut index = index + 1;
            if word(tokens, index) == Some("CONCURRENTLY") {
                index += 1;
            }
            require(words_at(tokens, index, &["IF", "NOT", "EXISTS"]), || {
                "CREATE INDEX without IF NOT EXISTS".to_string()
            })
        }
        Some(kind @ ("TABLE" | "SCHEMA" | "EXTENSION" | "SEQUENCE" | "VIEW")) => require(
            words_at(tokens, index + 1, &["IF", "NOT", "EXISTS"]),
            || format!("CREATE {kind} without IF NOT EXISTS"),
        ),
        Some(kind) => Guard::Unguarded(format!("CREATE {kind} has no existence check")),
        None => Guard::Unguarded("CREATE of an unknown object".to_string()),
    }
}

/// The policy name and table of `<name> ON <table>` starting at `index`.
fn policy_target(tokens: &[Token], index: usize) -> Option<(&Token, &[Token])> {
    let name = tokens.get(index)?;
    if !matches!(name, Token::Word(_)) || word(tokens, index + 1) != Some("ON") {
        return None;
    }
    let end = object_name_end(tokens, index + 2)?;
    Some((name, &tokens[index + 2..end]))
}

/// `CREATE POLICY <name> ON <table>` is repeatable when an earlier statement
/// is `DROP POLICY IF EXISTS <name> ON <table>`.
fn check_create_policy(tokens: &[Token], index: usize, earlier: &[Statement]) -> Guard {
    let Some(target) = policy_target(tokens, index + 1) else {
        return Guard::Unguarded("malformed CREATE POLICY".to_string());
    };

    let dropped_first = earlier.iter().any(|statement| {
        statement.tokens().is_ok_and(|tokens| {
            words_at(&tokens, 0, &["DROP", "POLICY", "IF", "EXISTS"])
                && policy_target(&tokens, 4) == Some(target)
        })
    });

    require(dropped_first, || {
        "CREATE POLICY without a preceding DROP POLICY IF EXISTS".to_string()
    })
}

/// Each comma-separated action of an `ALTER TABLE` is checked on its own.
fn check_alter_table(tokens: &[Token]) -> Guard {
    let mut index = 2;
    if words_at(tokens, index, &["IF", "EXISTS"]) {
        index += 2;
    }
    if word(tokens, index) == Some("ONLY") {
        index += 1;
    }
    let Some(mut index) = object_name_end(tokens, index) else {
        return Guard::Unguarded("ALTER TABLE without a table name".to_string());
    };
    // `ALTER TABLE name *` includes descendant tables
    if tokens.get(index) == Some(&Token::Mul) {
        index += 1;
    }

    let mut depth = 0usize;
    let mut actions: Vec<&[Token]> = vec![];
    let mut start = index;
    for (position, token) in tokens.iter().enumerate().skip(index) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                actions.push(&tokens[start..position]);
                start = position + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        actions.push(&tokens[start..]);
    }

    for action in actions {
        let guard = check_alter_table_action(action);
        if !guard.is_safe() {
            return guard;
        }
    }
    Guard::Guarded
}

fn check_alter_table_action(action: &[Token]) -> Guard {
    match word(action, 0) {
        Some("ADD") => match word(action, 1) {
            Some("CONSTRAINT" | "PRIMARY" | "UNIQUE" | "FOREIGN" | "CHECK") => {
                Guard::Unguarded("ADD CONSTRAINT has no existence check".to_string())
            }
            Some("COLUMN") => require(words_at(action, 2, &["IF", "NOT", "EXISTS"]), || {
                "ADD COLUMN without IF NOT EXISTS".to_string()
            }),
            _ => require(words_at(action, 1, &["IF", "NOT", "EXISTS"]), || {
                "ADD COLUMN without IF NOT EXISTS".to_string()
            }),
        },
        Some("DROP") => {
            let index = match word(action, 1) {
                Some("COLUMN" | "CONSTRAINT") => 2,
                _ => 1,
            };
            require(words_at(action, index, &["IF", "EXISTS"]), || {
                "DROP without IF EXISTS".to_string()
            })
        }
        Some("RENAME") => Guard::Unguarded("RENAME cannot be repeated".to_string()),
        _ => Guard::Repeatable,
    }
}
