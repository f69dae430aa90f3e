//! Splitting scripts into individual statements.

use std::fmt;

use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::tokenizer::{Token, Tokenizer, TokenizerError};

/// One statement of a script, without its terminating `;` or comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement(String);

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    pub fn sql(&self) -> &str {
        &self.0
    }

    /// The statement's tokens without whitespace or comments. Unquoted
    /// words are upper-cased so they compare as keywords.
    pub fn tokens(&self) -> Result<Vec<Token>, TokenizerError> {
        let tokens = Tokenizer::new(&PostgreSqlDialect {}, &self.0).tokenize()?;
        Ok(tokens
            .into_iter()
            .filter_map(|token| match token {
                Token::Whitespace(_) | Token::EOF => None,
                Token::Word(mut word) => {
                    if word.quote_style.is_none() {
                        word.value = word.value.to_uppercase();
                    }
                    Some(Token::Word(word))
                }
                other => Some(other),
            })
            .collect())
    }

    /// The statement on a single line, cut to at most `width` characters.
    pub fn preview(&self, width: usize) -> String {
        self.0
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(width)
            .collect()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", self.0)
    }
}

fn push_statement(statements: &mut Vec<Statement>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        statements.push(Statement::new(text));
    }
}

/// The `$tag$` opening a dollar-quoted body at the start of `rest`, if any.
fn dollar_tag(rest: &str) -> Option<&str> {
    let body = rest.strip_prefix('$')?;
    let end = body.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
    let tag = &body[..end];
    let starts_with_digit = tag.starts_with(|c: char| c.is_ascii_digit());
    (body[end..].starts_with('$') && !starts_with_digit).then(|| &rest[..end + 2])
}

/// The length of the (possibly nested) block comment at the start of `rest`.
fn block_comment_len(rest: &str) -> usize {
    let mut depth = 0usize;
    let mut index = 0;
    while index < rest.len() {
        if rest[index..].starts_with("/*") {
            depth += 1;
            index += 2;
        } else if rest[index..].starts_with("*/") {
            depth -= 1;
            index += 2;
            if depth == 0 {
                return index;
            }
        } else {
            index += rest[index..].chars().next().map_or(1, char::len_utf8);
        }
    }
    rest.len()
}

/// Split a script on `;`, ignoring semicolons inside quotes and dollar-quoted
/// bodies, and dropping comments and empty statements.
pub fn split(sql: &str) -> Vec<Statement> {
    let mut statements = vec![];
    let mut current = String::new();
    let mut rest = sql;

    while let Some(c) = rest.chars().next() {
        let consumed = if rest.starts_with("--") {
            match rest.find('\n') {
                Some(newline) => {
                    current.push('\n');
                    newline + 1
                }
                None => rest.len(),
            }
        } else if rest.starts_with("/*") {
            current.push(' ');
            block_comment_len(rest)
        } else if let Some(tag) = dollar_tag(rest) {
            let end = rest[tag.len()..]
                .find(tag)
                .map_or(rest.len(), |close| 2 * tag.len() + close);
            current.push_str(&rest[..end]);
            end
        } else if c == '\'' || c == '"' {
            // doubled quotes close and immediately reopen, so they need no special case
            let end = rest[1..].find(c).map_or(rest.len(), |close| close + 2);
            current.push_str(&rest[..end]);
            end
        } else if c == ';' {
            push_statement(&mut statements, &current);
            current.clear();
            1
        } else {
            current.push(c);
            c.len_utf8()
        };
        rest = &rest[consumed..];
    }
    push_statement(&mut statements, &current);

    statements
}
