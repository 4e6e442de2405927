//! Statement parser
//!
//! Line → `Statement` / `MetaCommand`, validating values on the way.

use crate::error::{Result, StoreError};
use crate::row::Row;

use super::{MetaCommand, Statement};

const INSERT_KEYWORD: &str = "insert";
const SELECT_KEYWORD: &str = "select";
const EXIT_COMMAND: &str = ".exit";

/// Recognize a meta-command
///
/// Returns `None` when the line is not a meta-command at all.
pub fn parse_meta(line: &str) -> Option<MetaCommand> {
    if !line.starts_with('.') {
        return None;
    }
    if line == EXIT_COMMAND {
        Some(MetaCommand::Exit)
    } else {
        Some(MetaCommand::Unrecognized(line.to_string()))
    }
}

/// Prepare a statement from one line of input
pub fn prepare(line: &str) -> Result<Statement> {
    if line.starts_with(INSERT_KEYWORD) {
        return prepare_insert(line);
    }
    if line == SELECT_KEYWORD {
        return Ok(Statement::Select);
    }
    Err(StoreError::UnrecognizedStatement(line.to_string()))
}

/// `insert <id> <username> <email>`; anything after the email is ignored
fn prepare_insert(line: &str) -> Result<Statement> {
    let mut tokens = line.split_whitespace().skip(1);

    let (Some(id), Some(username), Some(email)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(StoreError::Syntax);
    };

    let id = parse_id(id)?;
    let row = Row::new(id, username, email)?;

    Ok(Statement::Insert(row))
}

/// Negative ids and ids past `u32::MAX` get their own errors; anything that
/// is not an integer at all is a syntax error.
fn parse_id(token: &str) -> Result<u32> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::Syntax);
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(StoreError::NegativeId);
    }
    digits.parse().map_err(|_| StoreError::IdTooLarge)
}
