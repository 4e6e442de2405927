//! Statement definitions

use crate::error::Result;
use crate::row::Row;

use super::parser::{parse_meta, prepare};

/// Commands handled by the shell itself rather than the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `.exit`: close the table and stop
    Exit,

    /// Any other line starting with `.`
    Unrecognized(String),
}

/// A validated statement ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Append one row
    Insert(Row),

    /// Return every row in insertion order
    Select,
}

/// Result of executing a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    Selected(Vec<Row>),
}

/// One line of input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Meta(MetaCommand),
    Statement(Statement),
}

impl Input {
    /// Classify and prepare a line
    ///
    /// Lines starting with `.` are meta-commands; everything else must
    /// prepare into a statement.
    pub fn parse(line: &str) -> Result<Input> {
        if let Some(meta) = parse_meta(line) {
            return Ok(Input::Meta(meta));
        }
        prepare(line).map(Input::Statement)
    }
}
