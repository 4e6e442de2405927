//! Statement Module
//!
//! Turns one line of shell input into something the table can run.
//!
//! ## Input Forms
//! - `.exit`                            - meta-command, close and quit
//! - `.<anything else>`                 - unrecognized meta-command
//! - `insert <id> <username> <email>`   - append one row
//! - `select`                           - print every row
//!
//! ## Preparation Errors
//! - negative id                        → `StoreError::NegativeId`
//! - username > 32 or email > 255 bytes → `StoreError::StringTooLong`
//! - missing field or non-numeric id    → `StoreError::Syntax`
//! - unknown keyword                    → `StoreError::UnrecognizedStatement`
//!
//! All of these are recoverable; the table is never touched.

mod command;
mod parser;

pub use command::{Input, MetaCommand, Outcome, Statement};
pub use parser::{parse_meta, prepare};
