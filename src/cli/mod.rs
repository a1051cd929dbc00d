//! CLI support for scim-filter
//!
//! Provides programmatic access to the scim2mongo commands so other tools
//! can embed them.

mod compile;
mod docs;

pub use compile::{CompileOptions, CompileResult, execute_check, execute_compile, execute_tokens};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Filter did not parse
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Query could not be serialized
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No filter given on the command line or stdin
    #[error("No filter provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'scim2mongo docs' to see available categories.")]
    UnknownCategory(String),
}
