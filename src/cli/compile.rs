//! Compile filters from the command line

use super::CliError;
use crate::{ParseOptions, Token, compile_optional, parse_filter, tokenize};

/// Options for the compile and check commands
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The SCIM filter
    pub filter: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't emit a query
    pub syntax_only: bool,
    /// Parser settings
    pub parse: ParseOptions,
}

/// Result of a compile operation
#[derive(Debug, PartialEq)]
pub enum CompileResult {
    /// Syntax validation passed; holds the normalised filter, if not blank
    SyntaxValid(Option<String>),
    /// Compiled MongoDB query
    Query(serde_json::Value),
}

impl CompileResult {
    /// Text printed for this result.
    pub fn render(&self, pretty: bool) -> Result<String, CliError> {
        match self {
            CompileResult::SyntaxValid(Some(normalised)) => {
                Ok(format!("Syntax is valid: {}", normalised))
            }
            CompileResult::SyntaxValid(None) => Ok("Syntax is valid (empty filter)".to_string()),
            CompileResult::Query(query) if pretty => Ok(serde_json::to_string_pretty(query)?),
            CompileResult::Query(query) => Ok(serde_json::to_string(query)?),
        }
    }
}

/// Execute a compile (or syntax check) operation
pub fn execute_compile(options: &CompileOptions) -> Result<CompileResult, CliError> {
    let filter = options.filter.as_deref().ok_or(CliError::NoInput)?;
    let node = parse_filter(filter, options.parse)?;

    if options.syntax_only {
        return Ok(CompileResult::SyntaxValid(node.map(|n| n.to_string())));
    }

    Ok(CompileResult::Query(compile_optional(node.as_ref())))
}

/// Shorthand for a syntax-only compile
pub fn execute_check(filter: &str, parse: ParseOptions) -> Result<CompileResult, CliError> {
    execute_compile(&CompileOptions {
        filter: Some(filter.to_string()),
        syntax_only: true,
        parse,
        ..Default::default()
    })
}

/// Lex a filter without parsing it
pub fn execute_tokens(options: &CompileOptions) -> Result<Vec<Token>, CliError> {
    let filter = options.filter.as_deref().ok_or(CliError::NoInput)?;
    Ok(tokenize(filter))
}
