//! Compiles SCIM filter expressions into MongoDB query documents.
//!
//! ```
//! use scim_filter::scim_to_mongo;
//! use serde_json::json;
//!
//! let query = scim_to_mongo(r#"userName eq "Joe" and drinksCoffee eq true"#).unwrap();
//! assert_eq!(
//!     query,
//!     json!({"$and": [
//!         {"userName": {"$eq": "Joe"}},
//!         {"drinksCoffee": {"$eq": true}}
//!     ]})
//! );
//! ```
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{Comparator, Condition, LogicalOperator, ScimNode, Token};
pub use compiler::{compile, compile_optional};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, ParseOptions, Parser, parse};
pub use value::ScimValue;

/// Parse a filter into its tree, or `None` when the filter is blank.
pub fn parse_filter(filter: &str, options: ParseOptions) -> Result<Option<ScimNode>, ParseError> {
    if filter.trim().is_empty() {
        return Ok(None);
    }
    let tokens = Lexer::new(filter).tokenize();
    Parser::with_options(tokens, options).parse().map(Some)
}

/// Translate a SCIM filter into a MongoDB query document.
///
/// `None`, empty and blank filters produce `{}`.
pub fn scim_to_mongo<'a>(
    filter: impl Into<Option<&'a str>>,
) -> Result<serde_json::Value, ParseError> {
    scim_to_mongo_with(filter.into(), ParseOptions::default())
}

/// [`scim_to_mongo`] with explicit parser settings.
pub fn scim_to_mongo_with(
    filter: Option<&str>,
    options: ParseOptions,
) -> Result<serde_json::Value, ParseError> {
    let node = match filter {
        Some(filter) => parse_filter(filter, options)?,
        None => None,
    };
    let query = compile_optional(node.as_ref());
    tracing::debug!(filter = ?filter, "compiled filter to query");
    Ok(query)
}
