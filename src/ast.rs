//! # SCIM Filter - Abstract Syntax Tree
//!
//! This module defines the tokens and tree nodes produced while reading a
//! SCIM filter expression such as:
//!
//! ```text
//! userName eq "Joe" and emails[type eq "work"]
//! ```
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Attribute comparators (`eq`, `sw`, ...) and the logical
//!   operators `and` / `or`
//! - **[nodes]** - The three tree node kinds: condition, logical, array filter
//!
//! ## Core Concepts
//!
//! ### Conditions
//!
//! A condition tests one attribute path against a value:
//!
//! ```text
//! name.familyName sw "J"
//! age ge 18
//! title pr
//! ```
//!
//! `pr` (present) is the only comparator that takes no value.
//!
//! ### Logical Chains
//!
//! `and` and `or` bind with the same strength and group from the left, so
//! `a and b or c` means `(a and b) or c`. Use parentheses to group otherwise.
//!
//! ### Array Filters
//!
//! A bracketed expression after an attribute scopes the inner filter to the
//! elements of a multi-valued attribute:
//!
//! ```text
//! emails[type eq "work" and primary eq true]
//! ```
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::{Condition, ScimNode};
pub use operators::{Comparator, LogicalOperator};
pub use tokens::Token;
