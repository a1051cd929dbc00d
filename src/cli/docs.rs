//! Reference documentation for the scim2mongo CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Comparators,
    Logic,
    Arrays,
    Values,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "comparators" | "comparator" | "ops" => Some(Self::Comparators),
            "logic" | "logical" | "and_or" => Some(Self::Logic),
            "arrays" | "array" | "array_filters" => Some(Self::Arrays),
            "values" | "value" | "types" => Some(Self::Values),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SCIM2MONGO DOCUMENTATION

scim2mongo turns SCIM filter expressions into MongoDB query documents.
A filter is a chain of attribute conditions joined by 'and' / 'or'.

DOCUMENTATION CATEGORIES

  syntax            Tokens, attribute paths, and grouping
  comparators       The ten comparators and the query each one produces
  logic             'and' / 'or' chains and how they nest
  arrays            Bracketed filters over multi-valued attributes
  values            Quoted and unquoted operands, number and boolean typing

QUICK REFERENCE

  userName eq "Joe"               {"userName": {"$eq": "Joe"}}
  age pr                          {"age": {"$exists": true}}
  a eq 1 and b eq 2               {"$and": [...]}
  emails[type eq "work"]          {"emails": {"$elemMatch": {...}}}

Run 'scim2mongo doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Comparators) => Ok(COMPARATORS_DOC),
        Some(DocCategory::Logic) => Ok(LOGIC_DOC),
        Some(DocCategory::Arrays) => Ok(ARRAYS_DOC),
        Some(DocCategory::Values) => Ok(VALUES_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Tokens and Grouping

CONDITIONS
  <attribute> <comparator> <value>
  <attribute> pr

    Attribute paths are letters, digits, underscores and dots:
      userName
      name.familyName

GROUPING
  ( <filter> )
    Parentheses group a sub-filter.

    Example:
      (title pr or nickName pr) and active eq true

WHITESPACE
  Whitespace between tokens is ignored. Brackets and parentheses do not
  need surrounding spaces:
      emails[type eq "work"]
      emails [ type eq "work" ]

  Constraints:
    - Characters outside letters, digits, '_', '.', brackets and quoted
      strings are skipped
    - Runs of whitespace collapse to one space, also inside quotes
"#;

const COMPARATORS_DOC: &str = r#"COMPARATORS

  aco   array contains      {"a": v}
  co    contains            {"a": {"$regex": "v", "$options": "i"}}
  eq    equal               {"a": {"$eq": v}}
  ew    ends with           {"a": {"$regex": "v$", "$options": "i"}}
  ge    greater or equal    {"a": {"$gte": v}}
  gt    greater than        {"a": {"$gt": v}}
  le    less or equal       {"a": {"$lte": v}}
  lt    less than           {"a": {"$lt": v}}
  pr    present             {"a": {"$exists": true}}
  sw    starts with         {"a": {"$regex": "^v", "$options": "i"}}

  Comparators are case-insensitive: 'EQ' and 'eq' are the same.

  Constraints:
    - co, ew and sw escape regex metacharacters: 'a.b' matches only "a.b"
    - pr takes no value; every other comparator requires one
"#;

const LOGIC_DOC: &str = r#"LOGIC - and / or

  a eq 1 and b eq 2 and c eq 3
    => {"$and": [{a}, {b}, {c}]}

  'and' and 'or' have the SAME precedence and group left to right:

  a eq 1 and b eq 2 or c eq 3
    => {"$or": [{"$and": [{a}, {b}]}, {c}]}

  a eq 1 or b eq 2 and c eq 3
    => {"$and": [{"$or": [{a}, {b}]}, {c}]}

  Use parentheses when you mean otherwise:

  a eq 1 or (b eq 2 and c eq 3)

  Keywords are case-insensitive.

  Constraints:
    - Runs of one operator may be any length
    - Each switch between 'and' and 'or' counts toward --max-depth,
      like a pair of parentheses
"#;

const ARRAYS_DOC: &str = r#"ARRAYS - Filters over Multi-Valued Attributes

  <attribute>[<filter>]
    Matches documents where at least one element of the array satisfies
    the whole inner filter.

    Example:
      emails[type eq "work" and primary eq true]
      => {"emails": {"$elemMatch": {"$and": [
           {"type": {"$eq": "work"}},
           {"primary": {"$eq": true}}
         ]}}}

  Array filters nest and combine with and / or like any condition.
"#;

const VALUES_DOC: &str = r#"VALUES - Operand Typing

QUOTED
  "30"    always a string, never converted

UNQUOTED
  30      integer
  2.5     float
  true    boolean (any case)
  Joe     string

  Example:
    age eq 30      => {"age": {"$eq": 30}}
    age eq "30"    => {"age": {"$eq": "30"}}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_aliases() {
        assert_eq!(DocCategory::from_name("Array-Filters"), Some(DocCategory::Arrays));
        assert_eq!(DocCategory::from_name("ops"), Some(DocCategory::Comparators));
        assert_eq!(DocCategory::from_name("nope"), None);
    }

    #[test]
    fn unknown_category_is_an_error() {
        assert!(matches!(
            get_doc_category("nope"),
            Err(CliError::UnknownCategory(name)) if name == "nope"
        ));
    }
}
