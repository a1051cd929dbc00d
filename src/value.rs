use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern is valid"));

/// Operand of a filter condition.
///
/// Quoted operands are always strings. Unquoted operands are typed from their
/// text: numbers first, then `true`/`false`, falling back to a string.
///
/// # Examples
///
/// ```
/// use scim_filter::ScimValue;
///
/// assert_eq!(ScimValue::from_unquoted("30"), ScimValue::Integer(30));
/// assert_eq!(ScimValue::from_unquoted("2.5"), ScimValue::Float(2.5));
/// assert_eq!(ScimValue::from_unquoted("TRUE"), ScimValue::Boolean(true));
/// assert_eq!(ScimValue::from_unquoted("Joe"), ScimValue::String("Joe".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ScimValue {
    String(String),

    /// Whole number that fits in an `i64`
    Integer(i64),

    Float(f64),

    Boolean(bool),
}

impl ScimValue {
    /// Type an unquoted value token.
    pub fn from_unquoted(raw: &str) -> Self {
        if NUMERIC.is_match(raw) {
            if !raw.contains('.') {
                if let Ok(n) = raw.parse::<i64>() {
                    return ScimValue::Integer(n);
                }
            }
            if let Ok(n) = raw.parse::<f64>() {
                if n.is_finite() {
                    return ScimValue::Float(n);
                }
            }
        }

        if raw.eq_ignore_ascii_case("true") {
            ScimValue::Boolean(true)
        } else if raw.eq_ignore_ascii_case("false") {
            ScimValue::Boolean(false)
        } else {
            ScimValue::String(raw.to_string())
        }
    }
}

/// Plain text of the value, as embedded in regex patterns.
impl fmt::Display for ScimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScimValue::String(s) => f.write_str(s),
            ScimValue::Integer(n) => write!(f, "{}", n),
            // Keep a fraction so the text reads back as a float
            ScimValue::Float(n) if n.fract() == 0.0 => write!(f, "{:.1}", n),
            ScimValue::Float(n) => write!(f, "{}", n),
            ScimValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<ScimValue> for serde_json::Value {
    fn from(value: ScimValue) -> Self {
        match value {
            ScimValue::String(s) => serde_json::Value::String(s),
            ScimValue::Integer(n) => serde_json::Value::Number(n.into()),
            ScimValue::Float(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ScimValue::Boolean(b) => serde_json::Value::Bool(b),
        }
    }
}

impl From<&str> for ScimValue {
    fn from(s: &str) -> Self {
        ScimValue::String(s.to_string())
    }
}

impl From<String> for ScimValue {
    fn from(s: String) -> Self {
        ScimValue::String(s)
    }
}

impl From<i64> for ScimValue {
    fn from(n: i64) -> Self {
        ScimValue::Integer(n)
    }
}

impl From<i32> for ScimValue {
    fn from(n: i32) -> Self {
        ScimValue::Integer(n.into())
    }
}

impl From<f64> for ScimValue {
    fn from(n: f64) -> Self {
        ScimValue::Float(n)
    }
}

impl From<bool> for ScimValue {
    fn from(b: bool) -> Self {
        ScimValue::Boolean(b)
    }
}
