use std::fmt;
use std::str::FromStr;

/// Attribute comparators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Array contains (`aco`)
    ArrayContains,
    /// Substring match (`co`)
    Contains,
    /// Equal (`eq`)
    Equal,
    /// Ends with (`ew`)
    EndsWith,
    /// Greater than or equal (`ge`)
    GreaterEqual,
    /// Greater than (`gt`)
    GreaterThan,
    /// Less than or equal (`le`)
    LessEqual,
    /// Less than (`lt`)
    LessThan,
    /// Attribute present (`pr`)
    Present,
    /// Starts with (`sw`)
    StartsWith,
}

impl Comparator {
    pub const ALL: [Comparator; 10] = [
        Comparator::ArrayContains,
        Comparator::Contains,
        Comparator::Equal,
        Comparator::EndsWith,
        Comparator::GreaterEqual,
        Comparator::GreaterThan,
        Comparator::LessEqual,
        Comparator::LessThan,
        Comparator::Present,
        Comparator::StartsWith,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::ArrayContains => "aco",
            Comparator::Contains => "co",
            Comparator::Equal => "eq",
            Comparator::EndsWith => "ew",
            Comparator::GreaterEqual => "ge",
            Comparator::GreaterThan => "gt",
            Comparator::LessEqual => "le",
            Comparator::LessThan => "lt",
            Comparator::Present => "pr",
            Comparator::StartsWith => "sw",
        }
    }

    /// Whether a value token follows this comparator.
    pub fn takes_value(self) -> bool {
        self != Comparator::Present
    }
}

/// Returned when a word is not one of the supported comparators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComparator(pub String);

impl FromStr for Comparator {
    type Err = UnknownComparator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Comparator::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or(UnknownComparator(lowered))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical operators. Both share one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }

    /// The MongoDB operator key, `$and` or `$or`.
    pub fn mongo_key(self) -> &'static str {
        match self {
            LogicalOperator::And => "$and",
            LogicalOperator::Or => "$or",
        }
    }

    /// Match a bare word against `and` / `or`, ignoring case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") {
            Some(LogicalOperator::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(LogicalOperator::Or)
        } else {
            None
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
