use std::fmt;

/// Lexical tokens of a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Opening parenthesis `(`
    LParen,

    /// Closing parenthesis `)`
    RParen,

    /// Opening bracket `[` of an array filter
    LBracket,

    /// Closing bracket `]` of an array filter
    RBracket,

    /// Run of letters, digits, underscores and dots.
    ///
    /// Covers attribute paths, comparators, logical keywords and unquoted
    /// values alike; the parser decides which one it is by position.
    ///
    /// # Examples
    /// ```text
    /// userName
    /// name.familyName
    /// eq
    /// 42
    /// true
    /// ```
    Word(String),

    /// Double-quoted string literal.
    ///
    /// Holds the text between the quotes. Backslash escapes are kept as
    /// written.
    ///
    /// # Examples
    /// ```text
    /// "Joe"
    /// "say \"hi\""
    /// ```
    Quoted(String),
}

impl Token {
    /// Build a token from a raw lexeme matched by the lexer.
    pub(crate) fn from_lexeme(lexeme: &str) -> Self {
        match lexeme {
            "(" => Token::LParen,
            ")" => Token::RParen,
            "[" => Token::LBracket,
            "]" => Token::RBracket,
            s if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') => {
                Token::Quoted(s[1..s.len() - 1].to_string())
            }
            s => Token::Word(s.to_string()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Word(w) => write!(f, "{}", w),
            Token::Quoted(s) => write!(f, "\"{}\"", s),
        }
    }
}
