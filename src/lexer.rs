use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Token;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[()\[\]]|[A-Za-z0-9_.]+|"(?:[^"\\]|\\.)*""#).expect("token pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Splits a filter expression into tokens.
///
/// Brackets outside string literals always form their own token, so
/// `emails[type eq "work"]` and `emails [ type eq "work" ]` lex the same.
/// Characters that fit no token class are skipped; the lexer itself never
/// fails.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input }
    }

    /// Pad every bracket outside a string literal with spaces.
    fn pad_brackets(&self) -> String {
        let mut padded = String::with_capacity(self.input.len() * 2);
        let mut in_string = false;
        let mut previous = None;

        for ch in self.input.chars() {
            match ch {
                '"' if previous != Some('\\') => {
                    in_string = !in_string;
                    padded.push(ch);
                }
                '(' | ')' | '[' | ']' if !in_string => {
                    padded.push(' ');
                    padded.push(ch);
                    padded.push(' ');
                }
                _ => padded.push(ch),
            }
            previous = Some(ch);
        }
        padded
    }

    pub fn tokenize(&self) -> Vec<Token> {
        let padded = self.pad_brackets();
        let collapsed = WHITESPACE.replace_all(&padded, " ");

        let tokens: Vec<Token> = TOKEN
            .find_iter(collapsed.trim())
            .map(|m| Token::from_lexeme(m.as_str()))
            .collect();

        tracing::trace!(count = tokens.len(), "tokenized filter");
        tokens
    }
}

/// Shorthand for `Lexer::new(input).tokenize()`.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

#[test]
fn test_brackets_split_from_words() {
    let tokens = tokenize(r#"emails[type eq "work"]"#);
    assert_eq!(
        tokens,
        vec![
            Token::Word("emails".to_string()),
            Token::LBracket,
            Token::Word("type".to_string()),
            Token::Word("eq".to_string()),
            Token::Quoted("work".to_string()),
            Token::RBracket,
        ]
    );
}

#[test]
fn test_brackets_inside_literals_untouched() {
    let tokens = tokenize(r#"title co "(a[b])""#);
    assert_eq!(tokens.last(), Some(&Token::Quoted("(a[b])".to_string())));
    assert_eq!(tokens.len(), 3);
}
