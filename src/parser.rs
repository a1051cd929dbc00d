use thiserror::Error;

use crate::{
    ast::{Comparator, Condition, LogicalOperator, ScimNode, Token},
    value::ScimValue,
};

/// Errors raised while parsing a token stream.
///
/// Positions are indexes into the token sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Operator word is not one of the supported comparators
    #[error("Unsupported comparator: {comparator} (token {position})")]
    UnsupportedComparator { comparator: String, position: usize },

    /// Attribute, comparator or value missing where a condition was expected
    #[error("Invalid condition syntax at token {position}")]
    InvalidCondition { position: usize },

    /// Group opened with `(` or `[` was never closed
    #[error("Expected '{expected}' at token {position}")]
    MissingClosing { expected: char, position: usize },

    /// Groups and and/or switches nested deeper than [`ParseOptions::max_depth`]
    #[error("Filter nested deeper than {limit} levels at token {position}")]
    NestingTooDeep { limit: usize, position: usize },

    /// Tokens left over after a complete filter
    #[error("Unexpected token '{token}' at token {position}")]
    UnexpectedToken { token: String, position: usize },
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of `(...)` and `[...]` groups plus changes between
    /// `and` and `or` within a chain.
    ///
    /// Runs of the same operator are unlimited: `a and b and ... and z`
    /// compiles to one flat `$and`. Every switch (`a and b or c`) wraps the
    /// query built so far in another level.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recursive-descent parser over a lexed filter.
///
/// Grammar, with `and` / `or` sharing one precedence level:
///
/// ```text
/// Expression := Term ( ('and' | 'or') Term )*
/// Term       := '(' Expression ')'
///             | Word '[' Expression ']'
///             | Condition
/// Condition  := Word Comparator [ Value ]
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    options: ParseOptions,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: Vec<Token>, options: ParseOptions) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
            options,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expect_closing(&mut self, closing: Token, expected: char) -> Result<(), ParseError> {
        if self.current() != Some(&closing) {
            return Err(ParseError::MissingClosing {
                expected,
                position: self.position,
            });
        }
        self.advance();
        Ok(())
    }

    fn enter_group(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                position: self.position,
            });
        }
        self.depth += 1;
        tracing::trace!(depth = self.depth, position = self.position, "nesting deeper");
        Ok(())
    }

    fn leave_group(&mut self) {
        self.depth -= 1;
    }

    fn parse_expression(&mut self) -> Result<ScimNode, ParseError> {
        let mut left = self.parse_term()?;
        let mut chain: Option<LogicalOperator> = None;
        let mut switches = 0;

        while let Some(operator) = match self.current() {
            Some(Token::Word(w)) => LogicalOperator::from_keyword(w),
            _ => None,
        } {
            // Each and/or switch nests the compiled query one level deeper
            if chain.is_some_and(|previous| previous != operator) {
                self.enter_group()?;
                switches += 1;
            }
            chain = Some(operator);

            self.advance();
            let right = self.parse_term()?;
            left = ScimNode::logical(operator, left, right);
        }

        self.depth -= switches;
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<ScimNode, ParseError> {
        if self.current() == Some(&Token::LParen) {
            self.enter_group()?;
            self.advance(); // consume '('
            let expr = self.parse_expression()?;
            self.expect_closing(Token::RParen, ')')?;
            self.leave_group();
            return Ok(expr);
        }

        if self.peek(1) == Some(&Token::LBracket) {
            return self.parse_array_filter();
        }

        self.parse_condition().map(ScimNode::Condition)
    }

    fn parse_array_filter(&mut self) -> Result<ScimNode, ParseError> {
        let path = match self.current() {
            Some(Token::Word(w)) => w.clone(),
            _ => {
                return Err(ParseError::InvalidCondition {
                    position: self.position,
                });
            }
        };
        self.enter_group()?;
        self.advance(); // consume path
        self.advance(); // consume '['
        let expr = self.parse_expression()?;
        self.expect_closing(Token::RBracket, ']')?;
        self.leave_group();

        Ok(ScimNode::array_filter(path, expr))
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let attribute_path = match self.current() {
            Some(Token::Word(w)) => w.clone(),
            _ => {
                return Err(ParseError::InvalidCondition {
                    position: self.position,
                });
            }
        };
        self.advance();

        let comparator_position = self.position;
        let comparator = match self.advance() {
            Some(Token::Word(w)) => w.parse::<Comparator>().map_err(|unknown| {
                ParseError::UnsupportedComparator {
                    comparator: unknown.0,
                    position: comparator_position,
                }
            })?,
            Some(token) => {
                return Err(ParseError::UnsupportedComparator {
                    comparator: token.to_string(),
                    position: comparator_position,
                });
            }
            None => {
                return Err(ParseError::InvalidCondition {
                    position: comparator_position,
                });
            }
        };

        if !comparator.takes_value() {
            return Ok(Condition::present(attribute_path));
        }

        let value = match self.current() {
            Some(Token::Quoted(s)) => ScimValue::String(s.clone()),
            Some(Token::Word(w)) => ScimValue::from_unquoted(w),
            _ => {
                return Err(ParseError::InvalidCondition {
                    position: self.position,
                });
            }
        };
        self.advance();

        Ok(Condition {
            attribute_path,
            comparator,
            value: Some(value),
        })
    }

    /// Parse the whole token stream into one tree.
    pub fn parse(&mut self) -> Result<ScimNode, ParseError> {
        let root = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(ParseError::UnexpectedToken {
                token: token.to_string(),
                position: self.position,
            });
        }

        tracing::debug!(tokens = self.tokens.len(), "parsed filter");
        Ok(root)
    }
}

/// Shorthand for `Parser::new(tokens).parse()`.
pub fn parse(tokens: Vec<Token>) -> Result<ScimNode, ParseError> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn depth_counter_unwinds_between_siblings() {
        let options = ParseOptions { max_depth: 1 };
        let tokens = tokenize("(a pr) and (b pr) and c[d pr]");
        assert!(Parser::with_options(tokens, options).parse().is_ok());
    }

    #[test]
    fn comparator_error_names_lowered_token() {
        let err = parse(tokenize(r#"userName FOO "x""#)).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedComparator {
                comparator: "foo".to_string(),
                position: 1,
            }
        );
        assert!(err.to_string().starts_with("Unsupported comparator"));
    }
}
