//! Arithmetic expression evaluator.
//!
//! Recognizes decimal literals, `+ - * /`, a single unary sign per factor and
//! parenthesized groups. Anything else is rejected as a syntax error; nothing
//! is ever handed to a general-purpose evaluator.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := ['-' | '+'] primary
//! primary := NUMBER | '(' expr ')'
//! ```

use std::fmt;
use thiserror::Error;

/// Maximum nesting of factors (parentheses and signs) before giving up.
const MAX_DEPTH: usize = 256;

/// Why an expression failed to parse
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxIssue {
    Empty,
    UnknownCharacter { ch: char, position: usize },
    InvalidNumber { literal: String },
    UnbalancedParentheses,
    UnexpectedToken { token: String, position: usize },
    UnexpectedEnd,
    TooDeep,
}

impl fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxIssue::Empty => write!(f, "Expression cannot be empty or just whitespace"),
            SyntaxIssue::UnknownCharacter { ch, position } => {
                write!(f, "Unknown character '{}' in expression at position {}", ch, position)
            }
            SyntaxIssue::InvalidNumber { literal } => {
                write!(f, "Invalid number format '{}'", literal)
            }
            SyntaxIssue::UnbalancedParentheses => write!(f, "Mismatched or missing parenthesis"),
            SyntaxIssue::UnexpectedToken { token, position } => {
                write!(f, "Unexpected token '{}' at position {}", token, position)
            }
            SyntaxIssue::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            SyntaxIssue::TooDeep => write!(f, "Expression nests parentheses too deeply"),
        }
    }
}

/// Evaluation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Invalid expression \"{expression}\": {issue}")]
    Syntax { expression: String, issue: SyntaxIssue },

    #[error("Division by zero in expression \"{expression}\"")]
    DivisionByZero { expression: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    position: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
        }
    }
}

/// Split the input into tokens, skipping whitespace.
fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxIssue> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, ch)) = chars.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = position;
                let mut seen_dot = false;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || (c == '.' && !seen_dot) {
                        seen_dot |= c == '.';
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[position..end];
                // A lone "." has no digits on either side
                match literal.parse::<f64>() {
                    Ok(n) if literal != "." => {
                        tokens.push(Token { kind: TokenKind::Number(n), position });
                        continue;
                    }
                    _ => {
                        return Err(SyntaxIssue::InvalidNumber {
                            literal: literal.to_string(),
                        })
                    }
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            other => return Err(SyntaxIssue::UnknownCharacter { ch: other, position }),
        };
        tokens.push(Token { kind, position });
        chars.next();
    }

    Ok(tokens)
}

/// Recursive-descent parser that evaluates as it goes.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    expression: &'a str,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn syntax(&self, issue: SyntaxIssue) -> EvalError {
        EvalError::Syntax {
            expression: self.expression.to_string(),
            issue,
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(TokenKind::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(TokenKind::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some(TokenKind::Star) => {
                    self.advance();
                    value *= self.factor()?;
                }
                Some(TokenKind::Slash) => {
                    self.advance();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero {
                            expression: self.expression.to_string(),
                        });
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.syntax(SyntaxIssue::TooDeep));
        }
        self.depth += 1;
        let result = match self.peek() {
            Some(TokenKind::Minus) => {
                self.advance();
                self.primary().map(|v| -v)
            }
            Some(TokenKind::Plus) => {
                self.advance();
                self.primary()
            }
            _ => self.primary(),
        };
        self.depth -= 1;
        result
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token { kind: TokenKind::Number(n), .. }) => Ok(n),
            Some(Token { kind: TokenKind::LParen, .. }) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token { kind: TokenKind::RParen, .. }) => Ok(value),
                    None => Err(self.syntax(SyntaxIssue::UnbalancedParentheses)),
                    Some(token) => Err(self.unexpected(token)),
                }
            }
            Some(token) => Err(self.unexpected(token)),
            None => Err(self.syntax(SyntaxIssue::UnexpectedEnd)),
        }
    }

    fn unexpected(&self, token: Token) -> EvalError {
        self.syntax(SyntaxIssue::UnexpectedToken {
            token: token.kind.to_string(),
            position: token.position,
        })
    }
}

/// Evaluate an arithmetic expression to a floating-point value.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let syntax = |issue| EvalError::Syntax {
        expression: expression.to_string(),
        issue,
    };

    if expression.trim().is_empty() {
        return Err(syntax(SyntaxIssue::Empty));
    }
    let tokens = tokenize(expression).map_err(syntax)?;

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        expression,
    };
    let value = parser.expr()?;

    match parser.advance() {
        None => Ok(value),
        Some(Token { kind: TokenKind::RParen, .. }) => {
            Err(parser.syntax(SyntaxIssue::UnbalancedParentheses))
        }
        Some(token) => Err(parser.unexpected(token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_value(expression: &str, expected: f64) {
        let value = evaluate(expression).unwrap();
        assert!(
            (value - expected).abs() < 1e-9,
            "{} evaluated to {}, expected {}",
            expression,
            value,
            expected
        );
    }

    fn issue(expression: &str) -> SyntaxIssue {
        match evaluate(expression) {
            Err(EvalError::Syntax { issue, expression: e }) => {
                assert_eq!(e, expression);
                issue
            }
            other => panic!("Expected syntax error for {:?}, got {:?}", expression, other),
        }
    }

    #[test]
    fn test_precedence() {
        assert_value("2 * (3 + 4)", 14.0);
        assert_value("2 + 3 * 4", 14.0);
        assert_value("(2 + 3) * 4", 20.0);
        assert_value("5*3-2/4", 14.5);
    }

    #[test]
    fn test_left_associativity() {
        assert_value("10 - 4 - 3", 3.0);
        assert_value("64 / 4 / 2", 8.0);
        assert_value("2 * 3 / 4 * 2", 3.0);
    }

    #[test]
    fn test_division_is_fractional() {
        assert_eq!(evaluate("4 / 2"), Ok(2.0));
        assert_eq!(evaluate("5 / 2"), Ok(2.5));
        assert_value("1/3", 1.0 / 3.0);
    }

    #[test]
    fn test_literals() {
        assert_value("123", 123.0);
        assert_value(".5 + .5", 1.0);
        assert_value("5.", 5.0);
        assert_value("10.5 + 2.5", 13.0);
        assert_value("3.8 - 3.11", 0.69);
        assert_value("0.0", 0.0);
    }

    #[test]
    fn test_unary_sign() {
        assert_value("-1", -1.0);
        assert_value("5*-2", -10.0);
        assert_value("1 - -1", 2.0);
        assert_value("-10 / -2", 5.0);
        assert_value("-(2 + 3)", -5.0);
        assert_value("+4", 4.0);
        assert_value("-0.0", 0.0);
    }

    #[test]
    fn test_whitespace_insignificant() {
        assert_value("  1 +   1  ", 2.0);
        assert_value("\t(1\n+2)*3", 9.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate("10 / 0"),
            Err(EvalError::DivisionByZero {
                expression: "10 / 0".to_string()
            })
        );
        assert!(matches!(evaluate("1 / (2 - 2)"), Err(EvalError::DivisionByZero { .. })));
        assert!(matches!(evaluate("1 / -0"), Err(EvalError::DivisionByZero { .. })));
    }

    #[test]
    fn test_division_by_zero_short_circuits() {
        // the zero division is reached before the dangling operator
        assert!(matches!(evaluate("1 / 0 +"), Err(EvalError::DivisionByZero { .. })));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(issue(""), SyntaxIssue::Empty);
        assert_eq!(issue("   "), SyntaxIssue::Empty);
    }

    #[test]
    fn test_incomplete_expression() {
        assert_eq!(issue("2 +"), SyntaxIssue::UnexpectedEnd);
        assert_eq!(issue("1+"), SyntaxIssue::UnexpectedEnd);
        assert!(matches!(issue("*1"), SyntaxIssue::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(issue("(1+2"), SyntaxIssue::UnbalancedParentheses);
        assert_eq!(issue("1+2)"), SyntaxIssue::UnbalancedParentheses);
        assert!(matches!(issue("()"), SyntaxIssue::UnexpectedToken { .. }));
        assert!(matches!(issue("1 + ( )"), SyntaxIssue::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(
            issue("1 @ 2"),
            SyntaxIssue::UnknownCharacter { ch: '@', position: 2 }
        );
        assert!(matches!(issue("abc + 1"), SyntaxIssue::UnknownCharacter { ch: 'a', .. }));
        assert!(matches!(issue("1 % 2"), SyntaxIssue::UnknownCharacter { ch: '%', .. }));
        assert!(matches!(issue("2 ** 3"), SyntaxIssue::UnexpectedToken { .. }));
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            issue("1 2"),
            SyntaxIssue::UnexpectedToken { token: "2".to_string(), position: 2 }
        );
        assert!(matches!(issue("1.2.3"), SyntaxIssue::UnexpectedToken { .. }));
        assert!(matches!(issue("(1)(2)"), SyntaxIssue::UnexpectedToken { .. }));
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            issue("1 + ."),
            SyntaxIssue::InvalidNumber { literal: ".".to_string() }
        );
    }

    #[test]
    fn test_single_sign_per_factor() {
        assert!(matches!(issue("--1"), SyntaxIssue::UnexpectedToken { .. }));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert_eq!(issue(&deep), SyntaxIssue::TooDeep);

        let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_value(&shallow, 1.0);
    }

    #[test]
    fn test_idempotent() {
        let expression = "(5-3)*8/4 - -1.5";
        assert_eq!(evaluate(expression), evaluate(expression));
        assert_eq!(evaluate("1 / 0"), evaluate("1 / 0"));
    }

    #[test]
    fn test_error_message_carries_input() {
        let err = evaluate("1 % 2").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("1 % 2"));
        assert!(message.contains("Unknown character"));

        let err = evaluate("1 / 0").unwrap_err();
        assert!(err.to_string().to_lowercase().contains("division by zero"));
    }
}
