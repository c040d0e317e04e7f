use crate::token::Token;
use std::fmt;

/// What the parser expected at the point of failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ErrorInfo {
    #[error("expected tokens but found none")]
    EmptyInput,
    #[error("expected {{ or [")]
    UnexpectedStart,
    #[error("expected {0} at end of input")]
    UnclosedContainer(char),
    #[error("expected EOF")]
    TrailingContent,

    #[error("expected \"")]
    ExpectedKey,
    #[error("expected :")]
    ExpectedColon,
    #[error("expected token")]
    ExpectedValue,
    #[error("expected , or {0}")]
    ExpectedSeparator(char),
    #[error("trailing , before {0}")]
    TrailingComma(char),

    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// The token the parser looked at when it failed.
#[derive(Clone, Debug, PartialEq)]
pub enum Found {
    Token(Token),
    Eof,
}

impl Found {
    pub fn is_eof(&self) -> bool {
        matches!(self, Found::Eof)
    }
}

impl From<Option<&Token>> for Found {
    fn from(token: Option<&Token>) -> Self {
        match token {
            Some(token) => Found::Token(token.clone()),
            None => Found::Eof,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Found::Token(token) => write!(f, "{}", token),
            Found::Eof => write!(f, "EOF"),
        }
    }
}

/// First syntax error of a validation pass.
///
/// `pos` is an index into the token sequence. It equals the sequence
/// length when the parser ran out of tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub pos: usize,
    pub info: ErrorInfo,
    pub found: Found,
}

impl Error {
    pub fn new(pos: usize, info: ErrorInfo, found: Found) -> Self {
        Error { pos, info, found }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.info {
            ErrorInfo::EmptyInput => write!(f, "{}", self.info),
            ErrorInfo::UnclosedContainer(_) | ErrorInfo::TrailingComma(_) => {
                write!(f, "Error at token #{}: {}", self.pos, self.info)
            }
            _ => write!(
                f,
                "Error at token #{}: {}, got {}",
                self.pos, self.info, self.found
            ),
        }
    }
}

impl std::error::Error for Error {}
