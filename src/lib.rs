//! Syntax validation for JSON text.
//!
//! Text is split into tokens by the [`lexer`] and checked against the JSON
//! grammar by the recursive-descent [`parser`]. No values are built; the
//! result is either `Ok(())` or the first error with its token position.

pub mod error;
pub mod input;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod token;

pub use error::{Error, ErrorInfo, Found};
pub use lexer::{tokenize, tokenize_with_positions};
pub use parser::{validate, Parser, DEFAULT_MAX_DEPTH};
pub use position::Position;
pub use token::Token;

/// Tokenizes and validates `text` in one call.
pub fn is_valid_json(text: &str) -> Result<(), Error> {
    validate(&tokenize(text))
}
