use std::fmt;

/// One lexical unit of the input.
///
/// String and number tokens keep their text exactly as scanned: nothing is
/// unescaped or converted. Text the lexer cannot classify is kept as a
/// `Fragment` so the parser can reject it with its position.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,

    /// Content between the quotes, escapes left as written.
    StringLiteral(String),
    /// Raw numeric lexeme, e.g. `-1.5e+3`.
    NumberLiteral(String),
    True,
    False,
    Null,

    /// Unclassified text. An unterminated string keeps its opening quote.
    Fragment(String),
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        matches!(self, Token::True | Token::False | Token::Null)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::StringLiteral(val) => write!(f, "\"{}\"", val),
            Token::NumberLiteral(val) => write!(f, "{}", val),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Fragment(val) => write!(f, "{}", val),
        }
    }
}
