use crate::{
    error::{Error, ErrorInfo, Found},
    token::Token,
};
use tracing::debug;

/// Containers nested deeper than this are rejected.
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Container {
    Object,
    Array,
}

impl Container {
    fn closer(self) -> Token {
        match self {
            Container::Object => Token::RightBrace,
            Container::Array => Token::RightBracket,
        }
    }

    fn closer_char(self) -> char {
        match self {
            Container::Object => '}',
            Container::Array => ']',
        }
    }
}

/// Recursive-descent validator over a token sequence.
///
/// `consumed` counts the tokens already taken, so the last consumed token
/// sits at `consumed - 1` and `peek` looks at `consumed`. The cursor only
/// moves forward.
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    consumed: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            consumed: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(mut self) -> Result<(), Error> {
        let result = self.parse();
        debug!(
            tokens = self.tokens.len(),
            valid = result.is_ok(),
            "validated token sequence"
        );
        result
    }

    fn parse(&mut self) -> Result<(), Error> {
        let container = match self.peek() {
            Some(Token::LeftBrace) => Container::Object,
            Some(Token::LeftBracket) => Container::Array,
            Some(_) => return Err(self.unexpected(ErrorInfo::UnexpectedStart)),
            None => return Err(Error::new(0, ErrorInfo::EmptyInput, Found::Eof)),
        };
        let closes = self.tokens.last() == Some(&container.closer());

        let result = match container {
            Container::Object => self.parse_object(true),
            Container::Array => self.parse_array(true),
        };

        match result {
            // Running out of tokens inside a container whose input does not
            // even end with its closer is reported as the unclosed container.
            Err(err) if !closes && err.found.is_eof() => Err(Error::new(
                self.tokens.len(),
                ErrorInfo::UnclosedContainer(container.closer_char()),
                Found::Eof,
            )),
            result => result,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.consumed)
    }

    fn last_consumed(&self) -> Option<&'a Token> {
        self.consumed
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
    }

    fn advance(&mut self) {
        if self.consumed < self.tokens.len() {
            self.consumed += 1;
        }
    }

    fn unexpected(&self, info: ErrorInfo) -> Error {
        Error::new(self.consumed, info, Found::from(self.peek()))
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth == self.max_depth {
            return Err(self.unexpected(ErrorInfo::NestingTooDeep(self.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, container: Container, outer: bool) -> Result<(), Error> {
        if let Some(Token::Comma) = self.last_consumed() {
            return Err(Error::new(
                self.consumed - 1,
                ErrorInfo::TrailingComma(container.closer_char()),
                Found::Token(Token::Comma),
            ));
        }
        self.advance();
        self.depth -= 1;

        if outer && self.peek().is_some() {
            return Err(self.unexpected(ErrorInfo::TrailingContent));
        }
        Ok(())
    }

    fn parse_object(&mut self, outer: bool) -> Result<(), Error> {
        self.enter()?;
        loop {
            // `{` on the first pass, `,` afterwards
            self.advance();
            match self.peek() {
                Some(Token::RightBrace) => return self.close(Container::Object, outer),
                Some(Token::StringLiteral(_)) => self.advance(),
                _ => return Err(self.unexpected(ErrorInfo::ExpectedKey)),
            }

            match self.peek() {
                Some(Token::Colon) => self.advance(),
                _ => return Err(self.unexpected(ErrorInfo::ExpectedColon)),
            }

            self.parse_value()?;

            match self.peek() {
                Some(Token::Comma) => continue,
                Some(Token::RightBrace) => return self.close(Container::Object, outer),
                _ => return Err(self.unexpected(ErrorInfo::ExpectedSeparator('}'))),
            }
        }
    }

    fn parse_array(&mut self, outer: bool) -> Result<(), Error> {
        self.enter()?;
        loop {
            self.advance();
            if let Some(Token::RightBracket) = self.peek() {
                return self.close(Container::Array, outer);
            }

            self.parse_value()?;

            match self.peek() {
                Some(Token::Comma) => continue,
                Some(Token::RightBracket) => return self.close(Container::Array, outer),
                _ => return Err(self.unexpected(ErrorInfo::ExpectedSeparator(']'))),
            }
        }
    }

    fn parse_value(&mut self) -> Result<(), Error> {
        match self.peek() {
            Some(Token::LeftBrace) => self.parse_object(false),
            Some(Token::LeftBracket) => self.parse_array(false),
            Some(Token::StringLiteral(_)) => {
                self.advance();
                Ok(())
            }
            Some(token) if token.is_keyword() => {
                self.advance();
                Ok(())
            }
            Some(Token::NumberLiteral(lexeme)) if is_number(lexeme) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected(ErrorInfo::ExpectedValue)),
        }
    }
}

// Out-of-range floats parse to infinity and are rejected.
fn is_number(lexeme: &str) -> bool {
    lexeme.parse::<i64>().is_ok() || lexeme.parse::<f64>().map_or(false, f64::is_finite)
}

pub fn validate(tokens: &[Token]) -> Result<(), Error> {
    Parser::new(tokens).validate()
}
