use crate::{position::Position, token::Token};
use std::mem;
use tracing::debug;

const QUOTATION_MARK: char = '\u{0022}';
const REVERSE_SOLIDUS: char = '\u{005C}';

const COMMA: char = ',';
const COLON: char = ':';
const LEFT_BRACKET: char = '[';
const RIGHT_BRACKET: char = ']';
const LEFT_BRACE: char = '{';
const RIGHT_BRACE: char = '}';

const MINUS: &str = "-";

/// Splits text into tokens, one line at a time.
///
/// The lexer never fails. Anything it cannot classify is kept as a
/// `Token::Fragment` for the parser to reject.
///
/// Escapes are not decoded. A quote preceded by `\` never closes a string,
/// so a string ending in an escaped backslash (`"a\\"`) stays open until
/// the end of its line.
#[derive(Debug)]
pub struct Lexer {
    tokens: Vec<Token>,
    positions: Vec<Position>,
    buf: String,
    start: Position,
    pos: Position,
    prev: Option<char>,
    lexing_string: bool,
    lexing_number: bool,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer {
            tokens: vec![],
            positions: vec![],
            buf: String::new(),
            start: Position::line_start(1),
            pos: Position::line_start(1),
            prev: None,
            lexing_string: false,
            lexing_number: false,
        }
    }

    pub fn tokenize(mut self, text: &str) -> (Vec<Token>, Vec<Position>) {
        let mut rows = 0;
        for (idx, line) in text.lines().enumerate() {
            self.scan_line(idx + 1, line);
            rows += 1;
        }
        debug!(tokens = self.tokens.len(), lines = rows, "tokenized input");

        (self.tokens, self.positions)
    }

    fn scan_line(&mut self, row: usize, line: &str) {
        self.pos = Position::line_start(row);
        for ch in line.chars() {
            self.scan(ch);
            self.prev = Some(ch);
            self.pos.next_col();
        }
        self.finish_line();
    }

    fn scan(&mut self, ch: char) {
        if self.lexing_string {
            if ch == QUOTATION_MARK && self.prev != Some(REVERSE_SOLIDUS) {
                self.lexing_string = false;
                let content = mem::take(&mut self.buf);
                self.emit(Token::StringLiteral(content));
            } else {
                self.buf.push(ch);
            }
            return;
        }

        if self.lexing_number {
            if self.continues_number(ch) {
                self.buf.push(ch);
                return;
            }
            self.flush();
        }

        if ch.is_whitespace() {
            self.flush();
            return;
        }

        match ch {
            QUOTATION_MARK => {
                self.flush();
                self.lexing_string = true;
                self.start = self.pos;
            }
            COMMA | COLON | LEFT_BRACKET | RIGHT_BRACKET | LEFT_BRACE | RIGHT_BRACE => {
                self.flush();
                self.start = self.pos;
                self.emit(structural(ch));
            }
            '0'..='9' if self.buf.is_empty() || self.buf == MINUS => {
                self.lexing_number = true;
                self.push(ch);
            }
            _ => {
                self.push(ch);
                if let Some(token) = keyword(&self.buf) {
                    self.buf.clear();
                    self.emit(token);
                }
            }
        }
    }

    // Repeated dots or exponent markers are kept; the parser rejects the lexeme.
    fn continues_number(&self, ch: char) -> bool {
        match ch {
            '0'..='9' | '.' | 'e' | 'E' => true,
            '+' | '-' => matches!(self.prev, Some('e') | Some('E')),
            _ => false,
        }
    }

    fn push(&mut self, ch: char) {
        if self.buf.is_empty() {
            self.start = self.pos;
        }
        self.buf.push(ch);
    }

    fn emit(&mut self, token: Token) {
        self.tokens.push(token);
        self.positions.push(self.start);
    }

    fn flush(&mut self) {
        let number = mem::replace(&mut self.lexing_number, false);
        if self.buf.is_empty() {
            return;
        }

        let lexeme = mem::take(&mut self.buf);
        match number {
            true => self.emit(Token::NumberLiteral(lexeme)),
            false => self.emit(Token::Fragment(lexeme)),
        }
    }

    fn finish_line(&mut self) {
        if self.lexing_string {
            self.lexing_string = false;
            let content = mem::take(&mut self.buf);
            self.emit(Token::Fragment(format!("{}{}", QUOTATION_MARK, content)));
        } else {
            self.flush();
        }
        self.prev = None;
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

fn structural(ch: char) -> Token {
    match ch {
        COMMA => Token::Comma,
        COLON => Token::Colon,
        LEFT_BRACKET => Token::LeftBracket,
        RIGHT_BRACKET => Token::RightBracket,
        LEFT_BRACE => Token::LeftBrace,
        _ => Token::RightBrace,
    }
}

fn keyword(lexeme: &str) -> Option<Token> {
    match lexeme {
        "true" => Some(Token::True),
        "false" => Some(Token::False),
        "null" => Some(Token::Null),
        _ => None,
    }
}

pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new().tokenize(text).0
}

pub fn tokenize_with_positions(text: &str) -> (Vec<Token>, Vec<Position>) {
    Lexer::new().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::{tokenize, tokenize_with_positions, Position, Token};
    use pretty_assertions::assert_eq;

    fn string(s: &str) -> Token {
        Token::StringLiteral(s.to_string())
    }

    fn number(s: &str) -> Token {
        Token::NumberLiteral(s.to_string())
    }

    fn fragment(s: &str) -> Token {
        Token::Fragment(s.to_string())
    }

    macro_rules! tokenize_ok {
        ($($name:ident: $input:expr, $tokens:expr;)*) => {
        $(
            #[test]
            fn $name() {
                assert_eq!(tokenize($input), $tokens);
            }
        )*
        }
    }

    tokenize_ok! {
        tokenize_empty: "", Vec::<Token>::new();
        tokenize_whitespace_only: " \t\r\n  \n", Vec::<Token>::new();
        tokenize_integer_value_with_space_before: r#"{"key": 4}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon, number("4"), Token::RightBrace,
        ];
        tokenize_integer_value_without_space_before: r#"{"key":4}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon, number("4"), Token::RightBrace,
        ];
        tokenize_float_value: r#"{"key": 4.5}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon, number("4.5"), Token::RightBrace,
        ];
        tokenize_exponent: r#"{"key": 10e1}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon, number("10e1"), Token::RightBrace,
        ];
        tokenize_positive_exponent: "[10e+10]", vec![
            Token::LeftBracket, number("10e+10"), Token::RightBracket,
        ];
        tokenize_negative_exponent: "[10e-10]", vec![
            Token::LeftBracket, number("10e-10"), Token::RightBracket,
        ];
        tokenize_upper_case_exponent: "[10E66]", vec![
            Token::LeftBracket, number("10E66"), Token::RightBracket,
        ];
        tokenize_negative_number: "[-42, -0.5]", vec![
            Token::LeftBracket, number("-42"), Token::Comma, number("-0.5"), Token::RightBracket,
        ];
        tokenize_repeated_dots_kept_in_lexeme: "[1.2.3]", vec![
            Token::LeftBracket, number("1.2.3"), Token::RightBracket,
        ];
        tokenize_minus_between_numbers_splits: "[1-2]", vec![
            Token::LeftBracket, number("1"), number("-2"), Token::RightBracket,
        ];
        tokenize_lone_minus: "[-]", vec![
            Token::LeftBracket, fragment("-"), Token::RightBracket,
        ];
        tokenize_keywords: "[true, false, null]", vec![
            Token::LeftBracket, Token::True, Token::Comma, Token::False, Token::Comma,
            Token::Null, Token::RightBracket,
        ];
        tokenize_glued_keywords: "[truefalse]", vec![
            Token::LeftBracket, Token::True, Token::False, Token::RightBracket,
        ];
        tokenize_number_then_keyword: "[1true]", vec![
            Token::LeftBracket, number("1"), Token::True, Token::RightBracket,
        ];
        tokenize_misspelled_keyword: r#"{"a": tru}"#, vec![
            Token::LeftBrace, string("a"), Token::Colon, fragment("tru"), Token::RightBrace,
        ];
        tokenize_key_with_space_inside_string: r#"{"a key": "value"}"#, vec![
            Token::LeftBrace, string("a key"), Token::Colon, string("value"), Token::RightBrace,
        ];
        tokenize_value_with_space_inside_string: r#"{"key": "a value"}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon, string("a value"), Token::RightBrace,
        ];
        tokenize_empty_strings: r#"{"": ""}"#, vec![
            Token::LeftBrace, string(""), Token::Colon, string(""), Token::RightBrace,
        ];
        tokenize_keyword_inside_string: r#"{"hey":" null"}"#, vec![
            Token::LeftBrace, string("hey"), Token::Colon, string(" null"), Token::RightBrace,
        ];
        tokenize_structural_chars_inside_string: r#"{"key": "!£$%^&*()_+{}[,].:@~;'#\\|-+-="}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon,
            string(r#"!£$%^&*()_+{}[,].:@~;'#\\|-+-="#), Token::RightBrace,
        ];
        tokenize_escaped_quotes: r#"{"key": "the boy said \" where art thou? \""}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon,
            string(r#"the boy said \" where art thou? \""#), Token::RightBrace,
        ];
        tokenize_escaped_backslash_keeps_string_open: r#"["a\\"]"#, vec![
            Token::LeftBracket, fragment(r#""a\\"]"#),
        ];
        tokenize_unterminated_string: r#"{"key"#, vec![
            Token::LeftBrace, fragment(r#""key"#),
        ];
        tokenize_string_does_not_span_lines: "[\"ab\ncd\"]", vec![
            Token::LeftBracket, fragment("\"ab"), fragment("cd"), fragment("\"]"),
        ];
        tokenize_trailing_garbage: r#"{"a": {"b": 1}} extra"#, vec![
            Token::LeftBrace, string("a"), Token::Colon, Token::LeftBrace, string("b"),
            Token::Colon, number("1"), Token::RightBrace, Token::RightBrace, fragment("extra"),
        ];
        tokenize_array_of_objects: r#"{"key": [{"key2":"value"}, {"key3":"value2"}]}"#, vec![
            Token::LeftBrace, string("key"), Token::Colon, Token::LeftBracket,
            Token::LeftBrace, string("key2"), Token::Colon, string("value"), Token::RightBrace,
            Token::Comma,
            Token::LeftBrace, string("key3"), Token::Colon, string("value2"), Token::RightBrace,
            Token::RightBracket, Token::RightBrace,
        ];
    }

    #[test]
    fn tokenize_multiline_nested_objects() {
        let source = r#"{
    "key": {
      "nested key": {
          "nested key 2": "value",
          "nested key 3": true
          }
      }
    }"#;
        assert_eq!(
            tokenize(source),
            vec![
                Token::LeftBrace,
                string("key"),
                Token::Colon,
                Token::LeftBrace,
                string("nested key"),
                Token::Colon,
                Token::LeftBrace,
                string("nested key 2"),
                Token::Colon,
                string("value"),
                Token::Comma,
                string("nested key 3"),
                Token::Colon,
                Token::True,
                Token::RightBrace,
                Token::RightBrace,
                Token::RightBrace,
            ]
        );
    }

    #[test]
    fn tokenize_crlf_line_endings() {
        assert_eq!(
            tokenize("[1,\r\n2]\r\n"),
            vec![
                Token::LeftBracket,
                number("1"),
                Token::Comma,
                number("2"),
                Token::RightBracket,
            ]
        );
    }

    #[test]
    fn positions_point_at_first_char() {
        let (tokens, positions) = tokenize_with_positions("{\n  \"key\": [1, true]\n}");
        assert_eq!(tokens.len(), positions.len());
        assert_eq!(
            positions,
            vec![
                Position { row: 1, col: 1 },
                Position { row: 2, col: 3 },
                Position { row: 2, col: 8 },
                Position { row: 2, col: 10 },
                Position { row: 2, col: 11 },
                Position { row: 2, col: 12 },
                Position { row: 2, col: 14 },
                Position { row: 2, col: 18 },
                Position { row: 3, col: 1 },
            ]
        );
    }

    #[test]
    fn positions_of_negative_number_start_at_sign() {
        let (_, positions) = tokenize_with_positions("[ -12]");
        assert_eq!(positions[1], Position { row: 1, col: 3 });
    }

    #[test]
    fn retokenizing_joined_lexemes_is_stable() {
        let source = r#"{"a key": [1, -2.5e+3, "x\"y", true, false, null, {"": []}]}"#;
        let tokens = tokenize(source);
        let joined = tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(tokenize(&joined), tokens);
    }
}
