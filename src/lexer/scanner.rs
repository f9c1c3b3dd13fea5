//! Lexer/Scanner for Monlox source code.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::LexerError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Turns source text into tokens, tracking line and column as it goes.
pub struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    /// Byte offset just past the last consumed character.
    offset: usize,
    line: usize,
    column: usize,
    /// Where the token being scanned began.
    start: Span,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start: Span::new(0, 0, 1, 1),
        }
    }

    /// Scan the whole source. The result always ends with `Eof`.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Result<Token, LexerError> {
        self.skip_trivia();
        self.start = Span::new(self.offset, self.offset, self.line, self.column);

        let Some(c) = self.bump() else {
            return Ok(Token::eof(self.offset, self.line, self.column));
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => self.with_equals(TokenKind::EqualEqual, TokenKind::Equal),
            '!' => self.with_equals(TokenKind::BangEqual, TokenKind::Bang),
            '<' => self.with_equals(TokenKind::LessEqual, TokenKind::Less),
            '>' => self.with_equals(TokenKind::GreaterEqual, TokenKind::Greater),
            '"' => self.string()?,
            c if c.is_ascii_digit() => self.number()?,
            c if c.is_alphabetic() || c == '_' => self.word(),
            other => return Err(LexerError::unexpected_char(other, self.span())),
        };

        Ok(Token::new(kind, self.span()))
    }

    /// `long` when the next character is `=`, otherwise `short`.
    fn with_equals(&mut self, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.bump();
            long
        } else {
            short
        }
    }

    /// Whitespace and `//` comments.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '/' && self.peek_second() == Some('/') {
                self.bump_while(|c| c != '\n');
            } else {
                break;
            }
        }
    }

    fn string(&mut self) -> Result<TokenKind, LexerError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(TokenKind::StringLiteral(value)),
                Some('\\') => {
                    let escaped = self
                        .bump()
                        .ok_or_else(|| LexerError::unterminated_string(self.span()))?;
                    let decoded = unescape(escaped)
                        .ok_or_else(|| LexerError::invalid_escape(escaped, self.span()))?;
                    value.push(decoded);
                }
                Some('\n') | None => return Err(LexerError::unterminated_string(self.span())),
                Some(c) => value.push(c),
            }
        }
    }

    /// Digits with an optional fraction. A `.` belongs to the number only
    /// when a digit follows it.
    fn number(&mut self) -> Result<TokenKind, LexerError> {
        self.bump_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }

        let text = self.lexeme();
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| LexerError::invalid_number(text.to_string(), self.span()))
    }

    /// An identifier or a keyword.
    fn word(&mut self) -> TokenKind {
        self.bump_while(|c| c.is_alphanumeric() || c == '_');
        let text = self.lexeme();
        TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()))
    }

    fn bump(&mut self) -> Option<char> {
        let (index, c) = self.chars.next()?;
        self.offset = index + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_while(&mut self, keep: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&keep) {
            self.bump();
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.offset..].chars().nth(1)
    }

    /// Source text of the token scanned so far.
    fn lexeme(&self) -> &'a str {
        &self.source[self.start.start..self.offset]
    }

    fn span(&self) -> Span {
        Span {
            end: self.offset,
            ..self.start
        }
    }
}

fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut kinds: Vec<TokenKind> = Scanner::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds.pop(), Some(TokenKind::Eof), "{}", source);
        kinds
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    fn string(value: &str) -> TokenKind {
        TokenKind::StringLiteral(value.to_string())
    }

    fn error(source: &str) -> LexerError {
        Scanner::new(source).scan_tokens().unwrap_err()
    }

    #[test]
    fn test_punctuation_and_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("(){}[],:; + - * / ! = == != < <= > >="),
            vec![
                LeftParen,
                RightParen,
                LeftBrace,
                RightBrace,
                LeftBracket,
                RightBracket,
                Comma,
                Colon,
                Semicolon,
                Plus,
                Minus,
                Star,
                Slash,
                Bang,
                Equal,
                EqualEqual,
                BangEqual,
                Less,
                LessEqual,
                Greater,
                GreaterEqual,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        use TokenKind::*;
        assert_eq!(
            kinds("let fn return if else true false null and or"),
            vec![
                Let,
                Fn,
                Return,
                If,
                Else,
                BoolLiteral(true),
                BoolLiteral(false),
                Null,
                And,
                Or,
            ]
        );
        assert_eq!(
            kinds("foo _bar baz2 android lets"),
            vec![
                ident("foo"),
                ident("_bar"),
                ident("baz2"),
                ident("android"),
                ident("lets"),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 10.45 007"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(10.45),
                TokenKind::Number(7.0),
            ]
        );
        // `5.` is the number 5 followed by a stray dot
        assert!(matches!(error("5."), LexerError::UnexpectedChar('.', _)));
    }

    #[test]
    fn test_strings() {
        let cases = [
            (r#""hello world""#, "hello world"),
            (r#""""#, ""),
            (r#""a\n\"b\"\\""#, "a\n\"b\"\\"),
            (r#""tab\there\r""#, "tab\there\r"),
        ];
        for (source, expected) in cases {
            assert_eq!(kinds(source), vec![string(expected)], "{}", source);
        }
    }

    #[test]
    fn test_string_errors() {
        assert!(matches!(error("\"oops"), LexerError::UnterminatedString(_)));
        assert!(matches!(error("\"split\nline\""), LexerError::UnterminatedString(_)));
        assert!(matches!(error("\"ends in \\"), LexerError::UnterminatedString(_)));
        assert!(matches!(error(r#""\q""#), LexerError::InvalidEscape('q', _)));
    }

    #[test]
    fn test_comments_are_trivia() {
        assert_eq!(
            kinds("1 // one\n// whole line\n2 // trailing"),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.0)]
        );
        assert_eq!(
            kinds("6 / 2"),
            vec![
                TokenKind::Number(6.0),
                TokenKind::Slash,
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = Scanner::new("let a = 1;\n  a >= 20").scan_tokens().unwrap();
        let positions: Vec<_> = tokens
            .iter()
            .map(|t| (t.span.line, t.span.column, t.span.end - t.span.start))
            .collect();
        assert_eq!(
            positions,
            vec![
                (1, 1, 3),
                (1, 5, 1),
                (1, 7, 1),
                (1, 9, 1),
                (1, 10, 1),
                (2, 3, 1),
                (2, 5, 2),
                (2, 8, 2),
                (2, 10, 0),
            ]
        );
    }

    #[test]
    fn test_unexpected_char_position() {
        match error("let a = @;") {
            LexerError::UnexpectedChar(c, span) => {
                assert_eq!(c, '@');
                assert_eq!((span.line, span.column), (1, 9));
            }
            other => panic!("Expected unexpected char error, got {:?}", other),
        }
    }
}
