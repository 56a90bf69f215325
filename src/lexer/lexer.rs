use std::sync::Arc;

use lazy_static::lazy_static;
use log::trace;
use regex::bytes::Regex;

use crate::{SourceLocation, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

lazy_static! {
    static ref WORD_PATTERN: Regex = Regex::new("^[a-zA-Z][a-zA-Z0-9]*").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Turns a byte buffer into a forward-only stream of tokens.
///
/// The scanner never fails: bytes it cannot classify come out as
/// `TokenKind::Unknown` tokens and are rejected by the parser.
#[derive(Clone)]
pub struct Scanner {
    source: Vec<u8>,
    pos: usize,
    line: u32,
    column: u32,
    file: Arc<String>,
}

impl Scanner {
    pub fn new(source: impl Into<Vec<u8>>, file: Option<String>) -> Scanner {
        let file_name = if let Some(file) = file {
            Arc::new(file)
        } else {
            Arc::new(String::from("shell"))
        };

        Scanner {
            source: source.into(),
            pos: 0,
            line: 1,
            column: 0,
            file: file_name,
        }
    }

    /// Looks at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_second(&self) -> Option<u8> {
        self.source.get(self.pos + 1).copied()
    }

    /// Consumes one byte, keeping line and column in step. `\n`, `\r` and
    /// `\r\n` each end a line.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;

        match byte {
            b'\n' => {
                self.line += 1;
                self.column = 0;
            }
            b'\r' if self.peek_second() == Some(b'\n') => {}
            b'\r' => {
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += 1,
        }

        self.pos += 1;
        Some(byte)
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(Arc::clone(&self.file), self.line, self.column)
    }

    pub fn file(&self) -> Arc<String> {
        Arc::clone(&self.file)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.advance();
        }
    }

    // Leaves the terminating newline for `skip_whitespace`.
    fn skip_comment(&mut self) {
        while self.peek().is_some_and(|byte| byte != b'\n' && byte != b'\r') {
            self.advance();
        }
    }

    /// Returns the next token. Once the input is exhausted every call yields
    /// an EOF token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            if self.peek() == Some(b'/') && self.peek_second() == Some(b'/') {
                self.skip_comment();
                continue;
            }

            break;
        }

        let start = self.pos;
        let Some(byte) = self.advance() else {
            let token = MK_TOKEN!(TokenKind::Eof, self.location());
            trace!("scanned {}", token);
            return token;
        };
        let location = self.location();

        let token = match byte {
            b'{' => MK_TOKEN!(TokenKind::LBrace, location),
            b'}' => MK_TOKEN!(TokenKind::RBrace, location),
            b'(' => MK_TOKEN!(TokenKind::LParen, location),
            b')' => MK_TOKEN!(TokenKind::RParen, location),
            b':' => MK_TOKEN!(TokenKind::Colon, location),
            b',' => MK_TOKEN!(TokenKind::Comma, location),
            b'a'..=b'z' | b'A'..=b'Z' => self.word(start, location),
            b'0'..=b'9' => self.number(start, location),
            _ => MK_TOKEN!(TokenKind::Unknown, location, (byte as char).to_string()),
        };

        trace!("scanned {}", token);
        token
    }

    /// Consumes the rest of the run matched by `pattern` starting at `start`,
    /// whose first byte has already been consumed.
    fn consume_run(&mut self, pattern: &Regex, start: usize) -> String {
        let length = pattern
            .find(&self.source[start..])
            .map(|matched| matched.end())
            .unwrap_or(1);

        self.advance_n(length - 1);
        String::from_utf8_lossy(&self.source[start..start + length]).into_owned()
    }

    fn word(&mut self, start: usize, location: SourceLocation) -> Token {
        let value = self.consume_run(&WORD_PATTERN, start);

        if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
            MK_TOKEN!(*kind, location)
        } else {
            MK_TOKEN!(TokenKind::Identifier, location, value)
        }
    }

    fn number(&mut self, start: usize, location: SourceLocation) -> Token {
        let value = self.consume_run(&NUMBER_PATTERN, start);
        MK_TOKEN!(TokenKind::Number, location, value)
    }
}

/// Scans a whole buffer, including the final EOF token.
pub fn tokenize(source: impl Into<Vec<u8>>, file: Option<String>) -> Vec<Token> {
    let mut scanner = Scanner::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = scanner.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
