use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::SourceLocation;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("int", TokenKind::Int);
        map.insert("void", TokenKind::Void);
        map.insert("return", TokenKind::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Unknown,
    Eof,
    Identifier,
    Number,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    Comma,

    // Reserved
    Fn,
    Int,
    Void,
    Return,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Fn | TokenKind::Int | TokenKind::Void | TokenKind::Return)
    }

    /// Whether tokens of this kind carry their source text.
    pub fn has_value(&self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Number | TokenKind::Unknown)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Eof => "EOF",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Fn => "KEYW_FN",
            TokenKind::Int => "KEYW_INT",
            TokenKind::Void => "KEYW_VOID",
            TokenKind::Return => "KEYW_RETURN",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
    /// Present for identifiers, numbers and unknown bytes only.
    pub value: Option<String>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} ({}) {}:{}", self.kind, value, self.location.line, self.location.column),
            None => write!(f, "{} {}:{}", self.kind, self.location.line, self.location.column),
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}
