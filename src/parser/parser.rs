//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry point.
//! The parser pulls tokens from the scanner on demand and keeps exactly one
//! token of lookahead. Statements and expressions are dispatched through
//! lookup tables keyed on the lookahead's kind; declarations are parsed by
//! dedicated functions in `decl`.

use std::collections::HashMap;

use log::{debug, info};

use crate::{
    ast::ast::Declaration,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Scanner,
        tokens::{Token, TokenKind},
    },
};

use super::{
    decl::parse_fn_decl,
    lookups::{create_token_lookups, NUDHandler, NUDLookup, StmtHandler, StmtLookup},
};

/// Deepest nesting of call argument lists the parser accepts.
pub const MAX_CALL_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens
    scanner: Scanner,
    /// The single buffered lookahead token
    current: Token,
    /// Name of the function being parsed, for error reporting
    function: Option<String>,
    /// Number of call argument lists currently open
    call_depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for expression handlers, keyed on the first token
    nud_lookup: NUDLookup,
}

impl Parser {
    /// Creates a new Parser and primes the lookahead from `scanner`.
    pub fn new(mut scanner: Scanner) -> Self {
        let current = scanner.next_token();

        Parser {
            scanner,
            current,
            function: None,
            call_depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
        }
    }

    /// Returns the lookahead token without consuming it.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the lookahead token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Consumes the lookahead, refilling it from the scanner, and returns the
    /// consumed token.
    pub fn advance(&mut self) -> Token {
        let next = self.scanner.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Builds an error located at the lookahead token, in the current scope.
    pub fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, self.current.location.clone()).in_scope(self.scope_name())
    }

    /// Consumes a token of the specified kind or fails with the offending token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let kind = self.current_token_kind();
        if kind != expected_kind {
            Err(self.error(ErrorImpl::UnexpectedToken {
                expected: expected_kind,
                found: kind,
            }))
        } else {
            Ok(self.advance())
        }
    }

    /// Consumes a token whose kind is one of `expected_kinds`.
    pub fn expect_one_of(&mut self, expected_kinds: &[TokenKind]) -> Result<Token, Error> {
        if self.current.is_one_of_many(expected_kinds) {
            Ok(self.advance())
        } else {
            Err(self.error(ErrorImpl::UnexpectedTokenSet {
                expected: expected_kinds.to_vec(),
                found: self.current_token_kind(),
            }))
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::Eof
    }

    pub fn enter_function(&mut self, name: &str) {
        self.function = Some(name.to_string());
    }

    pub fn exit_function(&mut self) {
        self.function = None;
    }

    /// Opens a call argument list. Returns false once `MAX_CALL_DEPTH` lists
    /// are already open.
    pub fn enter_call(&mut self) -> bool {
        if self.call_depth >= MAX_CALL_DEPTH {
            return false;
        }
        self.call_depth += 1;
        true
    }

    pub fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// Name of the function being parsed, or `global` between functions.
    pub fn scope_name(&self) -> &str {
        self.function.as_deref().unwrap_or("global")
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers an expression handler for the token that starts it.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for the token that starts it.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a whole program from `scanner`.
///
/// Fails on the first token that does not fit the grammar. A program that
/// parses cleanly but declares no `main` function fails with
/// `MissingEntryPoint`.
pub fn parse(scanner: Scanner) -> Result<Vec<Declaration>, Error> {
    let mut parser = Parser::new(scanner);
    create_token_lookups(&mut parser);

    let mut declarations = vec![];

    while parser.has_tokens() {
        let function = parse_fn_decl(&mut parser)?;
        debug!("parsed function `{}`", function.id);
        declarations.push(Declaration::Function(function));
    }

    let has_entry_point = declarations
        .iter()
        .any(|declaration| matches!(declaration, Declaration::Function(function) if function.is_entry_point()));

    if !has_entry_point {
        return Err(parser.error(ErrorImpl::MissingEntryPoint));
    }

    info!("parsed {} declarations", declarations.len());
    Ok(declarations)
}

/// Scans and parses a source buffer.
pub fn parse_source(source: impl Into<Vec<u8>>, file: Option<String>) -> Result<Vec<Declaration>, Error> {
    parse(Scanner::new(source, file))
}
