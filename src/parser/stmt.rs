use log::debug;

use crate::{
    ast::statements::{Block, ReturnStmt, Stmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expr, EXPR_START},
    parser::Parser,
};

const BLOCK_CONTENT: &[TokenKind] = &[TokenKind::Return, TokenKind::RBrace];
const RETURN_VALUE: &[TokenKind] = &[TokenKind::Number, TokenKind::Identifier, TokenKind::RBrace];

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();

    match parser.get_stmt_lookup().get(&kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.error(ErrorImpl::UnexpectedTokenSet {
            expected: BLOCK_CONTENT.to_vec(),
            found: kind,
        })),
    }
}

/// Parses `'{' Return? '}'`.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    debug!("parse_block()");

    let start = parser.expect(TokenKind::LBrace)?;

    let mut stmts = Vec::new();
    if parser.current_token_kind() != TokenKind::RBrace {
        stmts.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::RBrace)?;

    Ok(Block {
        stmts,
        location: start.location,
    })
}

/// Parses `'return' Expr?`. Whatever follows the expression up to the
/// closing brace of the block is skipped.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    debug!("parse_return_stmt()");

    let start = parser.expect(TokenKind::Return)?;

    let kind = parser.current_token_kind();
    if kind == TokenKind::RBrace {
        return Ok(Stmt::Return(ReturnStmt {
            value: None,
            location: start.location,
        }));
    }

    if !EXPR_START.contains(&kind) {
        return Err(parser.error(ErrorImpl::UnexpectedTokenSet {
            expected: RETURN_VALUE.to_vec(),
            found: kind,
        }));
    }

    let value = parse_expr(parser)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::RBrace => break,
            found @ (TokenKind::Eof | TokenKind::Unknown) => {
                return Err(parser.error(ErrorImpl::UnexpectedToken {
                    expected: TokenKind::RBrace,
                    found,
                }));
            }
            _ => {
                let skipped = parser.advance();
                debug!("skipping {} after return value", skipped);
            }
        }
    }

    Ok(Stmt::Return(ReturnStmt {
        value: Some(value),
        location: start.location,
    }))
}
