use log::debug;

use crate::{
    ast::expressions::{Expr, IntLiteralExpr, NameRefExpr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Tokens that can start an expression.
pub const EXPR_START: &[TokenKind] = &[TokenKind::Number, TokenKind::Identifier];

const FIRST_ARGUMENT: &[TokenKind] = &[TokenKind::RParen, TokenKind::Number, TokenKind::Identifier];
const AFTER_ARGUMENT: &[TokenKind] = &[TokenKind::Comma, TokenKind::RParen];

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    debug!("parse_expr()");

    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.error(ErrorImpl::UnexpectedTokenSet {
            expected: EXPR_START.to_vec(),
            found: token_kind,
        }));
    };

    handler(parser)
}

pub fn parse_int_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Number)?;

    Ok(Expr::IntLiteral(IntLiteralExpr {
        value: token.value.unwrap_or_default(),
        location: token.location,
    }))
}

pub fn parse_name_ref_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    let is_call = parser.current_token_kind() == TokenKind::LParen;
    let arguments = if is_call {
        parser.advance();
        if !parser.enter_call() {
            return Err(parser.error(ErrorImpl::MalformedArgumentList {
                expected: vec![TokenKind::RParen],
                found: parser.current_token_kind(),
            }));
        }
        let arguments = parse_call_arguments(parser);
        parser.exit_call();
        arguments?
    } else {
        vec![]
    };

    Ok(Expr::NameRef(NameRefExpr {
        name: token.value.unwrap_or_default(),
        is_call,
        arguments,
        location: token.location,
    }))
}

/// Parses `(Expr (',' Expr)*)? ')'`, the opening parenthesis already consumed.
fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    debug!("parse_call_arguments()");

    let mut arguments = vec![];
    if parser.current_token_kind() == TokenKind::RParen {
        parser.advance();
        return Ok(arguments);
    }

    let mut expected = FIRST_ARGUMENT;
    loop {
        let kind = parser.current_token_kind();
        if !EXPR_START.contains(&kind) {
            return Err(parser.error(ErrorImpl::MalformedArgumentList {
                expected: expected.to_vec(),
                found: kind,
            }));
        }

        arguments.push(parse_expr(parser)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
                expected = EXPR_START;
            }
            TokenKind::RParen => {
                parser.advance();
                return Ok(arguments);
            }
            found => {
                return Err(parser.error(ErrorImpl::MalformedArgumentList {
                    expected: AFTER_ARGUMENT.to_vec(),
                    found,
                }));
            }
        }
    }
}
