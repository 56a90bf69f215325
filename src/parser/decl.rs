use log::debug;

use crate::{
    ast::ast::{FunctionDecl, Type, VariableDecl},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{parser::Parser, stmt::parse_block};

const AFTER_FUNCTION_NAME: &[TokenKind] = &[TokenKind::LParen, TokenKind::Colon];
const RETURN_TYPES: &[TokenKind] = &[TokenKind::Int, TokenKind::Void];
const AFTER_PARAMETER: &[TokenKind] = &[TokenKind::Comma, TokenKind::RParen];

/// Parses `'fn' IDENT ParamClause? ':' ReturnTy Block`.
pub fn parse_fn_decl(parser: &mut Parser) -> Result<FunctionDecl, Error> {
    debug!("parse_fn_decl()");

    parser.expect(TokenKind::Fn)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let id = name.value.unwrap_or_default();
    parser.enter_function(&id);

    let kind = parser.current_token_kind();
    if !AFTER_FUNCTION_NAME.contains(&kind) {
        return Err(parser.error(ErrorImpl::UnexpectedTokenSet {
            expected: AFTER_FUNCTION_NAME.to_vec(),
            found: kind,
        }));
    }

    let params = if kind == TokenKind::LParen && id == "main" {
        // `main()` is allowed, but nothing may appear between the parentheses
        parser.advance();
        if parser.current_token_kind() != TokenKind::RParen {
            return Err(parser.error(ErrorImpl::MainHasParameters));
        }
        parser.advance();
        vec![]
    } else if kind == TokenKind::LParen {
        parse_param_list(parser)?
    } else {
        vec![]
    };

    parser.expect(TokenKind::Colon)?;

    let return_type = match parser.expect_one_of(RETURN_TYPES)?.kind {
        TokenKind::Void => Type::Void,
        _ => Type::Int,
    };

    let body = parse_block(parser)?;
    parser.exit_function();

    Ok(FunctionDecl {
        id,
        location: name.location,
        return_type,
        params,
        body,
    })
}

/// Parses `'(' (Param (',' Param)*)? ')'`.
pub fn parse_param_list(parser: &mut Parser) -> Result<Vec<VariableDecl>, Error> {
    debug!("parse_param_list()");

    parser.expect(TokenKind::LParen)?;

    let mut params = Vec::new();
    if parser.current_token_kind() == TokenKind::RParen {
        parser.advance();
        return Ok(params);
    }

    loop {
        params.push(parse_param(parser)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::RParen => {
                parser.advance();
                return Ok(params);
            }
            found => {
                return Err(parser.error(ErrorImpl::MalformedParameterList {
                    expected: AFTER_PARAMETER.to_vec(),
                    found,
                }));
            }
        }
    }
}

/// Parses `IDENT ':' 'int'`.
fn parse_param(parser: &mut Parser) -> Result<VariableDecl, Error> {
    let name = expect_in_param_list(parser, TokenKind::Identifier)?;
    expect_in_param_list(parser, TokenKind::Colon)?;
    expect_in_param_list(parser, TokenKind::Int)?;

    Ok(VariableDecl {
        id: name.value.unwrap_or_default(),
        location: name.location,
        var_type: Type::Int,
        value: None,
    })
}

fn expect_in_param_list(parser: &mut Parser, kind: TokenKind) -> Result<Token, Error> {
    if parser.current_token_kind() == kind {
        Ok(parser.advance())
    } else {
        Err(parser.error(ErrorImpl::MalformedParameterList {
            expected: vec![kind],
            found: parser.current_token_kind(),
        }))
    }
}
