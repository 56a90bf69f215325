use std::fmt::Display;

use thiserror::Error;

use crate::{ast::ast::Type, lexer::tokens::TokenKind, SourceLocation};

/// A terminal failure of one compilation, with the location it was detected at
/// and the name of the scope (or function) that was being processed.
#[derive(Debug, Clone, Error)]
#[error("{internal_error} at {location} ({scope})")]
pub struct Error {
    internal_error: ErrorImpl,
    location: SourceLocation,
    scope: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: SourceLocation) -> Self {
        Error {
            internal_error: error_impl,
            location,
            scope: String::from("global"),
        }
    }

    /// Attaches the name of the enclosing scope or function.
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn get_scope(&self) -> &str {
        &self.scope
    }

    pub fn get_category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenSet { .. }
            | ErrorImpl::MalformedParameterList { .. }
            | ErrorImpl::MalformedArgumentList { .. }
            | ErrorImpl::MainHasParameters
            | ErrorImpl::MissingEntryPoint => ErrorCategory::Parse,
            ErrorImpl::DuplicateDeclaration { .. } | ErrorImpl::UndeclaredReference { .. } => {
                ErrorCategory::Scope
            }
            ErrorImpl::ReturnTypeMismatch { .. }
            | ErrorImpl::MissingReturn { .. }
            | ErrorImpl::MissingMain { .. }
            | ErrorImpl::UnresolvableReturnType { .. } => ErrorCategory::Type,
            ErrorImpl::IntegerOutOfRange { .. } => ErrorCategory::Literal,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenSet { .. } => "UnexpectedTokenSet",
            ErrorImpl::MalformedParameterList { .. } => "MalformedParameterList",
            ErrorImpl::MalformedArgumentList { .. } => "MalformedArgumentList",
            ErrorImpl::MainHasParameters => "MainHasParameters",
            ErrorImpl::MissingEntryPoint => "MissingEntryPoint",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredReference { .. } => "UndeclaredReference",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::MissingMain { .. } => "MissingMain",
            ErrorImpl::UnresolvableReturnType { .. } => "UnresolvableReturnType",
            ErrorImpl::IntegerOutOfRange { .. } => "IntegerOutOfRange",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } | ErrorImpl::UnexpectedTokenSet { .. } => {
                ErrorTip::None
            }
            ErrorImpl::MalformedParameterList { .. } => ErrorTip::Suggestion(String::from(
                "parameters are written as `name: int`, separated by commas",
            )),
            ErrorImpl::MalformedArgumentList { .. } => ErrorTip::Suggestion(String::from(
                "call arguments are numbers or names, separated by commas",
            )),
            ErrorImpl::MainHasParameters => ErrorTip::Suggestion(String::from(
                "`main` takes no parameters, write `fn main(): ...`",
            )),
            ErrorImpl::MissingEntryPoint => {
                ErrorTip::Suggestion(String::from("declare a function named `main`"))
            }
            ErrorImpl::DuplicateDeclaration { id } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", id))
            }
            ErrorImpl::UndeclaredReference { name } => ErrorTip::Suggestion(format!(
                "`{}` is not declared in any enclosing scope",
                name
            )),
            ErrorImpl::ReturnTypeMismatch { declared, .. } => ErrorTip::Suggestion(match declared {
                Type::Void => String::from("a `void` function must use a bare `return`"),
                Type::Int => String::from("an `int` function must return an `int` value"),
            }),
            ErrorImpl::MissingReturn { function } => ErrorTip::Suggestion(format!(
                "the body of `{}` must end with a `return`",
                function
            )),
            ErrorImpl::MissingMain { .. } => {
                ErrorTip::Suggestion(String::from("declare exactly one function named `main`"))
            }
            ErrorImpl::UnresolvableReturnType { .. } => ErrorTip::None,
            ErrorImpl::IntegerOutOfRange { literal } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                literal
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Scope,
    Type,
    Literal,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Lists token kinds as `A, B, C` for error messages.
pub struct KindList<'a>(pub &'a [TokenKind]);

impl Display for KindList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected token type {expected}, got {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("expected token type in [{}], got {found}", KindList(.expected))]
    UnexpectedTokenSet { expected: Vec<TokenKind>, found: TokenKind },
    #[error("malformed parameter list: expected [{}], got {found}", KindList(.expected))]
    MalformedParameterList { expected: Vec<TokenKind>, found: TokenKind },
    #[error("malformed argument list: expected [{}], got {found}", KindList(.expected))]
    MalformedArgumentList { expected: Vec<TokenKind>, found: TokenKind },
    #[error("function `main` may not declare parameters")]
    MainHasParameters,
    #[error("no `main` function declared")]
    MissingEntryPoint,
    #[error("duplicate declaration of {id}")]
    DuplicateDeclaration { id: String },
    #[error("undeclared variable {name}")]
    UndeclaredReference { name: String },
    #[error("function `{function}` returns {returned} but declared as {declared}")]
    ReturnTypeMismatch { function: String, returned: Type, declared: Type },
    #[error("function `{function}` does not end with a return statement")]
    MissingReturn { function: String },
    #[error("expected exactly one `main` function, found {found}")]
    MissingMain { found: usize },
    #[error("return type of `{function}` cannot be determined")]
    UnresolvableReturnType { function: String },
    #[error("integer literal {literal} does not fit in 64 bits")]
    IntegerOutOfRange { literal: String },
}
