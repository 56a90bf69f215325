use std::fmt::Display;

use crate::SourceLocation;

use super::{expressions::Expr, statements::Block};

/// Builtin types. `int` is the only value type; `void` only appears as a
/// function return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Void,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Void => write!(f, "void"),
        }
    }
}

/// Declaration Kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Variable,
}

impl Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclKind::Function => write!(f, "Function"),
            DeclKind::Variable => write!(f, "Variable"),
        }
    }
}

/// A named program entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VariableDecl),
    Function(FunctionDecl),
}

impl Declaration {
    pub fn id(&self) -> &str {
        match self {
            Declaration::Variable(variable) => &variable.id,
            Declaration::Function(function) => &function.id,
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            Declaration::Variable(variable) => &variable.location,
            Declaration::Function(function) => &function.location,
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Variable(_) => DeclKind::Variable,
            Declaration::Function(_) => DeclKind::Function,
        }
    }
}

/// A variable or a function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub id: String,
    pub location: SourceLocation,
    pub var_type: Type,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub id: String,
    pub location: SourceLocation,
    pub return_type: Type,
    pub params: Vec<VariableDecl>,
    pub body: Block,
}

impl FunctionDecl {
    pub fn is_entry_point(&self) -> bool {
        self.id == "main"
    }
}
