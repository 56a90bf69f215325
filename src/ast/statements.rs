use std::slice::Iter;

use crate::SourceLocation;

use super::expressions::Expr;

/// An ordered sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub location: SourceLocation,
}

impl Block {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.stmts.iter()
    }

    pub fn last(&self) -> Option<&Stmt> {
        self.stmts.last()
    }
}

/// Statement variants. `return` is the only statement the language has.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Return(ReturnStmt),
}

impl Stmt {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::Return(return_stmt) => &return_stmt.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub location: SourceLocation,
}
