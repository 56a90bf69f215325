use crate::SourceLocation;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLiteral(IntLiteralExpr),
    NameRef(NameRefExpr),
}

impl Expr {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expr::IntLiteral(literal) => &literal.location,
            Expr::NameRef(name_ref) => &name_ref.location,
        }
    }
}

/// An integer literal, kept as source text until resolution checks its range.
#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteralExpr {
    pub value: String,
    pub location: SourceLocation,
}

/// A reference to a declaration by name. `arguments` is only populated when
/// `is_call` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct NameRefExpr {
    pub name: String,
    pub is_call: bool,
    pub arguments: Vec<Expr>,
    pub location: SourceLocation,
}
