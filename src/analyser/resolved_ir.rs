//! Resolved intermediate representation produced by analysis.
//!
//! The IR is one flat, insertion-ordered table of declarations. Every name
//! reference has been replaced by the index of the table entry it binds to,
//! and entries only ever refer to entries appended before them. Function
//! return types are not stored; they are recomputed from the final statement
//! of the function's body when needed.

use crate::ast::ast::{DeclKind, Type};

/// Index of an entry in a `ResolvedProgram`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclIndex(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedDeclaration {
    Variable(ResolvedVariableDeclaration),
    Function(ResolvedFunctionDeclaration),
}

impl ResolvedDeclaration {
    pub fn id(&self) -> &str {
        match self {
            ResolvedDeclaration::Variable(variable) => &variable.id,
            ResolvedDeclaration::Function(function) => &function.id,
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            ResolvedDeclaration::Variable(_) => DeclKind::Variable,
            ResolvedDeclaration::Function(_) => DeclKind::Function,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariableDeclaration {
    pub id: String,
    pub var_type: Type,
    pub value: Option<ResolvedExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFunctionDeclaration {
    pub id: String,
    /// Parameters are table entries of their own, appended just before the body
    pub params: Vec<DeclIndex>,
    pub body: ResolvedBlock,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedBlock {
    pub stmts: Vec<ResolvedStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedStmt {
    Return(Option<ResolvedExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedExpr {
    IntValue(i64),
    Ref(ResolvedRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRef {
    pub target: DeclIndex,
    pub is_call: bool,
    pub arguments: Vec<ResolvedExpr>,
}

/// The flat, append-only declaration table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedProgram {
    declarations: Vec<ResolvedDeclaration>,
}

impl ResolvedProgram {
    pub fn new() -> Self {
        ResolvedProgram {
            declarations: vec![],
        }
    }

    pub fn push(&mut self, declaration: ResolvedDeclaration) -> DeclIndex {
        self.declarations.push(declaration);
        DeclIndex(self.declarations.len() - 1)
    }

    pub fn get(&self, index: DeclIndex) -> Option<&ResolvedDeclaration> {
        self.declarations.get(index.0)
    }

    pub fn declarations(&self) -> &[ResolvedDeclaration] {
        &self.declarations
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclIndex, &ResolvedDeclaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(index, declaration)| (DeclIndex(index), declaration))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Finds the most recently appended entry named `id`.
    pub fn find(&self, id: &str) -> Option<DeclIndex> {
        self.declarations
            .iter()
            .rposition(|declaration| declaration.id() == id)
            .map(DeclIndex)
    }

    pub fn functions_named<'a>(&'a self, id: &'a str) -> impl Iterator<Item = (DeclIndex, &'a ResolvedFunctionDeclaration)> + 'a {
        self.iter().filter_map(move |(index, declaration)| match declaration {
            ResolvedDeclaration::Function(function) if function.id == id => Some((index, function)),
            _ => None,
        })
    }

    /// The entry point, if exactly one function is named `main`.
    pub fn main(&self) -> Option<DeclIndex> {
        let mut mains = self.functions_named("main");
        match (mains.next(), mains.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }

    /// Type of an expression. `None` if it refers outside the table or
    /// inference follows more calls than the table has entries, which only
    /// happens when references form a cycle.
    pub fn type_of(&self, expr: &ResolvedExpr) -> Option<Type> {
        self.expr_type(expr, 0)
    }

    /// What a function returns, taken from the final statement of its body.
    pub fn return_type_of(&self, function: &ResolvedFunctionDeclaration) -> Option<Type> {
        self.function_type(function, 0)
    }

    fn expr_type(&self, expr: &ResolvedExpr, depth: usize) -> Option<Type> {
        match expr {
            ResolvedExpr::IntValue(_) => Some(Type::Int),
            ResolvedExpr::Ref(reference) => match self.get(reference.target)? {
                ResolvedDeclaration::Variable(variable) => Some(variable.var_type),
                ResolvedDeclaration::Function(function) => self.function_type(function, depth + 1),
            },
        }
    }

    fn function_type(&self, function: &ResolvedFunctionDeclaration, depth: usize) -> Option<Type> {
        if depth > self.declarations.len() {
            return None;
        }

        match function.body.stmts.last() {
            Some(ResolvedStmt::Return(Some(value))) => self.expr_type(value, depth),
            _ => Some(Type::Void),
        }
    }

    fn render_expr(&self, expr: &ResolvedExpr) -> String {
        match expr {
            ResolvedExpr::IntValue(value) => value.to_string(),
            ResolvedExpr::Ref(reference) => {
                let name = self.get(reference.target).map(ResolvedDeclaration::id).unwrap_or("?");
                if reference.is_call {
                    let arguments: Vec<String> = reference.arguments.iter().map(|argument| self.render_expr(argument)).collect();
                    format!("Call &{}({})", name, arguments.join(", "))
                } else {
                    format!("&{}", name)
                }
            }
        }
    }

    /// Renders the table, one entry per line, with function bodies indented.
    ///
    /// ```text
    /// Variable a int
    /// Function returnParam(&a):
    ///   Return &a
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();

        for declaration in &self.declarations {
            match declaration {
                ResolvedDeclaration::Variable(variable) => match &variable.value {
                    Some(value) => out.push_str(&format!("Variable {} {} = {}\n", variable.id, variable.var_type, self.render_expr(value))),
                    None => out.push_str(&format!("Variable {} {}\n", variable.id, variable.var_type)),
                },
                ResolvedDeclaration::Function(function) => {
                    let params: Vec<String> = function
                        .params
                        .iter()
                        .map(|param| format!("&{}", self.get(*param).map(ResolvedDeclaration::id).unwrap_or("?")))
                        .collect();
                    out.push_str(&format!("Function {}({}):\n", function.id, params.join(", ")));

                    for stmt in &function.body.stmts {
                        match stmt {
                            ResolvedStmt::Return(Some(value)) => out.push_str(&format!("  Return {}\n", self.render_expr(value))),
                            ResolvedStmt::Return(None) => out.push_str("  Return\n"),
                        }
                    }
                }
            }
        }

        out
    }
}
