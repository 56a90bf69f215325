//! Indented textual rendering of the AST, used by `--emit ast` and golden tests.
//!
//! ```text
//! Function returnParam(a: int): int:
//!   Block:
//!     Return a
//! ```

use super::{
    ast::{Declaration, FunctionDecl, VariableDecl},
    expressions::Expr,
    statements::{Block, Stmt},
};

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

impl Expr {
    pub fn render(&self) -> String {
        match self {
            Expr::IntLiteral(literal) => literal.value.clone(),
            Expr::NameRef(name_ref) if name_ref.is_call => {
                let arguments: Vec<String> = name_ref.arguments.iter().map(Expr::render).collect();
                format!("Call {}({})", name_ref.name, arguments.join(", "))
            }
            Expr::NameRef(name_ref) => name_ref.name.clone(),
        }
    }
}

impl Stmt {
    pub fn render(&self, level: usize) -> String {
        match self {
            Stmt::Return(return_stmt) => match &return_stmt.value {
                Some(value) => format!("{}Return {}", indent(level), value.render()),
                None => format!("{}Return", indent(level)),
            },
        }
    }
}

impl Block {
    pub fn render(&self, level: usize) -> String {
        let mut out = format!("{}Block:\n", indent(level));
        for stmt in self.iter() {
            out.push_str(&stmt.render(level + 1));
            out.push('\n');
        }
        out
    }
}

impl VariableDecl {
    pub fn render(&self, level: usize) -> String {
        match &self.value {
            Some(value) => format!("{}Variable {} {} = {}\n", indent(level), self.id, self.var_type, value.render()),
            None => format!("{}Variable {} {}\n", indent(level), self.id, self.var_type),
        }
    }
}

impl FunctionDecl {
    pub fn render(&self, level: usize) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|param| format!("{}: {}", param.id, param.var_type))
            .collect();

        format!(
            "{}Function {}({}): {}:\n{}",
            indent(level),
            self.id,
            params.join(", "),
            self.return_type,
            self.body.render(level + 1)
        )
    }
}

impl Declaration {
    pub fn render(&self, level: usize) -> String {
        match self {
            Declaration::Variable(variable) => variable.render(level),
            Declaration::Function(function) => function.render(level),
        }
    }
}

/// Renders a whole declaration list, one declaration after another.
pub fn render_declarations(declarations: &[Declaration]) -> String {
    declarations.iter().map(|declaration| declaration.render(0)).collect()
}
