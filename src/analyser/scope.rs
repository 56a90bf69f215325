//! Lexical scopes used by scope validation.
//!
//! Scopes live in an arena owned by one `ScopeTree`; parent and child links
//! are indices into it. Declarations are borrowed from the AST being
//! analysed, so the tree cannot outlive it.

use log::debug;

use crate::{
    ast::ast::{DeclKind, FunctionDecl, VariableDecl},
    errors::errors::{Error, ErrorImpl},
    SourceLocation,
};

pub type ScopeId = usize;

/// A declaration visible in a scope.
#[derive(Debug, Clone, Copy)]
pub enum DeclRef<'a> {
    Variable(&'a VariableDecl),
    Function(&'a FunctionDecl),
}

impl<'a> DeclRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            DeclRef::Variable(variable) => &variable.id,
            DeclRef::Function(function) => &function.id,
        }
    }

    pub fn location(&self) -> &'a SourceLocation {
        match self {
            DeclRef::Variable(variable) => &variable.location,
            DeclRef::Function(function) => &function.location,
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            DeclRef::Variable(_) => DeclKind::Variable,
            DeclRef::Function(_) => DeclKind::Function,
        }
    }
}

#[derive(Debug)]
pub struct Scope<'a> {
    pub name: String,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// Unique by id
    pub declarations: Vec<DeclRef<'a>>,
}

impl<'a> Scope<'a> {
    pub fn get_declaration(&self, id: &str) -> Option<DeclRef<'a>> {
        self.declarations.iter().find(|declaration| declaration.id() == id).copied()
    }
}

#[derive(Debug, Default)]
pub struct ScopeTree<'a> {
    scopes: Vec<Scope<'a>>,
    current: Option<ScopeId>,
}

impl<'a> ScopeTree<'a> {
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![],
            current: None,
        }
    }

    /// Opens a child of the current scope (or a root, if there is none) and
    /// makes it current.
    pub fn enter_scope(&mut self, name: &str) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            name: name.to_string(),
            parent: self.current,
            children: vec![],
            declarations: vec![],
        });

        if let Some(parent) = self.current {
            self.scopes[parent].children.push(id);
        }

        debug!("entered scope `{}`", name);
        self.current = Some(id);
        id
    }

    /// Makes the parent of the current scope current again.
    pub fn exit_scope(&mut self) {
        if let Some(current) = self.current {
            debug!("left scope `{}`", self.scopes[current].name);
            self.current = self.scopes[current].parent;
        }
    }

    pub fn current(&self) -> Option<&Scope<'a>> {
        self.current.map(|id| &self.scopes[id])
    }

    pub fn current_name(&self) -> &str {
        self.current().map(|scope| scope.name.as_str()).unwrap_or("global")
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope<'a>> {
        self.scopes.get(id)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Adds a declaration to the current scope, failing if the id is already
    /// declared there. A `global` root is opened if no scope is open yet.
    pub fn add_declaration(&mut self, declaration: DeclRef<'a>) -> Result<(), Error> {
        let current = match self.current {
            Some(current) => current,
            None => self.enter_scope("global"),
        };
        let scope_name = self.scopes[current].name.clone();

        let scope = &mut self.scopes[current];
        if scope.get_declaration(declaration.id()).is_some() {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    id: declaration.id().to_string(),
                },
                declaration.location().clone(),
            )
            .in_scope(scope_name));
        }

        debug!("declared {} `{}` in `{}`", declaration.kind(), declaration.id(), scope_name);
        scope.declarations.push(declaration);
        Ok(())
    }

    /// Looks `id` up in the current scope, then each enclosing scope in turn.
    pub fn find_declaration(&self, id: &str) -> Option<DeclRef<'a>> {
        let mut scope = self.current;

        while let Some(scope_id) = scope {
            let candidate = &self.scopes[scope_id];
            if let Some(declaration) = candidate.get_declaration(id) {
                return Some(declaration);
            }
            scope = candidate.parent;
        }

        None
    }
}
