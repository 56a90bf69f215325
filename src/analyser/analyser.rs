use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::{
    ast::{
        ast::{Declaration, FunctionDecl, Type, VariableDecl},
        expressions::Expr,
        statements::{Block, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    SourceLocation,
};

use super::{
    resolved_ir::{
        DeclIndex, ResolvedBlock, ResolvedDeclaration, ResolvedExpr, ResolvedFunctionDeclaration,
        ResolvedProgram, ResolvedRef, ResolvedStmt, ResolvedVariableDeclaration,
    },
    scope::{DeclRef, ScopeTree},
};

/// State for one analysis: the scope tree of scope validation and the flat
/// table built by resolution. Dropped (apart from the table) when `analyse`
/// returns.
#[derive(Debug, Default)]
pub struct AnalysisContext<'a> {
    pub scopes: ScopeTree<'a>,
    pub table: ResolvedProgram,
    /// Top-level entries of `table` by id. Parameters are not included.
    pub globals: HashMap<String, DeclIndex>,
    /// Ids of every parameter appended so far, across all functions
    pub parameters: HashSet<String>,
    /// Function being resolved, for error reporting
    pub function: Option<String>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new() -> Self {
        AnalysisContext {
            scopes: ScopeTree::new(),
            table: ResolvedProgram::new(),
            globals: HashMap::new(),
            parameters: HashSet::new(),
            function: None,
        }
    }

    pub fn scope_name(&self) -> &str {
        self.function.as_deref().unwrap_or("global")
    }

    pub fn error(&self, error_impl: ErrorImpl, location: &SourceLocation) -> Error {
        Error::new(error_impl, location.clone()).in_scope(self.scope_name())
    }

    fn duplicate(&self, id: &str, location: &SourceLocation) -> Error {
        self.error(ErrorImpl::DuplicateDeclaration { id: id.to_string() }, location)
    }

    /// Appends a top-level entry. Its id must not be used by any entry
    /// already in the table, parameters included.
    pub fn append_global(&mut self, declaration: ResolvedDeclaration, location: &SourceLocation) -> Result<DeclIndex, Error> {
        let id = declaration.id().to_string();
        if self.globals.contains_key(&id) || self.parameters.contains(&id) {
            return Err(self.duplicate(&id, location));
        }

        let index = self.table.push(declaration);
        debug!("appended global `{}` as entry {}", id, index.0);
        self.globals.insert(id, index);
        Ok(index)
    }

    /// Appends a parameter. Parameters of different functions may share an
    /// id, but none may reuse the id of a top-level entry.
    pub fn append_parameter(&mut self, parameter: ResolvedVariableDeclaration, location: &SourceLocation) -> Result<DeclIndex, Error> {
        if self.globals.contains_key(&parameter.id) {
            return Err(self.duplicate(&parameter.id, location));
        }

        self.parameters.insert(parameter.id.clone());
        let index = self.table.push(ResolvedDeclaration::Variable(parameter));
        debug!("appended parameter as entry {}", index.0);
        Ok(index)
    }
}

// Scope validation

pub fn validate_scopes<'a>(context: &mut AnalysisContext<'a>, declarations: &'a [Declaration]) -> Result<(), Error> {
    context.scopes.enter_scope("global");

    for declaration in declarations {
        match declaration {
            Declaration::Variable(variable) => context.scopes.add_declaration(DeclRef::Variable(variable))?,
            Declaration::Function(function) => validate_function(context, function)?,
        }
    }

    context.scopes.exit_scope();
    Ok(())
}

/// Checks a function in its own scope, then declares it in the enclosing one.
/// The body therefore cannot see the function itself.
pub fn validate_function<'a>(context: &mut AnalysisContext<'a>, function: &'a FunctionDecl) -> Result<(), Error> {
    context.scopes.enter_scope(&function.id);

    for param in &function.params {
        context.scopes.add_declaration(DeclRef::Variable(param))?;
    }

    validate_block(context, &function.body)?;

    context.scopes.exit_scope();
    context.scopes.add_declaration(DeclRef::Function(function))
}

/// Every returned name must be declared in the current scope chain. Call
/// arguments are left to resolution.
pub fn validate_block(context: &AnalysisContext, block: &Block) -> Result<(), Error> {
    for stmt in block.iter() {
        match stmt {
            Stmt::Return(return_stmt) => {
                if let Some(Expr::NameRef(name_ref)) = &return_stmt.value {
                    if context.scopes.find_declaration(&name_ref.name).is_none() {
                        return Err(Error::new(
                            ErrorImpl::UndeclaredReference {
                                name: name_ref.name.clone(),
                            },
                            name_ref.location.clone(),
                        )
                        .in_scope(context.scopes.current_name()));
                    }
                }
            }
        }
    }

    Ok(())
}

// Resolution

pub fn resolve_declarations(context: &mut AnalysisContext, declarations: &[Declaration]) -> Result<(), Error> {
    for declaration in declarations {
        match declaration {
            Declaration::Variable(variable) => {
                let resolved = resolve_variable(context, variable)?;
                context.append_global(ResolvedDeclaration::Variable(resolved), &variable.location)?;
            }
            Declaration::Function(function) => {
                resolve_function(context, function)?;
            }
        }
    }

    Ok(())
}

pub fn resolve_variable(context: &mut AnalysisContext, variable: &VariableDecl) -> Result<ResolvedVariableDeclaration, Error> {
    let value = match &variable.value {
        Some(value) => Some(resolve_expr(context, value)?),
        None => None,
    };

    Ok(ResolvedVariableDeclaration {
        id: variable.id.clone(),
        var_type: variable.var_type,
        value,
    })
}

pub fn resolve_function(context: &mut AnalysisContext, function: &FunctionDecl) -> Result<DeclIndex, Error> {
    context.function = Some(function.id.clone());

    let mut params = Vec::with_capacity(function.params.len());
    for param in &function.params {
        let resolved = resolve_variable(context, param)?;
        params.push(context.append_parameter(resolved, &param.location)?);
    }

    let body = resolve_block(context, &function.body)?;

    if !matches!(function.body.last(), Some(Stmt::Return(_))) {
        return Err(context.error(
            ErrorImpl::MissingReturn {
                function: function.id.clone(),
            },
            &function.body.location,
        ));
    }

    check_return_types(context, function, &body)?;

    let resolved = ResolvedDeclaration::Function(ResolvedFunctionDeclaration {
        id: function.id.clone(),
        params,
        body,
    });

    context.function = None;
    context.append_global(resolved, &function.location)
}

pub fn resolve_block(context: &mut AnalysisContext, block: &Block) -> Result<ResolvedBlock, Error> {
    let mut resolved = ResolvedBlock::default();

    for stmt in block.iter() {
        match stmt {
            Stmt::Return(return_stmt) => {
                let value = match &return_stmt.value {
                    Some(value) => Some(resolve_expr(context, value)?),
                    None => None,
                };
                resolved.stmts.push(ResolvedStmt::Return(value));
            }
        }
    }

    Ok(resolved)
}

/// Binds names against the table as it stands: only entries appended earlier
/// are visible, the newest one winning.
pub fn resolve_expr(context: &mut AnalysisContext, expr: &Expr) -> Result<ResolvedExpr, Error> {
    match expr {
        Expr::IntLiteral(literal) => literal.value.parse::<i64>().map(ResolvedExpr::IntValue).map_err(|_| {
            context.error(
                ErrorImpl::IntegerOutOfRange {
                    literal: literal.value.clone(),
                },
                &literal.location,
            )
        }),
        Expr::NameRef(name_ref) => {
            let Some(target) = context.table.find(&name_ref.name) else {
                return Err(context.error(
                    ErrorImpl::UndeclaredReference {
                        name: name_ref.name.clone(),
                    },
                    &name_ref.location,
                ));
            };

            let mut arguments = Vec::with_capacity(name_ref.arguments.len());
            for argument in &name_ref.arguments {
                arguments.push(resolve_expr(context, argument)?);
            }

            Ok(ResolvedExpr::Ref(ResolvedRef {
                target,
                is_call: name_ref.is_call,
                arguments,
            }))
        }
    }
}

/// A `void` function may only `return` bare; an `int` one must return an
/// `int` value.
fn check_return_types(context: &AnalysisContext, function: &FunctionDecl, body: &ResolvedBlock) -> Result<(), Error> {
    for (stmt, resolved) in function.body.iter().zip(body.stmts.iter()) {
        let (Stmt::Return(return_stmt), ResolvedStmt::Return(value)) = (stmt, resolved);

        let returned = match value {
            Some(value) => context.table.type_of(value).ok_or_else(|| {
                context.error(
                    ErrorImpl::UnresolvableReturnType {
                        function: function.id.clone(),
                    },
                    &return_stmt.location,
                )
            })?,
            None => Type::Void,
        };

        let matches = match function.return_type {
            Type::Void => value.is_none(),
            Type::Int => returned == Type::Int,
        };

        if !matches {
            return Err(context.error(
                ErrorImpl::ReturnTypeMismatch {
                    function: function.id.clone(),
                    returned,
                    declared: function.return_type,
                },
                &return_stmt.location,
            ));
        }
    }

    Ok(())
}

/// Analyses a parsed program: scope validation over the whole declaration
/// list, then resolution and typing into a flat table.
///
/// Fails on the first error. The resulting table must hold exactly one
/// function named `main`.
pub fn analyse(declarations: &[Declaration]) -> Result<ResolvedProgram, Error> {
    let mut context = AnalysisContext::new();

    info!("validating scopes of {} declarations", declarations.len());
    validate_scopes(&mut context, declarations)?;

    info!("resolving {} declarations", declarations.len());
    resolve_declarations(&mut context, declarations)?;

    let found = context.table.functions_named("main").count();
    if found != 1 {
        let location = declarations
            .last()
            .map(|declaration| declaration.location().clone())
            .unwrap_or_else(SourceLocation::null);
        return Err(Error::new(ErrorImpl::MissingMain { found }, location));
    }

    info!("resolved {} table entries", context.table.len());
    Ok(context.table)
}
