//! Semantic analysis module.
//!
//! Analysis runs in two passes over the parsed declarations:
//!
//! - Scope validation builds a tree of lexical scopes and checks that every
//!   returned name is declared in an enclosing scope
//! - Resolution appends each declaration to a flat table, binding references
//!   to earlier entries and checking function return types
//!
//! The resulting `ResolvedProgram` is the only thing that outlives analysis.

pub mod analyser;
pub mod resolved_ir;
pub mod scope;

#[cfg(test)]
mod tests;
