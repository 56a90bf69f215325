//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms the
//! scanner's token stream into a list of declarations. It handles:
//!
//! - Function declarations with parameter lists and return types
//! - Blocks and `return` statements
//! - Integer literals, name references and (nested) calls
//!
//! There is no error recovery: the first token that does not fit the grammar
//! aborts parsing.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
