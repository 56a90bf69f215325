//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source location and enclosing scope
//! - Specific error variants for parsing, scoping, typing and literals
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
