//! Lexical analysis module for the compiler.
//!
//! This module contains the scanner that converts a source buffer
//! into a stream of tokens for parsing. It handles:
//!
//! - Recognition of keywords, identifiers, numbers and punctuation
//! - Line/column tracking for error reporting
//! - Line comments and whitespace handling
//! - Unknown bytes, which become `Unknown` tokens for the parser to reject

pub mod lexer;
pub mod tokens;
