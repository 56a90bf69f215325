#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::{
    analyser::{analyser::analyse, resolved_ir::ResolvedProgram},
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Scanner,
    parser::parser::parse,
};

pub mod analyser;
pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A point in a source file. Lines start at 1, columns at 0 (the first byte
/// of a line is reported at column 1 once consumed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: Arc<String>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(path: Arc<String>, line: u32, column: u32) -> Self {
        SourceLocation { path, line, column }
    }

    pub fn null() -> Self {
        SourceLocation::new(Arc::new(String::from("<null>")), 0, 0)
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} in {}", self.line, self.column, self.path)
    }
}

/// Runs the whole front end over one source buffer: scan, parse, analyse.
pub fn compile(source: impl Into<Vec<u8>>, path: Option<String>) -> Result<ResolvedProgram, Error> {
    let scanner = Scanner::new(source, path);
    let declarations = parse(scanner)?;
    analyse(&declarations)
}

/// Returns the text of a 1-based line, without its line terminator.
pub fn get_line(source: &str, line: u32) -> &str {
    if line == 0 {
        return "";
    }

    source
        .split('\n')
        .flat_map(|text| text.strip_suffix('\r').unwrap_or(text).split('\r'))
        .nth((line - 1) as usize)
        .unwrap_or("")
}

/// Renders a diagnostic pointing at the error's location.
///
/// ```text
/// Error: UndeclaredReference (`b` is not declared in any enclosing scope)
/// -> final.mc (main)
///   |
/// 1 | fn main(): int { return b }
///   | ------------------------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let location = error.get_location();
    let line_text = get_line(source, location.line);

    let line_string = location.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {} ({})\n", location.path, error.get_scope()));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let line_pos = (location.column as usize).saturating_sub(1);
    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (&string[start..], start)
}
