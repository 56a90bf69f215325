/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Declarations and the builtin types
/// - expressions: Integer literals and name references
/// - statements: Blocks and statements
/// - printer: Indented textual rendering of declarations
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
