//! Go source front end and printer.
//!
//! This module handles:
//! - Parsing Go source with the tree-sitter Go grammar
//! - Extracting the package clause, import declarations and comments
//! - Printing a (possibly mutated) file back to canonical source text

pub mod ast;
pub mod literal;
pub mod parser;
pub mod printer;

pub use ast::{BasicLit, Comment, Ident, ImportDecl, ImportSpec, LitKind, Pos, SourceFile};
pub use parser::parse_file;
pub use printer::print_file;

/// A syntax error with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{filename}:{line}:{column}: {message}")]
pub struct ParseError {
	pub filename: String,
	pub line: usize,
	pub column: usize,
	pub message: String,
}

/// Failure to render a syntax tree back to text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrintError {
	#[error("import at offset {pos} ends at {end}, which does not close its original literal")]
	SpanMismatch { pos: Pos, end: Pos },

	#[error("import declaration at offset {pos} overlaps the preceding one")]
	Overlap { pos: Pos },
}
