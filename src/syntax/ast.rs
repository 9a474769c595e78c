//! Syntax tree for the parts of a Go file the rewriter touches.

use super::literal;

/// Byte offset into the original source text.
pub type Pos = usize;

/// Half-open byte range in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	pub start: Pos,
	pub end: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
	pub name: String,
	pub pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
	String,
	RawString,
}

/// A string literal exactly as written, quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
	pub kind: LitKind,
	pub value: String,
	pub pos: Pos,
}

impl BasicLit {
	/// End position derived from the literal's current text.
	pub fn end(&self) -> Pos {
		self.pos + self.value.len()
	}
}

/// A single `[name] "path"` entry of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
	/// Local package name, `.` or `_`.
	pub name: Option<Ident>,
	pub path: BasicLit,
	/// Explicit end of the spec; overrides the length-derived end when set.
	pub end_pos: Option<Pos>,
}

impl ImportSpec {
	pub fn pos(&self) -> Pos {
		self.name.as_ref().map_or(self.path.pos, |name| name.pos)
	}

	pub fn end(&self) -> Pos {
		self.end_pos.unwrap_or_else(|| self.path.end())
	}

	/// The unquoted import path, or `None` if the literal is not properly quoted.
	pub fn import_path(&self) -> Option<String> {
		literal::unquote(&self.path.value)
	}
}

/// `import "path"` or `import ( ... )`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
	/// Position of the `import` keyword.
	pub pos: Pos,
	pub lparen: Option<Pos>,
	pub rparen: Option<Pos>,
	pub specs: Vec<ImportSpec>,
}

/// A `//` or `/* */` comment, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
	pub text: String,
	pub pos: Pos,
}

impl Comment {
	pub fn end(&self) -> Pos {
		self.pos + self.text.len()
	}

	pub fn is_multiline(&self) -> bool {
		self.text.contains('\n')
	}
}

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
	starts: Vec<Pos>,
}

impl LineTable {
	pub fn new(src: &str) -> Self {
		let mut starts = vec![0];
		starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
		Self { starts }
	}

	pub fn line(&self, pos: Pos) -> usize {
		self.starts.partition_point(|&start| start <= pos)
	}
}

/// One parsed Go source file.
///
/// Everything outside the import declarations is kept as original text;
/// the printer copies it through unchanged apart from whitespace
/// normalization.
#[derive(Debug, Clone)]
pub struct SourceFile {
	/// Name used in diagnostics.
	pub name: String,
	pub package: Ident,
	/// Import declarations in source order.
	pub imports: Vec<ImportDecl>,
	/// All comments in source order.
	pub comments: Vec<Comment>,
	pub(crate) source: String,
	pub(crate) lines: LineTable,
	/// Raw string literals spanning several lines.
	pub(crate) multiline_raw_strings: Vec<Span>,
}

impl SourceFile {
	/// Every import spec in file order.
	pub fn import_specs(&self) -> impl Iterator<Item = &ImportSpec> {
		self.imports.iter().flat_map(|decl| decl.specs.iter())
	}

	pub fn import_specs_mut(&mut self) -> impl Iterator<Item = &mut ImportSpec> {
		self.imports.iter_mut().flat_map(|decl| decl.specs.iter_mut())
	}
}
