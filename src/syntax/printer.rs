//! Render a parsed file back to canonical Go source.
//!
//! Text outside import declarations is copied from the original source.
//! Single-line `import "path"` declarations are spliced: the literal is
//! replaced and copying resumes at the spec's recorded end. Grouped
//! declarations are laid out the way gofmt lays them out: one spec per
//! line, tab indented, trailing comments aligned.
//!
//! All output passes through [`Emitter`], which strips trailing blanks,
//! collapses runs of blank lines and terminates the file with a single
//! newline. Multi-line raw strings are emitted untouched.

use super::PrintError;
use super::ast::{BasicLit, Comment, ImportDecl, ImportSpec, LitKind, Pos, SourceFile, Span};
use super::literal::unquote;

/// Print `file` as Go source text.
pub fn print_file(file: &SourceFile) -> Result<String, PrintError> {
	let mut printer = Printer {
		file,
		out: Emitter::default(),
	};
	printer.print()?;
	Ok(printer.out.finish())
}

struct Printer<'a> {
	file: &'a SourceFile,
	out: Emitter,
}

impl Printer<'_> {
	fn print(&mut self) -> Result<(), PrintError> {
		let file = self.file;
		let mut cursor = 0;
		for decl in &file.imports {
			if decl.pos < cursor {
				return Err(PrintError::Overlap { pos: decl.pos });
			}
			for spec in &decl.specs {
				self.check_span(spec)?;
			}

			match (decl.lparen, decl.rparen) {
				(Some(lparen), Some(rparen)) => {
					self.copy(cursor, decl.pos);
					self.group(decl, lparen, rparen);
					cursor = rparen + 1;
				}
				_ => {
					for spec in &decl.specs {
						self.copy(cursor, spec.path.pos);
						self.literal(&spec.path);
						cursor = spec.end();
					}
				}
			}
		}
		self.copy(cursor, file.source.len());
		Ok(())
	}

	/// The recorded extent of a spec must still cover exactly its original literal.
	fn check_span(&self, spec: &ImportSpec) -> Result<(), PrintError> {
		let (pos, end) = (spec.path.pos, spec.end());
		let original = self.file.source.get(pos..end).unwrap_or_default();
		if unquote(original).is_none() {
			return Err(PrintError::SpanMismatch { pos, end });
		}
		Ok(())
	}

	/// Copy original text, protecting multi-line comments and raw strings.
	fn copy(&mut self, from: Pos, to: Pos) {
		let file = self.file;
		let src = file.source.as_str();
		let mut at = from;

		let raw_strings = file.multiline_raw_strings.iter().map(|span| (*span, false));
		let comments = file
			.comments
			.iter()
			.filter(|comment| comment.is_multiline())
			.map(|comment| {
				let span = Span {
					start: comment.pos,
					end: comment.end(),
				};
				(span, true)
			});
		let mut protected: Vec<(Span, bool)> = raw_strings
			.chain(comments)
			.filter(|(span, _)| span.start >= from && span.end <= to)
			.collect();
		protected.sort_by_key(|(span, _)| span.start);

		for (span, is_comment) in protected {
			self.out.text(&src[at..span.start]);
			let text = &src[span.start..span.end];
			if is_comment {
				self.out.comment(text);
			} else {
				self.out.verbatim(text);
			}
			at = span.end;
		}
		self.out.text(&src[at..to]);
	}

	fn literal(&mut self, lit: &BasicLit) {
		match lit.kind {
			LitKind::RawString => self.out.verbatim(&lit.value),
			LitKind::String => self.out.text(&lit.value),
		}
	}

	fn spec(&mut self, spec: &ImportSpec) {
		if let Some(name) = &spec.name {
			self.out.text(&name.name);
			self.out.text(" ");
		}
		self.literal(&spec.path);
	}

	fn comment(&mut self, comment: &Comment) {
		if comment.is_multiline() {
			self.out.comment(&comment.text);
		} else {
			self.out.text(&comment.text);
		}
	}

	fn group(&mut self, decl: &ImportDecl, lparen: Pos, rparen: Pos) {
		let file = self.file;
		let lparen_line = file.lines.line(lparen);
		let first_spec = decl.specs.first().map_or(rparen, ImportSpec::pos);

		// Comments between `import` and `(`, and those ending the `(` line,
		// stay where they were written.
		let keyword_comments = file
			.comments
			.iter()
			.filter(|comment| comment.pos > decl.pos && comment.end() <= lparen);
		let paren_comments: Vec<&Comment> = file
			.comments
			.iter()
			.filter(|comment| {
				comment.pos > lparen
					&& comment.pos < first_spec
					&& file.lines.line(comment.pos) == lparen_line
			})
			.collect();
		let body_start = paren_comments.last().map_or(lparen + 1, |comment| comment.end());

		let lines = group_lines(file, decl, body_start, rparen);
		let widths = head_widths(&lines);

		self.out.text("import");
		for comment in keyword_comments {
			self.out.text(" ");
			self.comment(comment);
		}
		self.out.text(" (");
		for comment in &paren_comments {
			self.out.text(" ");
			self.comment(comment);
		}
		if lines.is_empty() {
			self.out.text(if paren_comments.is_empty() { ")" } else { "\n)" });
			return;
		}

		for (line, width) in lines.iter().zip(widths) {
			self.out.text(if line.blank_before { "\n\n\t" } else { "\n\t" });
			self.pieces(&line.head);
			if !line.trailing.is_empty() {
				let padding = width.saturating_sub(line.head_width()) + 1;
				self.out.text(&" ".repeat(padding));
				self.pieces(&line.trailing);
			}
		}
		self.out.text("\n)");
	}

	fn pieces(&mut self, pieces: &[Piece<'_>]) {
		for (i, piece) in pieces.iter().enumerate() {
			if i > 0 {
				self.out.text(" ");
			}
			match piece {
				Piece::Spec(spec) => self.spec(spec),
				Piece::Comment(comment) => self.comment(comment),
			}
		}
	}
}

/// Arrange the specs and the comments in `body_start..rparen` of an import
/// group into output lines.
fn group_lines<'f>(
	file: &'f SourceFile,
	decl: &'f ImportDecl,
	body_start: Pos,
	rparen: Pos,
) -> Vec<GroupLine<'f>> {
	let lines = &file.lines;

	let mut items: Vec<(Pos, Pos, Piece<'f>)> = decl
		.specs
		.iter()
		.map(|spec| (spec.pos(), spec.end(), Piece::Spec(spec)))
		.collect();
	items.extend(
		file.comments
			.iter()
			.filter(|comment| comment.pos >= body_start && comment.end() <= rparen)
			.map(|comment| (comment.pos, comment.end(), Piece::Comment(comment))),
	);
	items.sort_by_key(|(pos, _, _)| *pos);

	let mut out: Vec<GroupLine<'f>> = Vec::new();
	let mut prev_end_line: Option<usize> = None;
	for (pos, end, piece) in items {
		let start_line = lines.line(pos);
		let is_spec = matches!(piece, Piece::Spec(_));

		// A second spec on the same source line still gets its own line.
		let joins_current = prev_end_line == Some(start_line)
			&& out.last().is_some_and(|line| !(is_spec && line.has_spec()));
		match out.last_mut() {
			Some(line) if joins_current => {
				if line.has_spec() {
					line.trailing.push(piece);
				} else {
					line.head.push(piece);
				}
			}
			_ => out.push(GroupLine {
				blank_before: prev_end_line.is_some_and(|prev| start_line > prev + 1),
				head: vec![piece],
				trailing: Vec::new(),
			}),
		}
		prev_end_line = Some(lines.line(end - 1));
	}
	out
}

#[derive(Debug, Clone, Copy)]
enum Piece<'a> {
	Spec(&'a ImportSpec),
	Comment(&'a Comment),
}

impl Piece<'_> {
	fn width(&self) -> usize {
		match self {
			Piece::Spec(spec) => {
				let name = spec.name.as_ref().map_or(0, |name| name.name.chars().count() + 1);
				name + spec.path.value.chars().count()
			}
			Piece::Comment(comment) => comment
				.text
				.rsplit('\n')
				.next()
				.unwrap_or_default()
				.chars()
				.count(),
		}
	}
}

/// One output line inside an import group.
#[derive(Debug)]
struct GroupLine<'a> {
	blank_before: bool,
	/// Pieces up to and including the spec.
	head: Vec<Piece<'a>>,
	/// Comments following the spec on the same line.
	trailing: Vec<Piece<'a>>,
}

impl GroupLine<'_> {
	fn has_spec(&self) -> bool {
		self.head.iter().any(|piece| matches!(piece, Piece::Spec(_)))
	}

	fn head_width(&self) -> usize {
		let gaps = self.head.len().saturating_sub(1);
		self.head.iter().map(Piece::width).sum::<usize>() + gaps
	}
}

/// Column width for each line's head, shared by runs of adjacent lines
/// that carry trailing comments.
fn head_widths(lines: &[GroupLine<'_>]) -> Vec<usize> {
	let mut widths = vec![0; lines.len()];
	let mut start = 0;
	while start < lines.len() {
		if lines[start].trailing.is_empty() {
			start += 1;
			continue;
		}
		let mut end = start + 1;
		while end < lines.len() && !lines[end].trailing.is_empty() && !lines[end].blank_before {
			end += 1;
		}
		let width = lines[start..end]
			.iter()
			.map(GroupLine::head_width)
			.max()
			.unwrap_or_default();
		widths[start..end].fill(width);
		start = end;
	}
	widths
}

/// Output buffer applying line-level normalization.
#[derive(Debug, Default)]
struct Emitter {
	out: String,
	/// Blanks seen since the last visible character.
	pending_blanks: String,
	/// Newlines seen since the last visible character.
	pending_newlines: usize,
	started: bool,
}

impl Emitter {
	/// Emit ordinary text: trailing blanks are dropped and at most one
	/// empty line is kept between visible lines.
	fn text(&mut self, s: &str) {
		for c in s.chars() {
			match c {
				'\n' => {
					self.pending_blanks.clear();
					if self.started {
						self.pending_newlines += 1;
					}
				}
				' ' | '\t' | '\r' => self.pending_blanks.push(c),
				c => {
					self.flush();
					self.out.push(c);
				}
			}
		}
	}

	/// Emit a multi-line comment: each line loses its trailing blanks but
	/// the line structure is kept.
	fn comment(&mut self, s: &str) {
		self.flush();
		for (i, line) in s.split('\n').enumerate() {
			if i > 0 {
				self.out.push('\n');
			}
			self.out.push_str(line.trim_end_matches([' ', '\t', '\r']));
		}
	}

	/// Emit text exactly, minus carriage returns.
	fn verbatim(&mut self, s: &str) {
		self.flush();
		self.out.extend(s.chars().filter(|&c| c != '\r'));
	}

	fn flush(&mut self) {
		if self.started {
			let newlines = self.pending_newlines.min(2);
			self.out.extend(std::iter::repeat_n('\n', newlines));
		} else {
			self.pending_blanks.clear();
		}
		self.pending_newlines = 0;
		self.out.push_str(&self.pending_blanks);
		self.pending_blanks.clear();
		self.started = true;
	}

	fn finish(mut self) -> String {
		if self.started {
			self.out.push('\n');
		}
		self.out
	}
}
