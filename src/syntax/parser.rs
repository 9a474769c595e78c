use tree_sitter::{Node, Parser, Point, Range, Tree};

use super::ParseError;
use super::ast::{
	BasicLit, Comment, Ident, ImportDecl, ImportSpec, LineTable, LitKind, SourceFile, Span,
};
use super::literal::is_valid_import;

const BOM: &str = "\u{feff}";

/// Parse a Go source file.
///
/// The whole file is parsed with the tree-sitter Go grammar and any syntax
/// error is reported. On top of the grammar, the checks Go's own parser
/// makes at the top level are applied: a leading package clause, imports
/// before other declarations, and no statements outside functions.
pub fn parse_file(filename: &str, source: &str) -> Result<SourceFile, ParseError> {
	let tree = parse_tree(filename, source)?;
	let root = tree.root_node();

	let parser = FileParser { filename, src: source };
	if let Some(node) = first_error(root) {
		return Err(parser.syntax_error(node));
	}

	let (package, imports) = parser.top_level(root)?;
	let (comments, multiline_raw_strings) = parser.collect_extras(root);

	Ok(SourceFile {
		name: filename.to_string(),
		package,
		imports,
		comments,
		source: source.to_string(),
		lines: LineTable::new(source),
		multiline_raw_strings,
	})
}

fn parse_tree(filename: &str, source: &str) -> Result<Tree, ParseError> {
	let mut parser = Parser::new();
	parser
		.set_language(&tree_sitter_go::LANGUAGE.into())
		.map_err(|err| {
			error_at(filename, Point::default(), format!("cannot load Go grammar: {err}"))
		})?;

	// Keep offsets relative to the original text by excluding the BOM
	// rather than stripping it.
	if source.starts_with(BOM) {
		let start = Point {
			row: 0,
			column: BOM.len(),
		};
		let body = Range {
			start_byte: BOM.len(),
			end_byte: usize::MAX,
			start_point: start,
			end_point: Point {
				row: usize::MAX,
				column: usize::MAX,
			},
		};
		parser
			.set_included_ranges(&[body])
			.map_err(|_| error_at(filename, start, "invalid byte order mark".to_string()))?;
	}

	parser
		.parse(source, None)
		.ok_or_else(|| {
			error_at(filename, Point::default(), "parsing was cancelled".to_string())
		})
}

fn error_at(filename: &str, point: Point, message: String) -> ParseError {
	ParseError {
		filename: filename.to_string(),
		line: point.row + 1,
		column: point.column + 1,
		message,
	}
}

/// The first `ERROR` or missing node in source order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
	if node.is_error() || node.is_missing() {
		return Some(node);
	}
	if !node.has_error() {
		return None;
	}
	let mut cursor = node.walk();
	node.children(&mut cursor).find_map(first_error)
}

struct FileParser<'a> {
	filename: &'a str,
	src: &'a str,
}

impl FileParser<'_> {
	fn text(&self, node: Node<'_>) -> &str {
		&self.src[node.byte_range()]
	}

	fn error(&self, node: Node<'_>, message: impl Into<String>) -> ParseError {
		error_at(self.filename, node.start_position(), message.into())
	}

	/// First token of a node, for messages.
	fn describe(&self, node: Node<'_>) -> String {
		match self.text(node).split_whitespace().next() {
			Some(token) => format!("'{token}'"),
			None => "EOF".to_string(),
		}
	}

	fn syntax_error(&self, node: Node<'_>) -> ParseError {
		if node.is_missing() {
			return self.error(node, format!("syntax error: missing '{}'", node.kind()));
		}
		self.error(node, format!("syntax error: unexpected {}", self.describe(node)))
	}

	fn top_level(&self, root: Node<'_>) -> Result<(Ident, Vec<ImportDecl>), ParseError> {
		let mut cursor = root.walk();
		let mut items = root
			.named_children(&mut cursor)
			.filter(|node| node.kind() != "comment");

		let package = match items.next() {
			Some(node) if node.kind() == "package_clause" => self.package_clause(node)?,
			Some(node) => {
				let found = self.describe(node);
				return Err(self.error(node, format!("expected 'package', found {found}")));
			}
			None => {
				return Err(error_at(
					self.filename,
					root.end_position(),
					"expected 'package', found EOF".to_string(),
				));
			}
		};

		let mut imports = Vec::new();
		let mut seen_declaration = false;
		for node in items {
			match node.kind() {
				"import_declaration" if seen_declaration => {
					return Err(self.error(node, "imports must appear before other declarations"));
				}
				"import_declaration" => imports.push(self.import_decl(node)?),
				"function_declaration" | "method_declaration" | "const_declaration"
				| "var_declaration" | "type_declaration" => seen_declaration = true,
				"package_clause" => {
					return Err(self.error(node, "expected declaration, found 'package'"));
				}
				_ => {
					return Err(self.error(node, "non-declaration statement outside function body"));
				}
			}
		}
		Ok((package, imports))
	}

	fn package_clause(&self, node: Node<'_>) -> Result<Ident, ParseError> {
		let mut cursor = node.walk();
		let Some(name) = node
			.named_children(&mut cursor)
			.find(|child| child.kind() == "package_identifier")
		else {
			return Err(self.error(node, "expected package name"));
		};

		if self.text(name) == "_" {
			return Err(self.error(name, "invalid package name _"));
		}
		Ok(Ident {
			name: self.text(name).to_string(),
			pos: name.start_byte(),
		})
	}

	fn import_decl(&self, node: Node<'_>) -> Result<ImportDecl, ParseError> {
		let mut decl = ImportDecl {
			pos: node.start_byte(),
			lparen: None,
			rparen: None,
			specs: Vec::new(),
		};

		let mut cursor = node.walk();
		for child in node.named_children(&mut cursor) {
			match child.kind() {
				"import_spec" => decl.specs.push(self.import_spec(child)?),
				"import_spec_list" => {
					let mut list_cursor = child.walk();
					for item in child.children(&mut list_cursor) {
						match item.kind() {
							"(" => decl.lparen = Some(item.start_byte()),
							")" => decl.rparen = Some(item.start_byte()),
							"import_spec" => decl.specs.push(self.import_spec(item)?),
							_ => {}
						}
					}
				}
				_ => {}
			}
		}
		Ok(decl)
	}

	fn import_spec(&self, node: Node<'_>) -> Result<ImportSpec, ParseError> {
		let name = node.child_by_field_name("name").map(|name| Ident {
			name: self.text(name).to_string(),
			pos: name.start_byte(),
		});

		let Some(path) = node.child_by_field_name("path") else {
			return Err(self.error(node, "missing import path"));
		};
		let kind = match path.kind() {
			"interpreted_string_literal" => LitKind::String,
			"raw_string_literal" => LitKind::RawString,
			_ => return Err(self.error(path, "import path must be a string")),
		};

		let value = self.text(path);
		if !is_valid_import(value) {
			return Err(self.error(path, format!("invalid import path: {value}")));
		}

		Ok(ImportSpec {
			name,
			path: BasicLit {
				kind,
				value: value.to_string(),
				pos: path.start_byte(),
			},
			end_pos: None,
		})
	}

	/// Comments, and raw strings spanning several lines, in source order.
	fn collect_extras(&self, root: Node<'_>) -> (Vec<Comment>, Vec<Span>) {
		let mut comments = Vec::new();
		let mut raw_strings = Vec::new();

		let mut cursor = root.walk();
		loop {
			let node = cursor.node();
			let mut descend = true;
			match node.kind() {
				"comment" => {
					comments.push(Comment {
						text: self.text(node).to_string(),
						pos: node.start_byte(),
					});
					descend = false;
				}
				"raw_string_literal" => {
					if self.text(node).contains('\n') {
						raw_strings.push(Span {
							start: node.start_byte(),
							end: node.end_byte(),
						});
					}
					descend = false;
				}
				_ => {}
			}

			if descend && cursor.goto_first_child() {
				continue;
			}
			while !cursor.goto_next_sibling() {
				if !cursor.goto_parent() {
					return (comments, raw_strings);
				}
			}
		}
	}
}
