use goimport_rewrite::matcher::RuleSet;
use goimport_rewrite::{ImportRewriter, MatchMode, RewriteError};
use pretty_assertions::assert_eq;

fn rules(pairs: &[(&str, &str)]) -> RuleSet {
	pairs
		.iter()
		.map(|(original, desired)| (original.to_string(), desired.to_string()))
		.collect()
}

fn prefix_rules() -> RuleSet {
	rules(&[
		("github.com/foo/", "github.com/bar/"),
		("github.com/foo/bar", "github.com/baz/other"),
	])
}

// ============================================================================
// Exact matching
// ============================================================================

#[test]
fn test_exact_rewrite_of_group() {
	let rewriter = ImportRewriter::exact(rules(&[
		("github.com/foo/bar", "github.com/foo/other"),
		("github.com/foo/baz", "github.com/foo/somethingelse"),
	]));
	let input = "package example\n\t\nimport (\n\t_ \"github.com/foo/bar\"\n\t_ \"github.com/foo/baz\"\n\t_ \"github.com/foo/third\"\n)\n";

	let result = rewriter.rewrite("example.go", input).unwrap();

	assert!(result.changed);
	assert_eq!(
		result.source,
		"package example\n\nimport (\n\t_ \"github.com/foo/other\"\n\t_ \"github.com/foo/somethingelse\"\n\t_ \"github.com/foo/third\"\n)\n"
	);
}

#[test]
fn test_exact_rewrite_ignores_superstrings() {
	let rewriter = ImportRewriter::exact(rules(&[("A", "B")]));

	let result = rewriter
		.rewrite("a.go", "package p\n\nimport \"A\"\n")
		.unwrap();
	assert!(result.changed);
	assert_eq!(result.source, "package p\n\nimport \"B\"\n");

	let result = rewriter
		.rewrite("a.go", "package p\n\nimport \"AX\"\n")
		.unwrap();
	assert!(!result.changed);
	assert_eq!(result.source, "package p\n\nimport \"AX\"\n");
}

// ============================================================================
// Prefix matching
// ============================================================================

#[test]
fn test_prefix_rewrite_prefers_longest_rule() {
	let rewriter = ImportRewriter::prefix(prefix_rules());
	let input = "package example\n\nimport (\n\t_ \"github.com/foo/baz/other\"\t\n\t_ \"github.com/foo/bar/baz\"\n\t_ \"github.com/other/something\"\n)\n";

	let result = rewriter.rewrite("example.go", input).unwrap();

	assert!(result.changed);
	assert_eq!(
		result.source,
		"package example\n\nimport (\n\t_ \"github.com/bar/baz/other\"\n\t_ \"github.com/baz/other/baz\"\n\t_ \"github.com/other/something\"\n)\n"
	);
}

#[test]
fn test_prefix_rewrite_keeps_aliases_and_comments() {
	let rewriter = ImportRewriter::prefix(prefix_rules());
	let input = "package example\n\nimport (\n\t\"fmt\" // standard\n\n\t// Vendored helpers.\n\thelpers \"github.com/foo/helpers\"\n)\n";

	let result = rewriter.rewrite("example.go", input).unwrap();

	assert_eq!(
		result.source,
		"package example\n\nimport (\n\t\"fmt\" // standard\n\n\t// Vendored helpers.\n\thelpers \"github.com/bar/helpers\"\n)\n"
	);
}

// ============================================================================
// Whole-file properties
// ============================================================================

#[test]
fn test_identity_without_matching_imports() {
	let input = "package main\n\nimport (\n   \"fmt\"\n\t\"os\"   \n)\n\n\n\nfunc main() {  \n\tfmt.Println(\"github.com/foo/bar\", os.Args)\n}";

	for mode in [MatchMode::Exact, MatchMode::Prefix] {
		let rewriter = ImportRewriter::new(mode, prefix_rules());
		let result = rewriter.rewrite("main.go", input).unwrap();

		assert!(!result.changed, "{} mode reported a change", mode.as_str());
		assert_eq!(result.source, input);
	}
}

#[test]
fn test_rewrite_is_idempotent() {
	let input = "package main\n\nimport (\n\t\"github.com/foo/bar/baz\"\n\tx \"github.com/foo/qux\"\n)\n";

	for mode in [MatchMode::Exact, MatchMode::Prefix] {
		let rewriter = ImportRewriter::new(
			mode,
			rules(&[
				("github.com/foo/", "github.com/bar/"),
				("github.com/foo/bar/baz", "github.com/baz/other"),
			]),
		);
		let first = rewriter.rewrite("main.go", input).unwrap();
		assert!(first.changed);

		let second = rewriter.rewrite("main.go", &first.source).unwrap();
		assert!(!second.changed);
		assert_eq!(second.source, first.source);
	}
}

#[test]
fn test_length_change_keeps_later_text_intact() {
	let rewriter = ImportRewriter::exact(rules(&[("a", "github.com/example/a")]));
	let input = "package main\n\nimport \"a\" // short path\n\n// Hello greets.\n// It spans two lines.\nfunc Hello() string {\n\treturn a.Name() /* inline */ + \"!\"\n}\n\nvar raw = `keep\n   spacing   \n`\n";

	let result = rewriter.rewrite("main.go", input).unwrap();

	assert!(result.changed);
	assert_eq!(
		result.source,
		input.replacen("import \"a\"", "import \"github.com/example/a\"", 1)
	);
}

#[test]
fn test_shortening_rewrite_keeps_later_text_intact() {
	let rewriter = ImportRewriter::exact(rules(&[("github.com/example/long/path", "p")]));
	let input = "package main\n\nimport (\n\tlong \"github.com/example/long/path\" // aliased\n)\n\n/*\nDocs.\n*/\nconst Name = long.Name\n";

	let result = rewriter.rewrite("main.go", input).unwrap();

	assert_eq!(
		result.source,
		"package main\n\nimport (\n\tlong \"p\" // aliased\n)\n\n/*\nDocs.\n*/\nconst Name = long.Name\n"
	);
}

#[test]
fn test_non_import_strings_untouched() {
	let rewriter = ImportRewriter::exact(rules(&[("A", "B")]));
	let input = "package p\n\nimport \"A\"\n\nconst name = \"A\"\n\nvar names = []string{\"A\", `A`}\n";

	let result = rewriter.rewrite("p.go", input).unwrap();

	assert_eq!(
		result.source,
		"package p\n\nimport \"B\"\n\nconst name = \"A\"\n\nvar names = []string{\"A\", `A`}\n"
	);
}

#[test]
fn test_three_imports_two_rewritten() {
	let rewriter = ImportRewriter::exact(rules(&[
		("github.com/foo/bar", "github.com/foo/other"),
		("github.com/foo/baz", "github.com/foo/somethingelse"),
	]));
	let input = "package p\n\nimport (\n\t\"github.com/foo/bar\"\n\t\"github.com/foo/baz\"\n\t\"github.com/foo/third\"\n)\n";

	let result = rewriter.rewrite("p.go", input).unwrap();

	assert!(result.changed);
	assert_eq!(
		result.source,
		"package p\n\nimport (\n\t\"github.com/foo/other\"\n\t\"github.com/foo/somethingelse\"\n\t\"github.com/foo/third\"\n)\n"
	);
}

#[test]
fn test_multiple_import_declarations() {
	let rewriter = ImportRewriter::prefix(prefix_rules());
	let input = "package p\n\nimport \"github.com/foo/a\"\nimport (\n\t\"github.com/foo/b\"\n)\nimport c \"github.com/foo/bar/c\"\n";

	let result = rewriter.rewrite("p.go", input).unwrap();

	assert_eq!(
		result.source,
		"package p\n\nimport \"github.com/bar/a\"\nimport (\n\t\"github.com/bar/b\"\n)\nimport c \"github.com/baz/other/c\"\n"
	);
}

#[test]
fn test_invalid_source_is_an_error() {
	let rewriter = ImportRewriter::exact(rules(&[("A", "B")]));

	let err = rewriter
		.rewrite("broken.go", "package p\n\nfunc f() {\n")
		.unwrap_err();
	assert!(matches!(err, RewriteError::Parse(_)));
}

#[test]
fn test_malformed_body_after_imports_is_an_error() {
	let rewriter = ImportRewriter::exact(rules(&[("A", "B")]));

	for body in ["func f() { x := }", "var", "func", "type = = 3", "x := 1"] {
		let input = format!("package p\n\nimport \"A\"\n\n{body}\n");
		match rewriter.rewrite("broken.go", &input) {
			Err(RewriteError::Parse(err)) => assert_eq!(err.filename, "broken.go"),
			other => panic!("Expected parse error for {body:?}, got {other:?}"),
		}
	}
}

#[test]
fn test_group_comments_keep_their_place() {
	let rewriter = ImportRewriter::exact(rules(&[("A", "B")]));

	let result = rewriter
		.rewrite("p.go", "package p\n\nimport ( // deps\n\t\"A\"\n)\n")
		.unwrap();
	assert_eq!(result.source, "package p\n\nimport ( // deps\n\t\"B\"\n)\n");

	let result = rewriter
		.rewrite("p.go", "package p\n\nimport /* c */ (\n\t\"A\"\n)\n")
		.unwrap();
	assert_eq!(result.source, "package p\n\nimport /* c */ (\n\t\"B\"\n)\n");
}
