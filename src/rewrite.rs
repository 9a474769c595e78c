//! The import rewriting pipeline: parse, rewrite matching imports, print.

use log::debug;

use crate::error::Result;
use crate::matcher::{MatchMode, PathMatcher, RuleSet};
use crate::syntax::{self, BasicLit, ImportSpec, LitKind, SourceFile, literal};

/// Result of rewriting one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	/// Whether any import path was rewritten.
	pub changed: bool,
	/// The new source, or the original source when nothing changed.
	pub source: String,
}

/// Rewrites the import paths of Go source files using one matcher.
#[derive(Debug)]
pub struct ImportRewriter {
	matcher: Box<dyn PathMatcher>,
}

impl ImportRewriter {
	pub fn new(mode: MatchMode, rules: RuleSet) -> Self {
		Self::with_matcher(mode.build(rules))
	}

	/// Rewriter that only replaces import paths named exactly by a rule.
	pub fn exact(rules: RuleSet) -> Self {
		Self::new(MatchMode::Exact, rules)
	}

	/// Rewriter that replaces the longest matching leading part of import paths.
	pub fn prefix(rules: RuleSet) -> Self {
		Self::new(MatchMode::Prefix, rules)
	}

	pub fn with_matcher(matcher: Box<dyn PathMatcher>) -> Self {
		Self { matcher }
	}

	/// Rewrite the import specs of a parsed file in place.
	///
	/// Returns whether any spec was changed.
	pub fn rewrite_file_imports(&self, file: &mut SourceFile) -> bool {
		let mut rewrote = false;
		for spec in file.import_specs_mut() {
			let Some(original) = spec.import_path() else {
				continue;
			};

			let desired = self.matcher.desired_path(&original);
			if desired != original.as_str() {
				debug!("Rewriting import {original:?} to {desired:?}");
				update_import_spec(spec, &desired);
				rewrote = true;
			}
		}
		rewrote
	}

	/// Rewrite the imports of one source file.
	///
	/// `filename` only labels parse errors. When no import changes, the
	/// original text is returned as is, without reformatting.
	pub fn rewrite(&self, filename: &str, source: &str) -> Result<Rewrite> {
		let mut file = syntax::parse_file(filename, source)?;

		if !self.rewrite_file_imports(&mut file) {
			return Ok(Rewrite {
				changed: false,
				source: source.to_string(),
			});
		}

		let source = syntax::print_file(&file)?;
		Ok(Rewrite {
			changed: true,
			source,
		})
	}
}

/// Point a spec at a new import path.
fn update_import_spec(spec: &mut ImportSpec, import_path: &str) {
	// Pin the end to the original literal first: the default end is derived
	// from the literal's length, which is about to change.
	spec.end_pos = Some(spec.end());
	spec.path = BasicLit {
		kind: LitKind::String,
		value: literal::quote(import_path),
		pos: spec.path.pos,
	};
}
