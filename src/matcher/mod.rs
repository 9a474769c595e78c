//! Import path matching strategies.
//!
//! This module handles:
//! - The `PathMatcher` capability shared by all strategies
//! - Exact matching against a rule set
//! - Longest-prefix matching backed by a radix tree

pub mod exact;
pub mod prefix;
pub mod radix_tree;

pub use exact::ExactMatcher;
pub use prefix::PrefixMatcher;
pub use radix_tree::RadixTree;

use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Rewrite rules: original import path to desired import path.
pub type RuleSet = BTreeMap<String, String>;

/// Decides the desired import path for an original one.
///
/// Implementations are immutable once built, so one matcher can serve
/// any number of files, including from several threads.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
	/// The path `original` should be rewritten to, or `original` itself
	/// when no rule applies.
	fn desired_path<'a>(&self, original: &'a str) -> Cow<'a, str>;
}

/// Strategy used to match import paths against rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	/// A rule applies only to the identical import path.
	#[default]
	Exact,
	/// The rule with the longest key that prefixes the import path applies.
	Prefix,
}

impl MatchMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			MatchMode::Exact => "exact",
			MatchMode::Prefix => "prefix",
		}
	}

	/// Build the matcher for this strategy from `rules`.
	pub fn build(self, rules: RuleSet) -> Box<dyn PathMatcher> {
		match self {
			MatchMode::Exact => Box::new(ExactMatcher::new(rules)),
			MatchMode::Prefix => Box::new(PrefixMatcher::new(rules)),
		}
	}
}
