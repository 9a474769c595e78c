use super::radix_tree::RadixTree;
use super::{PathMatcher, RuleSet};
use std::borrow::Cow;

/// Rewrites the leading part of an import path using the rule with the
/// longest matching key.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
	tree: RadixTree<String>,
}

impl PrefixMatcher {
	pub fn new(rules: RuleSet) -> Self {
		let mut tree = RadixTree::new();
		for (original, desired) in rules {
			tree.insert(&original, desired);
		}
		Self { tree }
	}
}

impl PathMatcher for PrefixMatcher {
	fn desired_path<'a>(&self, original: &'a str) -> Cow<'a, str> {
		let Some((matched, desired)) = self.tree.longest_prefix(original) else {
			return Cow::Borrowed(original);
		};

		// Matches are anchored at the start, so the first occurrence of the
		// matched key is always the leading `matched` bytes.
		let suffix = &original[matched..];
		Cow::Owned(format!("{desired}{suffix}"))
	}
}
