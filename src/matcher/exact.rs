use super::{PathMatcher, RuleSet};
use std::borrow::Cow;
use std::collections::HashMap;

/// Rewrites an import path only when a rule names it exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
	rules: HashMap<String, String>,
}

impl ExactMatcher {
	pub fn new(rules: RuleSet) -> Self {
		Self {
			rules: rules.into_iter().collect(),
		}
	}
}

impl PathMatcher for ExactMatcher {
	fn desired_path<'a>(&self, original: &'a str) -> Cow<'a, str> {
		match self.rules.get(original) {
			Some(desired) => Cow::Owned(desired.clone()),
			None => Cow::Borrowed(original),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matcher() -> ExactMatcher {
		ExactMatcher::new(RuleSet::from([
			("A".to_string(), "B".to_string()),
			(
				"github.com/foo/bar".to_string(),
				"github.com/foo/other".to_string(),
			),
		]))
	}

	#[test]
	fn test_exact_match_rewrites() {
		let matcher = matcher();
		assert_eq!(matcher.desired_path("A"), "B");
		assert_eq!(matcher.desired_path("github.com/foo/bar"), "github.com/foo/other");
	}

	#[test]
	fn test_superstring_is_unchanged() {
		let matcher = matcher();
		assert_eq!(matcher.desired_path("AX"), "AX");
		assert_eq!(matcher.desired_path("github.com/foo/bar/v2"), "github.com/foo/bar/v2");
	}

	#[test]
	fn test_unmatched_path_is_borrowed() {
		let matcher = matcher();
		assert!(matches!(matcher.desired_path("fmt"), Cow::Borrowed("fmt")));
	}
}
