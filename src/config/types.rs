use serde::Deserialize;

use crate::error::{Result, RewriteError};
use crate::matcher::{MatchMode, RuleSet};

/// Top-level configuration from a rewrite rules file.
///
/// ```toml
/// mode = "prefix"
///
/// [rewrites]
/// "github.com/old/" = "github.com/new/"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Matching strategy. Defaults to exact matching.
	#[serde(default)]
	pub mode: Option<MatchMode>,

	/// Original import path to desired import path.
	#[serde(default)]
	pub rewrites: RuleSet,
}

/// Effective settings after merging the config file and command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSettings {
	pub mode: MatchMode,
	pub rules: RuleSet,
}

impl Config {
	/// Validate that every rule names both an original and a desired path.
	pub fn validate(&self) -> Result<()> {
		for (original, desired) in &self.rewrites {
			validate_rule(original, desired)?;
		}
		Ok(())
	}
}

pub(crate) fn validate_rule(original: &str, desired: &str) -> Result<()> {
	if original.is_empty() || desired.is_empty() {
		return Err(RewriteError::InvalidRule {
			input: format!("{original}:{desired}"),
		});
	}
	Ok(())
}
