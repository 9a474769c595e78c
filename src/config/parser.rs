use crate::config::types::{Config, RewriteSettings, validate_rule};
use crate::error::{Result, RewriteError};
use crate::matcher::MatchMode;
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| RewriteError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| RewriteError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}

/// Parse a command-line rule of the form `<original import>:<new import>`.
pub fn parse_rule(input: &str) -> Result<(String, String)> {
	let parts: Vec<&str> = input.split(':').collect();
	let [original, desired] = parts.as_slice() else {
		return Err(RewriteError::InvalidRule {
			input: input.to_string(),
		});
	};
	validate_rule(original, desired).map_err(|_| RewriteError::InvalidRule {
		input: input.to_string(),
	})?;

	Ok((original.to_string(), desired.to_string()))
}

/// Merge the optional config file with command-line rules and mode.
///
/// Command-line rules override file rules for the same original path, and
/// an explicit mode overrides the file's mode. Fails if no rule remains.
pub fn resolve_settings(
	config: Option<Config>,
	cli_rules: Vec<(String, String)>,
	cli_mode: Option<MatchMode>,
) -> Result<RewriteSettings> {
	let config = config.unwrap_or_default();
	let mode = cli_mode.or(config.mode).unwrap_or_default();

	let mut rules = config.rewrites;
	rules.extend(cli_rules);

	if rules.is_empty() {
		return Err(RewriteError::NoRules);
	}

	log::info!("Using {} {} rewrite rule(s)", rules.len(), mode.as_str());
	Ok(RewriteSettings { mode, rules })
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("rewrites.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(config.mode.is_none());
		assert!(config.rewrites.is_empty());
	}

	#[test]
	fn test_parse_full_config() {
		let content = r#"
mode = "prefix"

[rewrites]
"github.com/foo/" = "github.com/bar/"
"gopkg.in/yaml.v2" = "gopkg.in/yaml.v3"
"#;
		let path = PathBuf::from("rewrites.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.mode, Some(MatchMode::Prefix));
		assert_eq!(config.rewrites.len(), 2);
		assert_eq!(
			config.rewrites.get("gopkg.in/yaml.v2").map(String::as_str),
			Some("gopkg.in/yaml.v3")
		);
	}

	#[test]
	fn test_parse_invalid_mode() {
		let path = PathBuf::from("rewrites.toml");
		let result = parse_config_str("mode = \"fuzzy\"\n", &path);

		match result.unwrap_err() {
			RewriteError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("rewrites.toml"));
			}
			other => panic!("Expected ConfigParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_unknown_key() {
		let path = PathBuf::from("rewrites.toml");
		let result = parse_config_str("rules = 1\n", &path);
		assert!(matches!(
			result,
			Err(RewriteError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_config_rejects_empty_desired_path() {
		let content = r#"
[rewrites]
"github.com/foo" = ""
"#;
		let path = PathBuf::from("rewrites.toml");
		match parse_config_str(content, &path).unwrap_err() {
			RewriteError::InvalidRule { input } => assert_eq!(input, "github.com/foo:"),
			other => panic!("Expected InvalidRule, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_rule() {
		let rule = parse_rule("github.com/foo:github.com/bar").unwrap();
		assert_eq!(rule, ("github.com/foo".to_string(), "github.com/bar".to_string()));
	}

	#[test]
	fn test_parse_rule_wrong_part_count() {
		for input in ["github.com/foo", "a:b:c", ":b", "a:"] {
			match parse_rule(input) {
				Err(RewriteError::InvalidRule { input: got }) => assert_eq!(got, input),
				other => panic!("Expected InvalidRule for {input:?}, got {other:?}"),
			}
		}
	}

	#[test]
	fn test_resolve_cli_overrides_file() {
		let config = Config {
			mode: Some(MatchMode::Prefix),
			rewrites: [
				("a".to_string(), "b".to_string()),
				("c".to_string(), "d".to_string()),
			]
			.into(),
		};
		let settings = resolve_settings(
			Some(config),
			vec![("a".to_string(), "z".to_string())],
			Some(MatchMode::Exact),
		)
		.unwrap();

		assert_eq!(settings.mode, MatchMode::Exact);
		assert_eq!(settings.rules.get("a").map(String::as_str), Some("z"));
		assert_eq!(settings.rules.get("c").map(String::as_str), Some("d"));
	}

	#[test]
	fn test_resolve_mode_from_file() {
		let config = Config {
			mode: Some(MatchMode::Prefix),
			rewrites: [("a".to_string(), "b".to_string())].into(),
		};
		let settings = resolve_settings(Some(config), vec![], None).unwrap();
		assert_eq!(settings.mode, MatchMode::Prefix);
	}

	#[test]
	fn test_resolve_requires_a_rule() {
		let result = resolve_settings(None, vec![], Some(MatchMode::Prefix));
		assert!(matches!(result, Err(RewriteError::NoRules)));
	}
}
