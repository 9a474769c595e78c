use std::path::PathBuf;

use crate::syntax::{ParseError, PrintError};

/// Errors raised while loading rules or rewriting a file.
///
/// Each failure concerns a single file or the rule setup; callers decide
/// whether to go on with other files. The binary reports them through
/// `anyhow`, printing the whole source chain.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
	#[error("error parsing original source")]
	Parse(#[from] ParseError),

	#[error("error formatting rewritten source")]
	Format(#[from] PrintError),

	#[error("Invalid argument format: expecting <original import>:<new import>, got {input:?}")]
	InvalidRule { input: String },

	#[error("At least one import rewrite is required")]
	NoRules,

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to walk directory")]
	WalkError(#[from] walkdir::Error),
}

/// Result type alias using RewriteError.
pub type Result<T> = std::result::Result<T, RewriteError>;
