//! Rewrite rule configuration.
//!
//! This module handles:
//! - TOML rules file parsing
//! - Command-line `<old>:<new>` rule parsing
//! - Merging both into the effective settings

pub mod parser;
pub mod types;

pub use parser::{parse_config_file, parse_config_str, parse_rule, resolve_settings};
pub use types::{Config, RewriteSettings};
