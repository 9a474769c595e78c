//! goimport-rewrite - rewrite the import paths of Go source files.
//!
//! This library provides the core functionality for goimport-rewrite, including:
//! - A Go front end that parses package clauses and import declarations
//! - Exact and longest-prefix import path matching
//! - Printing rewritten files with canonically formatted import blocks
//! - Configuration file parsing and rule validation
//!
//! # Example
//!
//! ```
//! use goimport_rewrite::{ImportRewriter, MatchMode};
//! use goimport_rewrite::matcher::RuleSet;
//!
//! let rules = RuleSet::from([(
//!     "github.com/old/".to_string(),
//!     "github.com/new/".to_string(),
//! )]);
//! let rewriter = ImportRewriter::new(MatchMode::Prefix, rules);
//!
//! let result = rewriter
//!     .rewrite("main.go", "package main\n\nimport \"github.com/old/pkg\"\n")
//!     .unwrap();
//! assert!(result.changed);
//! assert_eq!(result.source, "package main\n\nimport \"github.com/new/pkg\"\n");
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod matcher;
pub mod rewrite;
pub mod syntax;

pub use error::{Result, RewriteError};
pub use matcher::{MatchMode, PathMatcher};
pub use rewrite::{ImportRewriter, Rewrite};
