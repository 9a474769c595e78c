//! Feeding files to the rewriter.
//!
//! This module handles:
//! - Selecting Go source files while walking directories
//! - Rewriting files in place or only listing the ones that would change
//! - Filtering standard input to standard output

use crate::error::{Result, RewriteError};
use crate::rewrite::ImportRewriter;
use log::debug;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What to do with a file whose imports changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
	/// Write the rewritten source back.
	#[default]
	Write,
	/// Leave the file alone; the caller only reports it.
	List,
}

/// Outcome of processing one file.
#[derive(Debug)]
pub struct FileReport {
	pub path: PathBuf,
	/// Whether the file's imports changed, or why processing failed.
	pub result: Result<bool>,
}

/// Applies an [`ImportRewriter`] to files, directories and streams.
#[derive(Debug)]
pub struct FileDriver<'a> {
	rewriter: &'a ImportRewriter,
	mode: OutputMode,
}

impl<'a> FileDriver<'a> {
	pub fn new(rewriter: &'a ImportRewriter, mode: OutputMode) -> Self {
		Self { rewriter, mode }
	}

	/// Process a file, or every Go file below a directory.
	///
	/// Each file is reported through `on_file` as soon as it is done; a
	/// failure on one file does not stop the others.
	pub fn process_path(&self, path: &Path, on_file: &mut dyn FnMut(FileReport)) {
		if path.is_dir() {
			self.walk_dir(path, on_file);
		} else {
			on_file(FileReport {
				path: path.to_path_buf(),
				result: self.process_file(path),
			});
		}
	}

	fn walk_dir(&self, root: &Path, on_file: &mut dyn FnMut(FileReport)) {
		for entry in WalkDir::new(root).sort_by_file_name() {
			match entry {
				Ok(entry) if is_go_file(&entry) => on_file(FileReport {
					path: entry.path().to_path_buf(),
					result: self.process_file(entry.path()),
				}),
				Ok(entry) => debug!("Skipping {}", entry.path().display()),
				Err(err) => on_file(FileReport {
					path: err.path().unwrap_or(root).to_path_buf(),
					result: Err(RewriteError::from(err)),
				}),
			}
		}
	}

	/// Rewrite one file. Returns whether its imports changed.
	pub fn process_file(&self, path: &Path) -> Result<bool> {
		let source = std::fs::read_to_string(path).map_err(|source| RewriteError::ReadError {
			path: path.to_path_buf(),
			source,
		})?;

		let rewrite = self
			.rewriter
			.rewrite(&path.display().to_string(), &source)?;
		if !rewrite.changed {
			debug!("{}: no imports to rewrite", path.display());
			return Ok(false);
		}

		if self.mode == OutputMode::Write {
			std::fs::write(path, rewrite.source).map_err(|source| RewriteError::WriteError {
				path: path.to_path_buf(),
				source,
			})?;
		}
		Ok(true)
	}

	/// Rewrite source read from `input` and write the result to `output`.
	///
	/// Unchanged source is copied through. In list mode nothing is written.
	pub fn process_stream(
		&self,
		name: &str,
		mut input: impl Read,
		mut output: impl Write,
	) -> Result<bool> {
		let mut source = String::new();
		input
			.read_to_string(&mut source)
			.map_err(|source| RewriteError::ReadError {
				path: PathBuf::from(name),
				source,
			})?;

		let rewrite = self.rewriter.rewrite(name, &source)?;
		if self.mode == OutputMode::Write {
			output
				.write_all(rewrite.source.as_bytes())
				.and_then(|()| output.flush())
				.map_err(|source| RewriteError::WriteError {
					path: PathBuf::from(name),
					source,
				})?;
		}
		Ok(rewrite.changed)
	}
}

/// Whether a walked entry is a Go source file worth rewriting.
///
/// Hidden files (leading `.`) are skipped; directories are never candidates.
pub fn is_go_file(entry: &DirEntry) -> bool {
	let name = entry.file_name().to_string_lossy();
	!entry.file_type().is_dir() && !name.starts_with('.') && name.ends_with(".go")
}
