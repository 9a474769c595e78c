use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use goimport_rewrite::config::{RewriteSettings, parse_config_file, parse_rule, resolve_settings};
use goimport_rewrite::files::{FileDriver, FileReport, OutputMode};
use goimport_rewrite::{ImportRewriter, MatchMode, RewriteError};

const STDIN_NAME: &str = "standard input";

#[derive(Parser)]
#[command(name = "goimport-rewrite")]
#[command(
	author,
	version,
	about = "Rewrite Go import paths using exact or longest-prefix rules"
)]
struct Cli {
	/// Import rewrite rule, may be repeated
	#[arg(short = 'r', long = "rewrite", value_name = "ORIGINAL:NEW")]
	rewrites: Vec<String>,

	/// How rules are matched against import paths [default: exact]
	#[arg(long, value_enum)]
	mode: Option<MatchMode>,

	/// TOML file with a [rewrites] table and an optional mode
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// List files whose imports would change instead of rewriting them
	#[arg(short, long)]
	list: bool,

	/// Increase logging verbosity (-v, -vv, -vvv)
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,

	/// Go files or directories to rewrite; standard input when empty
	paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logger(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:#}");
			ExitCode::FAILURE
		}
	}
}

fn init_logger(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.format_timestamp(None)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let settings = load_settings(&cli)?;
	let rewriter = ImportRewriter::new(settings.mode, settings.rules);
	let mode = if cli.list {
		OutputMode::List
	} else {
		OutputMode::Write
	};
	let driver = FileDriver::new(&rewriter, mode);

	if cli.paths.is_empty() {
		return handle_stdin(&driver, cli.list);
	}

	let mut failed = false;
	for path in &cli.paths {
		driver.process_path(path, &mut |report| {
			failed |= report_file(report, cli.list);
		});
	}

	Ok(if failed {
		ExitCode::from(2)
	} else {
		ExitCode::SUCCESS
	})
}

fn load_settings(cli: &Cli) -> Result<RewriteSettings> {
	let rules = cli
		.rewrites
		.iter()
		.map(|rule| parse_rule(rule))
		.collect::<goimport_rewrite::Result<Vec<_>>>()?;

	let config = cli
		.config
		.as_deref()
		.map(parse_config_file)
		.transpose()
		.context("Failed to load configuration")?;

	Ok(resolve_settings(config, rules, cli.mode)?)
}

fn handle_stdin(driver: &FileDriver<'_>, list: bool) -> Result<ExitCode> {
	let stdin = io::stdin().lock();
	let stdout = io::stdout().lock();

	match driver.process_stream(STDIN_NAME, stdin, stdout) {
		Ok(true) if list => println!("{STDIN_NAME}"),
		Ok(_) => {}
		Err(e) => {
			eprintln!("{:#}", anyhow::Error::from(e));
			return Ok(ExitCode::from(2));
		}
	}
	Ok(ExitCode::SUCCESS)
}

/// Report one processed file. Returns whether it failed.
fn report_file(report: FileReport, list: bool) -> bool {
	match report.result {
		Ok(true) if list => println!("{}", report.path.display()),
		Ok(true) => eprintln!("{}: rewrote imports", report.path.display()),
		Ok(false) => {}
		// Only formatting errors lack the file name.
		Err(e @ RewriteError::Format(_)) => {
			eprintln!("{}: {:#}", report.path.display(), anyhow::Error::from(e));
			return true;
		}
		Err(e) => {
			eprintln!("{:#}", anyhow::Error::from(e));
			return true;
		}
	}
	false
}
