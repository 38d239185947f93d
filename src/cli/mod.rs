//! CLI module for the testbed harness
//!
//! ## Commands
//!
//! - `run <suite>` - Clean, build, and run a suite's tests in order (fail-fast)
//! - `reset` - Clean the workspace by hand (the loose lifecycle leaves artifacts behind)
//! - `list [suite]` - Show registered suites, or one suite's test ids in run order
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use testbed_core::suites::{self, SuiteId};

use crate::backend::DEFAULT_MAKE;
use crate::harness::HarnessError;
use crate::version::TESTBED_VERSION as VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Harness failures keep the failing step's exit code and render through miette.
impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        let code = err.exit_code();
        Self::with_code(format!("{:?}", miette::Report::new(err)), code)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Clean-build-run harness for the storage-layer test suites
#[derive(Parser, Debug)]
#[command(name = "testbed")]
#[command(version = VERSION)]
#[command(about = "Clean, build, and run storage-layer test suites (fail-fast)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the suite lives and how to build it.
#[derive(Args, Debug, Clone)]
pub struct WorkspaceArgs {
    /// Directory containing the Makefile and the built test executables
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub workdir: PathBuf,

    /// Build tool invoked as `<PROGRAM> clean` and `<PROGRAM> [-j]`
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_MAKE)]
    pub make: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clean, build, and run every test of a suite in order
    Run {
        /// Suite to run
        #[arg(value_name = "SUITE", value_parser = parse_suite)]
        suite: SuiteId,
        #[command(flatten)]
        workspace: WorkspaceArgs,
        /// Override the suite's build parallelism (0 = unbounded `-j`)
        #[arg(short = 'j', long, value_name = "N")]
        jobs: Option<usize>,
        /// Print the steps without running anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Clean the workspace (`make clean`)
    Reset {
        #[command(flatten)]
        workspace: WorkspaceArgs,
    },

    /// List suites, or the tests of one suite in run order
    List {
        /// Suite whose tests to list
        #[arg(value_name = "SUITE", value_parser = parse_suite)]
        suite: Option<SuiteId>,
    },
}

fn parse_suite(name: &str) -> Result<SuiteId, String> {
    suites::from_str(name)
        .ok_or_else(|| format!("unknown suite `{}` (known suites: {})", name, suites::names().join(", ")))
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run {
            suite,
            workspace,
            jobs,
            dry_run,
        } => commands::run_suite(suite, &workspace, jobs, dry_run),
        Command::Reset { workspace } => commands::reset_workspace(&workspace),
        Command::List { suite } => commands::list(suite),
    }
}

// ============================================================================
// Tests
// ============================================================================
