//! CLI module for promptkit
//!
//! ## Commands
//!
//! - `tokens <file>` - List the simple tokens of a file
//! - `parse <file>` - List the decoded tokens (header, links, references, plain text)
//! - `header <file>` - Show the front-matter records and the metadata read from them
//! - `check <file>` - Report header problems; the default action for a bare FILE
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
pub mod report;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use promptkit_syntax::ParseOptions;

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

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Decode prompt files: front-matter header, markdown links and chat-prompt references
#[derive(Parser, Debug)]
#[command(name = "promptkit")]
#[command(version = VERSION)]
#[command(about = "Decode prompt files: front matter, markdown links and chat-prompt references", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub stages: StageFlags,
}

/// Switches for the decoder stages.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct StageFlags {
    /// Do not recognize a front-matter header
    #[arg(long = "no-front-matter", global = true)]
    pub no_front_matter: bool,

    /// Do not recognize markdown links, images and comments
    #[arg(long = "no-markdown", global = true)]
    pub no_markdown: bool,

    /// Do not recognize chat-prompt references
    #[arg(long = "no-references", global = true)]
    pub no_references: bool,
}

impl StageFlags {
    pub fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_front_matter(!self.no_front_matter)
            .with_markdown(!self.no_markdown)
            .with_prompt_references(!self.no_references)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the simple tokens of a file (debug)
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the decoded tokens of a file
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print JSON instead of one token per line
        #[arg(long)]
        json: bool,
    },

    /// Show the front-matter records and metadata
    Header {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print the metadata and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report header problems (exit 1 on errors)
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
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
    let options = cli.stages.options();
    match cli.command {
        Some(Command::Tokens { file }) => commands::tokens_file(&file.to_string_lossy(), &options),
        Some(Command::Parse { file, json }) => commands::parse_file(&file.to_string_lossy(), &options, json),
        Some(Command::Header { file, json }) => commands::header_file(&file.to_string_lossy(), &options, json),
        Some(Command::Check { file }) => commands::check_file(&file.to_string_lossy(), &options),
        None => match cli.file {
            Some(file) => commands::check_file(&file.to_string_lossy(), &options),
            // No command and no file - clap prints nothing, so point at --help
            None => Err(CliError::failure("Error: no FILE given (see `promptkit --help`)")),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
