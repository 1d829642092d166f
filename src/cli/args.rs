// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clint - commit message linter
///
/// Checks commit messages against a conventional-commits rule set.
#[derive(Parser, Debug)]
#[command(name = "clint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to lint if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint commit messages (default command)
    Lint(LintArgs),

    /// Print the resolved rule table and ignore predicates
    PrintConfig,

    /// Write a clint.toml with the default configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the lint command.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// Message to lint (reads stdin when omitted)
    #[arg(conflicts_with_all = ["edit", "from", "commit"])]
    pub message: Option<String>,

    /// Read the message from a commit-msg file (default: .git/COMMIT_EDITMSG)
    #[arg(short, long, value_name = "FILE", num_args = 0..=1, conflicts_with_all = ["from", "commit"])]
    pub edit: Option<Option<PathBuf>>,

    /// Lint the message of one existing commit
    #[arg(long, value_name = "REV", conflicts_with = "from")]
    pub commit: Option<String>,

    /// Lint commits after this revision
    #[arg(long, value_name = "REV")]
    pub from: Option<String>,

    /// Lint commits up to this revision (default: HEAD)
    #[arg(long, value_name = "REV", requires = "from")]
    pub to: Option<String>,

    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,

    /// Print nothing for messages that pass
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Where the lint command takes its messages from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintSource {
    /// A message given on the command line.
    Message(String),
    /// A commit-msg file; `None` means the repository's COMMIT_EDITMSG.
    EditFile(Option<PathBuf>),
    /// One existing commit.
    Commit(String),
    /// Commits in `from..to`.
    Range { from: String, to: String },
    /// Standard input.
    Stdin,
}

impl LintArgs {
    /// Resolve the message source from the parsed flags.
    pub fn source(&self) -> LintSource {
        if let Some(ref from) = self.from {
            return LintSource::Range {
                from: from.clone(),
                to: self.to.clone().unwrap_or_else(|| "HEAD".to_string()),
            };
        }
        if let Some(ref reference) = self.commit {
            return LintSource::Commit(reference.clone());
        }
        if let Some(ref edit) = self.edit {
            return LintSource::EditFile(edit.clone());
        }
        match self.message {
            Some(ref message) => LintSource::Message(message.clone()),
            None => LintSource::Stdin,
        }
    }
}

impl Cli {
    /// Get the effective command, defaulting to Lint if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Lint(LintArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lint_message() {
        let args = Cli::parse_from(["clint", "lint", "feat: add login"]);
        if let Some(Commands::Lint(lint)) = args.command {
            assert_eq!(lint.source(), LintSource::Message("feat: add login".to_string()));
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_parse_edit_with_and_without_path() {
        let args = Cli::parse_from(["clint", "lint", "--edit"]);
        if let Some(Commands::Lint(lint)) = args.command {
            assert_eq!(lint.source(), LintSource::EditFile(None));
        } else {
            panic!("Expected Lint command");
        }

        let args = Cli::parse_from(["clint", "lint", "--edit", ".git/COMMIT_EDITMSG"]);
        if let Some(Commands::Lint(lint)) = args.command {
            assert_eq!(
                lint.source(),
                LintSource::EditFile(Some(PathBuf::from(".git/COMMIT_EDITMSG")))
            );
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_parse_range() {
        let args = Cli::parse_from(["clint", "lint", "--from", "HEAD~5", "--strict"]);
        if let Some(Commands::Lint(lint)) = args.command {
            assert!(lint.strict);
            assert_eq!(
                lint.source(),
                LintSource::Range {
                    from: "HEAD~5".to_string(),
                    to: "HEAD".to_string()
                }
            );
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_parse_commit() {
        let args = Cli::parse_from(["clint", "lint", "--commit", "HEAD~1"]);
        if let Some(Commands::Lint(lint)) = args.command {
            assert_eq!(lint.source(), LintSource::Commit("HEAD~1".to_string()));
        } else {
            panic!("Expected Lint command");
        }

        assert!(Cli::try_parse_from(["clint", "lint", "--commit", "HEAD", "--from", "HEAD~2"]).is_err());
    }

    #[test]
    fn test_message_conflicts_with_edit() {
        let result = Cli::try_parse_from(["clint", "lint", "--edit", "x", "feat: y"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["clint", "--format", "json", "--no-color", "print-config"]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.no_color);
        assert!(matches!(args.command, Some(Commands::PrintConfig)));
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["clint"]);
        assert!(args.command.is_none());
        assert!(matches!(args.effective_command(), Commands::Lint(_)));
    }
}
