// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::{IsTerminal, Read};
use std::path::Path;

use console::style;

use crate::config::ClintConfig;
use crate::error::{ClintError, ConfigError, LintError, Result, ResultExt};
use crate::git;
use crate::rules::{RuleEngine, ValidationResult};

use super::args::{Cli, Commands, InitArgs, LintArgs, LintSource, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    // Commands that must work without a valid configuration
    match cli.effective_command() {
        Commands::Version => return run_version(),
        Commands::Init(args) => return run_init(args),
        _ => {}
    }

    let config = if let Some(config_path) = &cli.config {
        ClintConfig::load_from(config_path)?
    } else {
        ClintConfig::load()?
    };

    if !config.ui.color {
        console::set_colors_enabled(false);
    }

    match cli.effective_command() {
        Commands::Lint(args) => run_lint(&cli, &config, args),
        Commands::PrintConfig => run_print_config(&cli, &config),
        Commands::Version | Commands::Init(_) => Ok(()),
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: &ClintConfig, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let engine = RuleEngine::from_config(config)?;

    let results = match args.source() {
        LintSource::Message(message) => vec![engine.lint(&message)],
        LintSource::EditFile(path) => {
            let message = git::read_edit_message(path.as_deref())?;
            vec![engine.lint(&message)]
        }
        LintSource::Commit(reference) => vec![engine.check_commit(&reference)?],
        LintSource::Range { from, to } => engine.check_range(&from, &to)?,
        LintSource::Stdin => {
            let message = read_stdin()?;
            vec![engine.lint(&message)]
        }
    };

    report(cli, &engine, &results, args.quiet);

    let errors: usize = results.iter().map(|r| r.errors.len()).sum();
    let warnings: usize = results.iter().map(|r| r.warnings.len()).sum();
    let failing = results
        .iter()
        .filter(|r| !r.is_valid() || (args.strict && !r.warnings.is_empty()))
        .count();

    if failing > 0 {
        let count = if args.strict { errors + warnings } else { errors };
        return Err(ClintError::Lint(LintError::Failed {
            count,
            messages: failing,
        }));
    }

    Ok(())
}

/// Read a message from standard input.
fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(ClintError::Lint(LintError::NoInput));
    }

    let mut message = String::new();
    stdin
        .read_to_string(&mut message)
        .context("Failed to read message from stdin")?;

    // `echo` and most pipes add a trailing line break
    Ok(message.trim_end_matches(['\n', '\r']).to_string())
}

/// Print lint results in the selected format.
fn report(cli: &Cli, engine: &RuleEngine, results: &[ValidationResult], quiet: bool) {
    match cli.format {
        Some(OutputFormat::Json) => {
            let json = serde_json::json!({
                "valid": results.iter().all(ValidationResult::is_valid),
                "results": results.iter().map(ValidationResult::to_json).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        _ => {
            for result in results {
                if quiet && result.is_valid() && result.warnings.is_empty() {
                    continue;
                }
                println!("{}", result.render_text(engine.help_url()));
            }

            if results.len() > 1 && !quiet {
                let invalid = results.iter().filter(|r| !r.is_valid()).count();
                println!();
                println!(
                    "{} commits checked, {} invalid",
                    style(results.len()).bold(),
                    style(invalid).bold()
                );
            }
        }
    }
}

/// Run the print-config command.
fn run_print_config(cli: &Cli, config: &ClintConfig) -> Result<()> {
    let engine = RuleEngine::from_config(config)?;

    match cli.format {
        Some(OutputFormat::Json) => {
            let json = serde_json::json!({
                "extends": config.extends,
                "rules": engine.resolved_rules(),
                "ignores": engine.ignores().descriptions(),
                "help_url": engine.help_url(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        _ => {
            println!("{}", style("Extends").bold().underlined());
            if config.extends.is_empty() {
                println!("  (none)");
            }
            for name in &config.extends {
                println!("  {}", name);
            }

            println!();
            println!("{}", style("Rules").bold().underlined());
            for (name, spec) in engine.resolved_rules() {
                let mut line = format!("  {:<24} {:<8} {}", name, spec.severity, spec.when);
                if let Some(ref value) = spec.value {
                    line.push_str(&format!(" {}", value));
                }
                println!("{}", line);
            }

            println!();
            println!("{}", style("Ignores").bold().underlined());
            if engine.ignores().is_empty() {
                println!("  (none)");
            }
            for (i, description) in engine.ignores().descriptions().iter().enumerate() {
                println!("  {}. {}", i + 1, description);
            }
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("clint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }
    if crate::version::GIT_DIRTY == Some("true") {
        println!("built from a dirty working tree");
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("clint.toml");

    if config_path.exists() && !args.force {
        return Err(ClintError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config())?;

    println!(
        "{} Created {}",
        style("✓").green().bold(),
        style(config_path.display()).cyan()
    );

    Ok(())
}
