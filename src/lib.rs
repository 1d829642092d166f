// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! clint - commit message linter
//!
//! Checks commit messages against a conventional-commits rule set, in the
//! manner of commitlint's `config-conventional`.
//!
//! # Features
//!
//! - **Default Configuration**: extends the conventional preset and
//!   restricts commit types to a fixed list
//! - **Ignore Predicates**: empty and merge messages are skipped before any
//!   rule runs
//! - **Rule Engine**: 22 built-in rules with severity, always/never
//!   applicability and per-rule values
//! - **Git Integration**: lint `COMMIT_EDITMSG` or a range of commits
//!
//! # Example
//!
//! ```no_run
//! use clint::config::ClintConfig;
//! use clint::rules::RuleEngine;
//!
//! // Load configuration, falling back to the built-in default
//! let config = ClintConfig::load().unwrap();
//! let engine = RuleEngine::from_config(&config).unwrap();
//!
//! let result = engine.lint("wip: quick fix");
//! for error in &result.errors {
//!     println!("{}", error.format());
//! }
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod ignore;
pub mod rules;

// Re-exports for convenience
pub use config::ClintConfig;
pub use error::{ClintError, Result};
pub use rules::RuleEngine;

/// Version information embedded at compile time.
pub mod version {
    /// The current version of clint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Whether the working tree had uncommitted changes at compile time.
    pub const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
