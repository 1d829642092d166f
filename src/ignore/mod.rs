// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Ignore pipeline.
//!
//! Predicates run in order against the full raw message before anything is
//! parsed. The first match exempts the message from every rule.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::IgnorePredicate;
use crate::error::{ConfigError, Result};

lazy_static! {
    /// The upstream linter's default ignores: merges, reverts, fixups and
    /// messages written by hosting services.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"(?m)^((Merge pull request .*)|(Merge (.*?) into (.*?))|(Merge branch (.*?)))(?:\r?\n)*$",
        r"(?m)^(Merge tag (.*?))(?:\r?\n)*$",
        r"^(R|r)evert (.*)",
        r"^(amend|fixup|squash)!",
        r"^(Merged (.*?)(in|into) (.*)|Merged PR (.*): (.*))",
        r"^Merge remote-tracking branch(\s*)(.*)",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
        // A release commit whose first line is only a semver version.
        r"^v?\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?(?:\r?\n|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// A compiled ignore predicate.
#[derive(Debug, Clone)]
enum Matcher {
    Empty,
    Contains(String),
    Matches(Regex),
}

impl Matcher {
    fn compile(predicate: &IgnorePredicate) -> Result<Self> {
        Ok(match predicate {
            IgnorePredicate::Empty => Matcher::Empty,
            IgnorePredicate::Contains { pattern } => Matcher::Contains(pattern.clone()),
            IgnorePredicate::Matches { pattern } => {
                Matcher::Matches(Regex::new(pattern).map_err(|e| ConfigError::InvalidIgnore {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?)
            }
        })
    }

    fn is_match(&self, message: &str) -> bool {
        match self {
            Matcher::Empty => message.is_empty(),
            Matcher::Contains(pattern) => message.contains(pattern.as_str()),
            Matcher::Matches(regex) => regex.is_match(message),
        }
    }

    fn describe(&self) -> String {
        match self {
            Matcher::Empty => "message is empty".to_string(),
            Matcher::Contains(pattern) => format!("message contains '{}'", pattern),
            Matcher::Matches(regex) => format!("message matches /{}/", regex.as_str()),
        }
    }
}

/// The ordered, compiled ignore predicates of one configuration.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    matchers: Vec<Matcher>,
}

impl IgnoreSet {
    /// Compile the configured predicates, followed by the default ignores
    /// when `with_defaults` is set.
    pub fn new(predicates: &[IgnorePredicate], with_defaults: bool) -> Result<Self> {
        let mut matchers = predicates
            .iter()
            .map(Matcher::compile)
            .collect::<Result<Vec<_>>>()?;

        if with_defaults {
            matchers.extend(DEFAULT_IGNORES.iter().cloned().map(Matcher::Matches));
        }

        Ok(Self { matchers })
    }

    /// Index of the first predicate matching `message`.
    pub fn first_match(&self, message: &str) -> Option<usize> {
        self.matchers.iter().position(|m| m.is_match(message))
    }

    /// Whether `message` should skip validation.
    pub fn should_ignore(&self, message: &str) -> bool {
        self.first_match(message).is_some()
    }

    /// Human-readable description of the predicate at `index`.
    pub fn describe(&self, index: usize) -> Option<String> {
        self.matchers.get(index).map(Matcher::describe)
    }

    /// Descriptions of every predicate, in evaluation order.
    pub fn descriptions(&self) -> Vec<String> {
        self.matchers.iter().map(Matcher::describe).collect()
    }

    /// Number of predicates.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether there are no predicates.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClintConfig;
    use crate::error::ClintError;

    fn default_set() -> IgnoreSet {
        let config = ClintConfig::default();
        IgnoreSet::new(&config.ignores, config.default_ignores).unwrap()
    }

    #[test]
    fn test_empty_message_ignored() {
        let set = default_set();
        assert_eq!(set.first_match(""), Some(0));
    }

    #[test]
    fn test_whitespace_only_is_not_empty() {
        let set = default_set();
        assert!(!set.should_ignore(" "));
        assert!(!set.should_ignore("\n"));
    }

    #[test]
    fn test_merge_substrings_ignored() {
        let set = default_set();
        assert_eq!(set.first_match("Merge branch 'main' into feature"), Some(1));
        assert_eq!(set.first_match("chore: merge upstream changes"), Some(2));
        // Coarse on purpose: any occurrence counts.
        assert!(set.should_ignore("submerge feature"));
        assert!(set.should_ignore("feat: add login\n\nmerged after review"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let set = default_set();
        assert!(!set.should_ignore("MERGE everything"));
        assert!(!set.should_ignore("feat: add login"));
        assert!(!set.should_ignore("wip: quick fix"));
    }

    #[test]
    fn test_revert_not_ignored_without_defaults() {
        let set = default_set();
        assert!(!set.should_ignore("Revert \"feat: add login\""));
    }

    #[test]
    fn test_default_ignores() {
        let set = IgnoreSet::new(&[], true).unwrap();
        assert!(set.should_ignore("Merge pull request #42 from user/branch"));
        assert!(set.should_ignore("Revert \"feat: add login\""));
        assert!(set.should_ignore("fixup! feat: add login"));
        assert!(set.should_ignore("Automatic merge from release"));
        assert!(!set.should_ignore("feat: add login"));
    }

    #[test]
    fn test_default_ignores_skip_release_versions() {
        let set = IgnoreSet::new(&[], true).unwrap();
        assert!(set.should_ignore("1.2.3"));
        assert!(set.should_ignore("v1.2.3"));
        assert!(set.should_ignore("v2.0.0-rc.1\n\nRelease notes follow"));
        assert!(set.should_ignore("1.0.0+build.5"));
        assert!(!set.should_ignore("1.2"));
        assert!(!set.should_ignore("v1.2.3 is out"));
        assert!(!set.should_ignore("chore: release 1.2.3"));

        // Off by default.
        assert!(!default_set().should_ignore("1.2.3"));
    }

    #[test]
    fn test_regex_predicate() {
        let set = IgnoreSet::new(
            &[IgnorePredicate::Matches {
                pattern: r"^Release v\d+".to_string(),
            }],
            false,
        )
        .unwrap();
        assert!(set.should_ignore("Release v1.2.0"));
        assert!(!set.should_ignore("chore: Release v1.2.0"));
        assert_eq!(set.describe(0).unwrap(), r"message matches /^Release v\d+/");
    }

    #[test]
    fn test_invalid_regex_is_config_error() {
        let err = IgnoreSet::new(
            &[IgnorePredicate::Matches {
                pattern: "(".to_string(),
            }],
            false,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClintError::Config(ConfigError::InvalidIgnore { .. })
        ));
    }

    #[test]
    fn test_descriptions_in_order() {
        let set = default_set();
        assert_eq!(
            set.descriptions(),
            vec![
                "message is empty",
                "message contains 'Merge'",
                "message contains 'merge'"
            ]
        );
    }
}
