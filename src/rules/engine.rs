// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::commit::CommitMessage;
use crate::config::{resolve_rules, Applicability, ClintConfig, RuleSpec};
use crate::error::Result;
use crate::git;
use crate::ignore::IgnoreSet;

use super::builtin::Rule;
use super::registry::RuleRegistry;
use super::validator::{ValidationIssue, ValidationResult};

/// Rule engine for validating commit messages.
///
/// Built once from a configuration and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<(Arc<dyn Rule>, RuleSpec)>,
    resolved: BTreeMap<String, RuleSpec>,
    ignores: IgnoreSet,
    help_url: Option<String>,
}

impl RuleEngine {
    /// Create an engine from a configuration using the built-in rules.
    pub fn from_config(config: &ClintConfig) -> Result<Self> {
        Self::with_registry(config, &RuleRegistry::with_builtins())
    }

    /// Create an engine from a configuration and a custom rule registry.
    ///
    /// Fails on unknown presets, unknown rules, malformed rule values and
    /// invalid ignore patterns.
    pub fn with_registry(config: &ClintConfig, registry: &RuleRegistry) -> Result<Self> {
        let resolved = resolve_rules(config)?;

        let mut rules = Vec::new();
        for (name, spec) in &resolved {
            registry.validate(name, spec)?;
            if let Some(rule) = registry.get(name) {
                if spec.is_enabled() {
                    rules.push((Arc::clone(rule), spec.clone()));
                }
            }
        }

        let ignores = IgnoreSet::new(&config.ignores, config.default_ignores)?;

        tracing::debug!(
            "Rule engine ready: {} enabled rules, {} ignore predicates",
            rules.len(),
            ignores.len()
        );

        Ok(Self {
            rules,
            resolved,
            ignores,
            help_url: config.help_url.clone(),
        })
    }

    /// The resolved rule table, including disabled rules.
    pub fn resolved_rules(&self) -> &BTreeMap<String, RuleSpec> {
        &self.resolved
    }

    /// The compiled ignore predicates.
    pub fn ignores(&self) -> &IgnoreSet {
        &self.ignores
    }

    /// URL to print under failing results.
    pub fn help_url(&self) -> Option<&str> {
        self.help_url.as_deref()
    }

    /// Lint a raw commit message.
    ///
    /// Ignore predicates run first; a match returns a valid result without
    /// evaluating any rule.
    pub fn lint(&self, raw: &str) -> ValidationResult {
        let mut result = ValidationResult::new(raw);

        if let Some(index) = self.ignores.first_match(raw) {
            let reason = self.ignores.describe(index).unwrap_or_default();
            tracing::debug!("Message ignored: {}", reason);
            result.ignored_by = Some(reason);
            return result;
        }

        let message = CommitMessage::parse(raw);
        for (rule, spec) in &self.rules {
            if let Some(issue) = Self::evaluate(rule.as_ref(), spec, &message) {
                tracing::debug!("Rule '{}' fired at {}", issue.code, issue.level);
                result.push(issue);
            }
        }

        result
    }

    /// Evaluate a single rule against a parsed message.
    fn evaluate(rule: &dyn Rule, spec: &RuleSpec, message: &CommitMessage) -> Option<ValidationIssue> {
        let holds = rule.condition(message, spec.value.as_ref())?;
        let valid = match spec.when {
            Applicability::Always => holds,
            Applicability::Never => !holds,
        };

        if valid {
            None
        } else {
            Some(ValidationIssue {
                code: rule.name().to_string(),
                message: rule.describe(message, spec.when, spec.value.as_ref()),
                level: spec.severity,
            })
        }
    }

    /// Check a specific commit by reference.
    pub fn check_commit(&self, reference: &str) -> Result<ValidationResult> {
        let (sha, message) = git::get_commit(reference)?;
        let mut result = self.lint(&message);
        result.commit_sha = Some(sha);
        Ok(result)
    }

    /// Check every commit reachable from `to` but not from `from`.
    pub fn check_range(&self, from: &str, to: &str) -> Result<Vec<ValidationResult>> {
        let commits = git::get_commit_range(from, to)?;
        tracing::debug!("Checking {} commits in {}..{}", commits.len(), from, to);

        Ok(commits
            .into_iter()
            .map(|(sha, message)| {
                let mut result = self.lint(&message);
                result.commit_sha = Some(sha);
                result
            })
            .collect())
    }
}
