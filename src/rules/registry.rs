// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule registry and rule-table validation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{RuleSpec, RuleValue};
use crate::error::{ConfigError, Result};

use super::builtin::{builtin_rules, Rule, ValueKind};
use super::case::TextCase;

/// Rules known by name.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Arc<dyn Rule>>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl RuleRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in rule.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for rule in builtin_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Add a rule. A rule with the same name is replaced.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.insert(rule.name().to_string(), rule);
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }

    /// Names of all registered rules, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Check that `name` is registered and `spec` carries a value of the
    /// shape the rule expects. Disabled rules only need a known name.
    pub fn validate(&self, name: &str, spec: &RuleSpec) -> Result<()> {
        let rule = self.get(name).ok_or_else(|| ConfigError::UnknownRule {
            rule: name.to_string(),
        })?;

        if !spec.is_enabled() {
            return Ok(());
        }

        let invalid = |message: &str| -> Result<()> {
            Err(ConfigError::InvalidValue {
                rule: name.to_string(),
                message: message.to_string(),
            }
            .into())
        };

        match (rule.value_kind(), spec.value.as_ref()) {
            (ValueKind::None, _) => Ok(()),
            (ValueKind::Length, Some(RuleValue::Number(_))) => Ok(()),
            (ValueKind::Length, _) => invalid("expected a length"),
            (ValueKind::List, Some(RuleValue::List(items))) if !items.is_empty() => Ok(()),
            (ValueKind::List, _) => invalid("expected a non-empty list of values"),
            (ValueKind::Case, Some(value)) => match value.as_list() {
                Some(cases) if !cases.is_empty() => {
                    match cases.iter().find(|c| c.parse::<TextCase>().is_err()) {
                        Some(unknown) => invalid(&format!("unknown case '{}'", unknown)),
                        None => Ok(()),
                    }
                }
                _ => invalid("expected a case name or a non-empty list of case names"),
            },
            (ValueKind::Case, None) => invalid("expected a case name or a list of case names"),
            (ValueKind::Text, None | Some(RuleValue::Text(_))) => Ok(()),
            (ValueKind::Text, _) => invalid("expected a string"),
        }
    }
}
