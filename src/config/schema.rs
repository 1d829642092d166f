// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from clint.toml.
//! A rule is written the way commitlint users expect it:
//!
//! ```toml
//! [rules]
//! type-enum = [2, "always", ["feat", "fix"]]
//! header-max-length = ["warning", "always", 72]
//! body-leading-blank = [0]
//! ```

use serde::de::{self, Deserializer, SeqAccess, Unexpected, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::presets::CONVENTIONAL;

/// The main configuration structure for clint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClintConfig {
    /// Presets to load, in order. Later presets override earlier ones.
    pub extends: Vec<String>,

    /// Whether the upstream linter's built-in ignore patterns are appended.
    pub default_ignores: bool,

    /// URL printed under failing results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Rule overrides, applied on top of every preset.
    pub rules: BTreeMap<String, RuleSpec>,

    /// Predicates deciding which messages skip validation entirely.
    pub ignores: Vec<IgnorePredicate>,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl Default for ClintConfig {
    fn default() -> Self {
        let allowed = CommitType::all()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();

        let mut rules = BTreeMap::new();
        rules.insert(
            "type-enum".to_string(),
            RuleSpec::new(Severity::Error, Applicability::Always)
                .with_value(RuleValue::List(allowed)),
        );

        Self {
            extends: vec![CONVENTIONAL.to_string()],
            default_ignores: false,
            help_url: None,
            rules,
            ignores: vec![
                IgnorePredicate::Empty,
                IgnorePredicate::Contains {
                    pattern: "Merge".to_string(),
                },
                IgnorePredicate::Contains {
                    pattern: "merge".to_string(),
                },
            ],
            ui: UiConfig::default(),
        }
    }
}

impl ClintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// How severe a rule violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Disabled = 0,
    Warning = 1,
    Error = 2,
}

impl Severity {
    /// Map a numeric level (0, 1, 2) to a severity.
    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            0 => Some(Severity::Disabled),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    /// The numeric level used in configuration files.
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Disabled => "off",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "off" | "disabled" => Ok(Severity::Disabled),
            "1" | "warn" | "warning" => Ok(Severity::Warning),
            "2" | "error" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeverityVisitor;

        impl<'de> Visitor<'de> for SeverityVisitor {
            type Value = Severity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a severity: 0, 1, 2, \"off\", \"warning\" or \"error\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Severity, E> {
                Severity::from_level(v).ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Severity, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(Severity::from_level)
                    .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Severity, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The third element of a rule tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(usize),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    /// The value as a length limit, if it is a number.
    pub fn as_number(&self) -> Option<usize> {
        match self {
            RuleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a single string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a list of strings. A single string counts as a list of one.
    pub fn as_list(&self) -> Option<Vec<&str>> {
        match self {
            RuleValue::List(items) => Some(items.iter().map(String::as_str).collect()),
            RuleValue::Text(s) => Some(vec![s.as_str()]),
            RuleValue::Number(_) => None,
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Number(n) => write!(f, "{}", n),
            RuleValue::Text(s) => write!(f, "{}", s),
            RuleValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A rule setting: `[severity, applicability, value]`.
///
/// Applicability and value may be omitted; applicability then defaults to
/// `always`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub severity: Severity,
    pub when: Applicability,
    pub value: Option<RuleValue>,
}

impl RuleSpec {
    /// Create a rule setting without a value.
    pub fn new(severity: Severity, when: Applicability) -> Self {
        Self {
            severity,
            when,
            value: None,
        }
    }

    /// Set the value.
    pub fn with_value(mut self, value: RuleValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Whether the rule takes part in linting at all.
    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Disabled
    }
}

impl Serialize for RuleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        seq.serialize_element(&self.when)?;
        if let Some(ref value) = self.value {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleSpecVisitor;

        impl<'de> Visitor<'de> for RuleSpecVisitor {
            type Value = RuleSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array [severity, applicability, value] with 1 to 3 elements")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RuleSpec, A::Error> {
                let severity = seq
                    .next_element::<Severity>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let when = seq.next_element::<Applicability>()?.unwrap_or_default();
                let value = seq.next_element::<RuleValue>()?;

                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }

                Ok(RuleSpec {
                    severity,
                    when,
                    value,
                })
            }
        }

        deserializer.deserialize_seq(RuleSpecVisitor)
    }
}

/// A predicate over the raw commit message. A match skips all rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IgnorePredicate {
    /// The message is exactly the empty string.
    Empty,
    /// The message contains `pattern` (case-sensitive).
    Contains { pattern: String },
    /// The message matches the regular expression `pattern`.
    Matches { pattern: String },
}

/// UI/UX configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// The commit types accepted by the default configuration, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    /// Get the string representation of the commit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
        }
    }

    /// Get all commit types, in configuration order.
    pub fn all() -> &'static [CommitType] {
        &[
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Docs,
            CommitType::Style,
            CommitType::Refactor,
            CommitType::Perf,
            CommitType::Test,
            CommitType::Build,
            CommitType::Ci,
            CommitType::Chore,
            CommitType::Revert,
        ]
    }
}
