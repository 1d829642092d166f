// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in rule presets, loaded through `extends`.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

use super::schema::{Applicability, ClintConfig, RuleSpec, RuleValue, Severity};

/// Identifier of the conventional-commits preset.
pub const CONVENTIONAL: &str = "@commitlint/config-conventional";

/// Short alias accepted for [`CONVENTIONAL`].
const CONVENTIONAL_ALIAS: &str = "conventional";

/// Names of all known presets.
pub fn known_presets() -> &'static [&'static str] {
    &[CONVENTIONAL, CONVENTIONAL_ALIAS]
}

/// Look up a preset by identifier.
pub fn preset(name: &str) -> Result<BTreeMap<String, RuleSpec>> {
    match name {
        CONVENTIONAL | CONVENTIONAL_ALIAS => Ok(conventional()),
        _ => Err(ConfigError::UnknownPreset {
            name: name.to_string(),
            known: known_presets().join(", "),
        }
        .into()),
    }
}

/// Resolve `extends` in order, then apply the configuration's own rules.
///
/// A rule named again later replaces the earlier setting entirely.
pub fn resolve_rules(config: &ClintConfig) -> Result<BTreeMap<String, RuleSpec>> {
    let mut resolved = BTreeMap::new();

    for name in &config.extends {
        tracing::debug!("Loading preset: {}", name);
        resolved.extend(preset(name)?);
    }

    for (name, spec) in &config.rules {
        if resolved.insert(name.clone(), spec.clone()).is_some() {
            tracing::debug!("Rule '{}' overridden by configuration", name);
        }
    }

    Ok(resolved)
}

fn list(items: &[&str]) -> RuleValue {
    RuleValue::List(items.iter().map(|s| s.to_string()).collect())
}

fn conventional() -> BTreeMap<String, RuleSpec> {
    use Applicability::{Always, Never};
    use Severity::{Error, Warning};

    let rules = [
        ("body-leading-blank", RuleSpec::new(Warning, Always)),
        (
            "body-max-line-length",
            RuleSpec::new(Error, Always).with_value(RuleValue::Number(100)),
        ),
        ("footer-leading-blank", RuleSpec::new(Warning, Always)),
        (
            "footer-max-line-length",
            RuleSpec::new(Error, Always).with_value(RuleValue::Number(100)),
        ),
        (
            "header-max-length",
            RuleSpec::new(Error, Always).with_value(RuleValue::Number(100)),
        ),
        ("header-trim", RuleSpec::new(Error, Always)),
        (
            "subject-case",
            RuleSpec::new(Error, Never).with_value(list(&[
                "sentence-case",
                "start-case",
                "pascal-case",
                "upper-case",
            ])),
        ),
        ("subject-empty", RuleSpec::new(Error, Never)),
        (
            "subject-full-stop",
            RuleSpec::new(Error, Never).with_value(RuleValue::Text(".".to_string())),
        ),
        (
            "type-case",
            RuleSpec::new(Error, Always).with_value(RuleValue::Text("lower-case".to_string())),
        ),
        ("type-empty", RuleSpec::new(Error, Never)),
        (
            "type-enum",
            RuleSpec::new(Error, Always).with_value(list(&[
                "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert",
                "style", "test",
            ])),
        ),
    ];

    rules
        .into_iter()
        .map(|(name, spec)| (name.to_string(), spec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClintError;

    #[test]
    fn test_conventional_preset() {
        let rules = preset(CONVENTIONAL).unwrap();
        assert_eq!(rules.len(), 12);
        assert_eq!(rules["header-max-length"].value, Some(RuleValue::Number(100)));
        assert_eq!(rules["body-leading-blank"].severity, Severity::Warning);
    }

    #[test]
    fn test_alias_matches_full_name() {
        assert_eq!(preset("conventional").unwrap(), preset(CONVENTIONAL).unwrap());
    }

    #[test]
    fn test_unknown_preset() {
        let err = preset("@commitlint/config-angular").unwrap_err();
        assert!(err.to_string().contains(CONVENTIONAL));
        assert!(matches!(
            err,
            ClintError::Config(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_overrides_replace_preset_rules() {
        let config = ClintConfig::default();
        let resolved = resolve_rules(&config).unwrap();

        let allowed = resolved["type-enum"].value.as_ref().unwrap().as_list().unwrap();
        assert_eq!(allowed.first(), Some(&"feat"));
        assert_eq!(allowed.last(), Some(&"revert"));
        assert_eq!(allowed.len(), 11);

        // Untouched preset rules survive.
        assert!(resolved.contains_key("subject-case"));
    }

    #[test]
    fn test_no_extends_keeps_only_own_rules() {
        let config = ClintConfig {
            extends: Vec::new(),
            ..ClintConfig::default()
        };
        let resolved = resolve_rules(&config).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(resolved.contains_key("type-enum"));
    }
}
