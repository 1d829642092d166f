// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::config::Severity;
use console::{style, Style};

/// A single validation issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Name of the rule that fired.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Warning or Error. Disabled rules never produce issues.
    pub level: Severity,
}

impl ValidationIssue {
    /// Whether this issue fails the message.
    pub fn is_error(&self) -> bool {
        self.level == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let (prefix, code_style) = if self.is_error() {
            (style("✗").red().bold(), Style::new().red())
        } else {
            (style("⚠").yellow().bold(), Style::new().yellow())
        };

        format!(
            "{} {} [{}]",
            prefix,
            self.message,
            code_style.apply_to(&self.code)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.code,
            "level": self.level.level(),
            "message": self.message,
        })
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The original message.
    pub message: String,
    /// Commit SHA if validating an existing commit.
    pub commit_sha: Option<String>,
    /// Why the message was skipped, if an ignore predicate matched.
    pub ignored_by: Option<String>,
    /// Validation errors.
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            commit_sha: None,
            ignored_by: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an issue under errors or warnings according to its level.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.level {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Disabled => {}
        }
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether an ignore predicate skipped this message.
    pub fn is_ignored(&self) -> bool {
        self.ignored_by.is_some()
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether the given rule produced an issue.
    pub fn has_issue(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|i| i.code == code)
    }

    /// Render in text format.
    pub fn render_text(&self, help_url: Option<&str>) -> String {
        let mut lines = Vec::new();

        let first_line = self.message.lines().next().unwrap_or("");
        let status = if self.is_ignored() {
            style("○").dim()
        } else if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };

        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                lines.push(format!("{} {} {}", status, style(short_sha).cyan(), first_line));
            }
            None => lines.push(format!("{} {}", status, first_line)),
        }

        if let Some(ref reason) = self.ignored_by {
            lines.push(format!("  {}", style(format!("ignored: {}", reason)).dim()));
        }

        for error in &self.errors {
            lines.push(format!("  {}", error.format()));
        }

        for warning in &self.warnings {
            lines.push(format!("  {}", warning.format()));
        }

        if !self.is_ignored() && self.issue_count() > 0 {
            lines.push(format!("  {}", style(self.summary()).bold()));
            if let Some(url) = help_url {
                lines.push(format!("  {} {}", style("→").dim(), style(url).dim()));
            }
        }

        lines.join("\n")
    }

    /// Render in JSON format.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.is_ignored(),
            "ignored_by": self.ignored_by,
            "commit": self.commit_sha,
            "input": self.message,
            "errors": self.errors.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_ignored() {
            "Ignored".to_string()
        } else if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(code: &str, level: Severity) -> ValidationIssue {
        ValidationIssue {
            code: code.to_string(),
            message: format!("{} fired", code),
            level,
        }
    }

    #[test]
    fn test_validation_result_valid() {
        let result = ValidationResult::new("feat: test");
        assert!(result.is_valid());
        assert!(!result.is_ignored());
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn test_push_sorts_by_level() {
        let mut result = ValidationResult::new("wip: test");
        result.push(issue("type-enum", Severity::Error));
        result.push(issue("body-leading-blank", Severity::Warning));
        result.push(issue("ignored", Severity::Disabled));

        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.has_issue("type-enum"));
        assert!(!result.has_issue("ignored"));
    }

    #[test]
    fn test_validation_issue_format() {
        let formatted = issue("type-enum", Severity::Error).format();
        assert!(formatted.contains("type-enum"));
        assert!(formatted.contains("type-enum fired"));
    }

    #[test]
    fn test_summary() {
        let mut result = ValidationResult::new("test");
        assert_eq!(result.summary(), "Valid");

        result.push(issue("warn", Severity::Warning));
        assert!(result.summary().contains("1 warnings"));

        result.push(issue("err", Severity::Error));
        assert!(result.summary().starts_with("Invalid"));
    }

    #[test]
    fn test_ignored_summary_and_text() {
        let mut result = ValidationResult::new("Merge branch 'main'");
        result.ignored_by = Some("message contains 'Merge'".to_string());
        assert!(result.is_valid());
        assert_eq!(result.summary(), "Ignored");
        assert!(result.render_text(None).contains("ignored: message contains 'Merge'"));
    }

    #[test]
    fn test_render_text_includes_help_url() {
        let mut result = ValidationResult::new("wip: quick fix");
        result.push(issue("type-enum", Severity::Error));
        let text = result.render_text(Some("https://example.com/help"));
        assert!(text.contains("https://example.com/help"));
        assert!(text.contains("Invalid (1 errors, 0 warnings)"));
    }

    #[test]
    fn test_json_shape() {
        let mut result = ValidationResult::new("wip: quick fix");
        result.push(issue("type-enum", Severity::Error));
        let json = result.to_json();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["rule"], "type-enum");
        assert_eq!(json["errors"][0]["level"], 2);
    }
}
