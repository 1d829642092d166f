// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Each rule states a condition about one part of the message. The engine
//! requires the condition for `always` and its negation for `never`.

use std::sync::Arc;

use crate::commit::CommitMessage;
use crate::config::{Applicability, RuleValue};

use super::case::TextCase;

/// The shape of value a rule expects as the third tuple element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// No value is read.
    None,
    /// A character count.
    Length,
    /// A non-empty list of allowed strings.
    List,
    /// One case name or a non-empty list of them.
    Case,
    /// An optional string.
    Text,
}

/// Trait for validation rules.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name, as used in configuration.
    fn name(&self) -> &str;

    /// The value shape this rule accepts.
    fn value_kind(&self) -> ValueKind {
        ValueKind::None
    }

    /// Evaluate the rule's condition. `None` means the rule does not apply
    /// to this message and passes regardless of applicability.
    fn condition(&self, message: &CommitMessage, value: Option<&RuleValue>) -> Option<bool>;

    /// Describe a violation for the report.
    fn describe(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> String;
}

/// The part of a commit message a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Type,
    Scope,
    Subject,
    Header,
    Body,
    Footer,
}

impl Part {
    fn as_str(&self) -> &'static str {
        match self {
            Part::Type => "type",
            Part::Scope => "scope",
            Part::Subject => "subject",
            Part::Header => "header",
            Part::Body => "body",
            Part::Footer => "footer",
        }
    }

    fn get<'a>(&self, message: &'a CommitMessage) -> Option<&'a str> {
        match self {
            Part::Type => message.commit_type.as_deref(),
            Part::Scope => message.scope.as_deref(),
            Part::Subject => message.subject.as_deref(),
            Part::Header => Some(message.header.as_str()),
            Part::Body => message.body.as_deref(),
            Part::Footer => message.footer.as_deref(),
        }
    }
}

fn must(when: Applicability) -> &'static str {
    match when {
        Applicability::Always => "must",
        Applicability::Never => "must not",
    }
}

fn list_of(value: Option<&RuleValue>) -> Vec<&str> {
    value.and_then(RuleValue::as_list).unwrap_or_default()
}

fn number_of(value: Option<&RuleValue>) -> usize {
    value.and_then(RuleValue::as_number).unwrap_or(usize::MAX)
}

/// `<part>-enum`: the part is one of the listed values.
#[derive(Debug)]
struct EnumRule {
    name: &'static str,
    part: Part,
}

impl Rule for EnumRule {
    fn name(&self) -> &str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::List
    }

    fn condition(&self, message: &CommitMessage, value: Option<&RuleValue>) -> Option<bool> {
        let text = self.part.get(message)?;
        let allowed = list_of(value);

        // Scopes may list several entries: `feat(api,cli): ...`.
        let holds = if self.part == Part::Scope {
            text.split([',', '/', '\\'])
                .map(str::trim)
                .all(|s| allowed.contains(&s))
        } else {
            allowed.contains(&text)
        };
        Some(holds)
    }

    fn describe(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> String {
        format!(
            "{} {} be one of [{}] (found '{}')",
            self.part.as_str(),
            must(when),
            list_of(value).join(", "),
            self.part.get(message).unwrap_or("")
        )
    }
}

/// `<part>-empty`: the part is missing or blank.
#[derive(Debug)]
struct EmptyRule {
    name: &'static str,
    part: Part,
}

impl Rule for EmptyRule {
    fn name(&self) -> &str {
        self.name
    }

    fn condition(&self, message: &CommitMessage, _value: Option<&RuleValue>) -> Option<bool> {
        Some(
            self.part
                .get(message)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true),
        )
    }

    fn describe(&self, _: &CommitMessage, when: Applicability, _: Option<&RuleValue>) -> String {
        match when {
            Applicability::Always => format!("{} must be empty", self.part.as_str()),
            Applicability::Never => format!("{} may not be empty", self.part.as_str()),
        }
    }
}

/// `<part>-case`: the part is written in one of the listed cases.
#[derive(Debug)]
struct CaseRule {
    name: &'static str,
    part: Part,
}

impl CaseRule {
    fn cases(value: Option<&RuleValue>) -> Vec<TextCase> {
        list_of(value)
            .into_iter()
            .filter_map(|c| c.parse().ok())
            .collect()
    }
}

impl Rule for CaseRule {
    fn name(&self) -> &str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Case
    }

    fn condition(&self, message: &CommitMessage, value: Option<&RuleValue>) -> Option<bool> {
        let text = self.part.get(message)?;
        Some(Self::cases(value).iter().any(|case| case.matches(text)))
    }

    fn describe(
        &self,
        _: &CommitMessage,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> String {
        let names: Vec<&str> = Self::cases(value).iter().map(TextCase::as_str).collect();
        format!(
            "{} {} be {}",
            self.part.as_str(),
            must(when),
            names.join(" or ")
        )
    }
}

/// `<part>-max-length`: the part has at most N characters.
#[derive(Debug)]
struct MaxLengthRule {
    name: &'static str,
    part: Part,
}

impl Rule for MaxLengthRule {
    fn name(&self) -> &str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Length
    }

    fn condition(&self, message: &CommitMessage, value: Option<&RuleValue>) -> Option<bool> {
        let text = self.part.get(message)?;
        Some(text.chars().count() <= number_of(value))
    }

    fn describe(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> String {
        let len = self.part.get(message).map(|s| s.chars().count()).unwrap_or(0);
        format!(
            "{} {} be longer than {} characters, current length is {}",
            self.part.as_str(),
            match when {
                Applicability::Always => "must not",
                Applicability::Never => "must",
            },
            number_of(value),
            len
        )
    }
}

/// `<part>-min-length`: the part has at least N characters.
#[derive(Debug)]
struct MinLengthRule {
    name: &'static str,
    part: Part,
}

impl Rule for MinLengthRule {
    fn name(&self) -> &str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Length
    }

    fn condition(&self, message: &CommitMessage, value: Option<&RuleValue>) -> Option<bool> {
        let text = self.part.get(message)?;
        let min = value.and_then(RuleValue::as_number).unwrap_or(0);
        Some(text.chars().count() >= min)
    }

    fn describe(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> String {
        let len = self.part.get(message).map(|s| s.chars().count()).unwrap_or(0);
        format!(
            "{} {} be shorter than {} characters, current length is {}",
            self.part.as_str(),
            match when {
                Applicability::Always => "must not",
                Applicability::Never => "must",
            },
            value.and_then(RuleValue::as_number).unwrap_or(0),
            len
        )
    }
}

/// `<part>-max-line-length`: every line of the part has at most N characters.
#[derive(Debug)]
struct MaxLineLengthRule {
    name: &'static str,
    part: Part,
}

impl Rule for MaxLineLengthRule {
    fn name(&self) -> &str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Length
    }

    fn condition(&self, message: &CommitMessage, value: Option<&RuleValue>) -> Option<bool> {
        let text = self.part.get(message)?;
        let max = number_of(value);
        Some(text.lines().all(|line| line.chars().count() <= max))
    }

    fn describe(
        &self,
        _: &CommitMessage,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> String {
        format!(
            "{}'s lines {} be longer than {} characters",
            self.part.as_str(),
            match when {
                Applicability::Always => "must not",
                Applicability::Never => "must",
            },
            number_of(value)
        )
    }
}

/// `<part>-full-stop`: the part ends with the given character (default `.`).
#[derive(Debug)]
struct FullStopRule {
    name: &'static str,
    part: Part,
}

impl FullStopRule {
    fn stop(value: Option<&RuleValue>) -> &str {
        value.and_then(RuleValue::as_text).unwrap_or(".")
    }
}

impl Rule for FullStopRule {
    fn name(&self) -> &str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn condition(&self, message: &CommitMessage, value: Option<&RuleValue>) -> Option<bool> {
        let text = self.part.get(message)?;
        Some(text.ends_with(Self::stop(value)))
    }

    fn describe(
        &self,
        _: &CommitMessage,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> String {
        match when {
            Applicability::Always => format!(
                "{} must end with '{}'",
                self.part.as_str(),
                Self::stop(value)
            ),
            Applicability::Never => format!(
                "{} may not end with '{}'",
                self.part.as_str(),
                Self::stop(value)
            ),
        }
    }
}

/// `<part>-leading-blank`: the part is preceded by a blank line.
#[derive(Debug)]
struct LeadingBlankRule {
    name: &'static str,
    part: Part,
}

impl Rule for LeadingBlankRule {
    fn name(&self) -> &str {
        self.name
    }

    fn condition(&self, message: &CommitMessage, _value: Option<&RuleValue>) -> Option<bool> {
        self.part.get(message)?;
        match self.part {
            Part::Footer => Some(message.footer_leading_blank),
            _ => Some(message.body_leading_blank),
        }
    }

    fn describe(&self, _: &CommitMessage, when: Applicability, _: Option<&RuleValue>) -> String {
        format!("{} {} have leading blank line", self.part.as_str(), must(when))
    }
}

/// `header-trim`: the header has no surrounding whitespace.
#[derive(Debug)]
struct HeaderTrimRule;

impl Rule for HeaderTrimRule {
    fn name(&self) -> &str {
        "header-trim"
    }

    fn condition(&self, message: &CommitMessage, _value: Option<&RuleValue>) -> Option<bool> {
        Some(message.header == message.header.trim())
    }

    fn describe(&self, _: &CommitMessage, when: Applicability, _: Option<&RuleValue>) -> String {
        format!("header {} be trimmed", must(when))
    }
}

/// All built-in rules.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(EnumRule {
            name: "type-enum",
            part: Part::Type,
        }),
        Arc::new(EmptyRule {
            name: "type-empty",
            part: Part::Type,
        }),
        Arc::new(CaseRule {
            name: "type-case",
            part: Part::Type,
        }),
        Arc::new(MaxLengthRule {
            name: "type-max-length",
            part: Part::Type,
        }),
        Arc::new(MinLengthRule {
            name: "type-min-length",
            part: Part::Type,
        }),
        Arc::new(EnumRule {
            name: "scope-enum",
            part: Part::Scope,
        }),
        Arc::new(EmptyRule {
            name: "scope-empty",
            part: Part::Scope,
        }),
        Arc::new(CaseRule {
            name: "scope-case",
            part: Part::Scope,
        }),
        Arc::new(EmptyRule {
            name: "subject-empty",
            part: Part::Subject,
        }),
        Arc::new(CaseRule {
            name: "subject-case",
            part: Part::Subject,
        }),
        Arc::new(FullStopRule {
            name: "subject-full-stop",
            part: Part::Subject,
        }),
        Arc::new(MaxLengthRule {
            name: "subject-max-length",
            part: Part::Subject,
        }),
        Arc::new(MinLengthRule {
            name: "subject-min-length",
            part: Part::Subject,
        }),
        Arc::new(MaxLengthRule {
            name: "header-max-length",
            part: Part::Header,
        }),
        Arc::new(MinLengthRule {
            name: "header-min-length",
            part: Part::Header,
        }),
        Arc::new(HeaderTrimRule),
        Arc::new(LeadingBlankRule {
            name: "body-leading-blank",
            part: Part::Body,
        }),
        Arc::new(EmptyRule {
            name: "body-empty",
            part: Part::Body,
        }),
        Arc::new(MaxLineLengthRule {
            name: "body-max-line-length",
            part: Part::Body,
        }),
        Arc::new(LeadingBlankRule {
            name: "footer-leading-blank",
            part: Part::Footer,
        }),
        Arc::new(EmptyRule {
            name: "footer-empty",
            part: Part::Footer,
        }),
        Arc::new(MaxLineLengthRule {
            name: "footer-max-line-length",
            part: Part::Footer,
        }),
    ]
}
