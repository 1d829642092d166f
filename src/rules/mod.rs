// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! Rules are looked up by name in a [`RuleRegistry`], configured by the
//! resolved rule table and evaluated by the [`RuleEngine`] against a parsed
//! [`crate::commit::CommitMessage`].

mod builtin;
mod case;
mod engine;
mod registry;
mod validator;

pub use builtin::{builtin_rules, Rule, ValueKind};
pub use case::TextCase;
pub use engine::RuleEngine;
pub use registry::RuleRegistry;
pub use validator::{ValidationIssue, ValidationResult};
