// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Conventional header: `type(scope)!: subject`.
    static ref HEADER_REGEX: Regex =
        Regex::new(r"^(?P<type>\w*)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?: (?P<subject>.*)$")
            .unwrap();

    /// A footer trailer: `Token: value`, `Token #value` or `BREAKING CHANGE: value`.
    static ref TRAILER_REGEX: Regex =
        Regex::new(r"^(?:BREAKING[ -]CHANGE|[\w-]+)(?:: | #)").unwrap();

    /// Git's cut line for `commit --verbose`; everything below it is dropped.
    static ref SCISSORS_REGEX: Regex =
        Regex::new(r"^# -+ >8 -+$").unwrap();
}

/// A commit message split into its conventional parts.
///
/// Parsing never fails: parts that cannot be found are `None`, and the
/// rules decide whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// The message as given.
    pub raw: String,
    /// First line.
    pub header: String,
    /// Commit type (feat, fix, etc.).
    pub commit_type: Option<String>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line text after `: `.
    pub subject: Option<String>,
    /// Free text between header and footer.
    pub body: Option<String>,
    /// Trailing block of trailers.
    pub footer: Option<String>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    /// Whether the body (if any) is separated from the header by a blank line.
    pub body_leading_blank: bool,
    /// Whether the footer (if any) is separated from the text above by a blank line.
    pub footer_leading_blank: bool,
}

impl CommitMessage {
    /// Parse a commit message from a string.
    pub fn parse(message: &str) -> Self {
        let lines: Vec<&str> = message.lines().collect();
        let header = lines.first().copied().unwrap_or("").to_string();
        let rest: &[&str] = if lines.len() > 1 { &lines[1..] } else { &[] };

        let captures = HEADER_REGEX.captures(&header);
        let part = |name: &str| {
            captures
                .as_ref()
                .and_then(|c| c.name(name))
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty())
        };
        let commit_type = part("type");
        let scope = part("scope");
        let subject = part("subject");
        let header_breaking = captures
            .as_ref()
            .map(|c| c.name("breaking").is_some())
            .unwrap_or(false);

        let footer_start = find_footer_start(rest);
        let (body_lines, footer_lines) = rest.split_at(footer_start);

        let body = join_trimmed(body_lines);
        let footer = join_trimmed(footer_lines);

        let body_leading_blank =
            body.is_none() || rest.first().map(|l| l.trim().is_empty()).unwrap_or(true);
        let footer_leading_blank = footer.is_none()
            || (footer_start > 0 && rest[footer_start - 1].trim().is_empty());

        let footer_breaking = footer_lines
            .iter()
            .any(|l| l.starts_with("BREAKING CHANGE:") || l.starts_with("BREAKING-CHANGE:"));

        Self {
            raw: message.to_string(),
            header,
            commit_type,
            scope,
            subject,
            body,
            footer,
            is_breaking: header_breaking || footer_breaking,
            body_leading_blank,
            footer_leading_blank,
        }
    }
}

/// Index into `lines` where the footer begins, or `lines.len()` if there is none.
///
/// The footer is the first trailer line after which every line is a
/// trailer, blank, or an indented continuation.
fn find_footer_start(lines: &[&str]) -> usize {
    let is_footer_line = |l: &&str| {
        TRAILER_REGEX.is_match(l) || l.trim().is_empty() || l.starts_with(char::is_whitespace)
    };

    (0..lines.len())
        .find(|&i| TRAILER_REGEX.is_match(lines[i]) && lines[i..].iter().all(is_footer_line))
        .unwrap_or(lines.len())
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Remove git comment lines, and everything below a scissors line.
pub fn strip_comments(message: &str) -> String {
    let mut kept = Vec::new();
    for line in message.lines() {
        if SCISSORS_REGEX.is_match(line) {
            break;
        }
        if !line.starts_with('#') {
            kept.push(line);
        }
    }
    kept.join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_header() {
        let msg = CommitMessage::parse("feat: add login");
        assert_eq!(msg.header, "feat: add login");
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
        assert_eq!(msg.subject.as_deref(), Some("add login"));
        assert!(msg.scope.is_none());
        assert!(msg.body.is_none());
        assert!(msg.footer.is_none());
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_parse_scope_and_breaking() {
        let msg = CommitMessage::parse("fix(core)!: drop legacy api");
        assert_eq!(msg.commit_type.as_deref(), Some("fix"));
        assert_eq!(msg.scope.as_deref(), Some("core"));
        assert_eq!(msg.subject.as_deref(), Some("drop legacy api"));
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_parse_non_conventional() {
        let msg = CommitMessage::parse("not a conventional commit");
        assert!(msg.commit_type.is_none());
        assert!(msg.subject.is_none());
        assert_eq!(msg.header, "not a conventional commit");
    }

    #[test]
    fn test_parse_empty_type() {
        let msg = CommitMessage::parse(": no type here");
        assert!(msg.commit_type.is_none());
        assert_eq!(msg.subject.as_deref(), Some("no type here"));
    }

    #[test]
    fn test_parse_body_and_footer() {
        let msg = CommitMessage::parse(
            "fix: handle timeouts\n\nRetry twice before giving up.\nLog the last error.\n\nCloses #12\nReviewed-by: Sam",
        );
        assert_eq!(
            msg.body.as_deref(),
            Some("Retry twice before giving up.\nLog the last error.")
        );
        assert_eq!(msg.footer.as_deref(), Some("Closes #12\nReviewed-by: Sam"));
        assert!(msg.body_leading_blank);
        assert!(msg.footer_leading_blank);
    }

    #[test]
    fn test_parse_footer_only() {
        let msg = CommitMessage::parse("feat: new flag\n\nBREAKING CHANGE: flag renamed");
        assert!(msg.body.is_none());
        assert_eq!(msg.footer.as_deref(), Some("BREAKING CHANGE: flag renamed"));
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_body_without_blank_line() {
        let msg = CommitMessage::parse("feat: thing\nbody starts right away");
        assert_eq!(msg.body.as_deref(), Some("body starts right away"));
        assert!(!msg.body_leading_blank);
    }

    #[test]
    fn test_footer_without_blank_line() {
        let msg = CommitMessage::parse("feat: thing\n\nsome body\nRefs: #4");
        assert_eq!(msg.body.as_deref(), Some("some body"));
        assert_eq!(msg.footer.as_deref(), Some("Refs: #4"));
        assert!(!msg.footer_leading_blank);
    }

    #[test]
    fn test_colon_in_body_is_not_footer() {
        let msg = CommitMessage::parse("docs: readme\n\nNote: this is prose.\nMore prose here.");
        assert!(msg.footer.is_none());
        assert!(msg.body.unwrap().contains("More prose"));
    }

    #[test]
    fn test_strip_comments() {
        let raw = "feat: add login\n\n# Please enter the commit message\n# Lines starting with '#' are ignored\n";
        assert_eq!(strip_comments(raw), "feat: add login");
    }

    #[test]
    fn test_strip_comments_scissors() {
        let raw = "fix: bug\n\nbody\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        assert_eq!(strip_comments(raw), "fix: bug\n\nbody");
    }
}
