// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Text case checks used by the `*-case` rules.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// Quoted or backticked spans are exempt from case checks.
    static ref QUOTED_REGEX: Regex = Regex::new(r#"`[^`]*`|"[^"]*"|'[^']*'"#).unwrap();
}

/// A named text case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextCase {
    Lower,
    Upper,
    Sentence,
    Start,
    Pascal,
    Camel,
    Kebab,
    Snake,
}

impl TextCase {
    /// Get the configuration name of the case.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextCase::Lower => "lower-case",
            TextCase::Upper => "upper-case",
            TextCase::Sentence => "sentence-case",
            TextCase::Start => "start-case",
            TextCase::Pascal => "pascal-case",
            TextCase::Camel => "camel-case",
            TextCase::Kebab => "kebab-case",
            TextCase::Snake => "snake-case",
        }
    }

    /// Check whether `text` is written in this case.
    ///
    /// Quoted spans are removed first. Text that is then empty, or starts
    /// with a digit, is in every case.
    pub fn matches(&self, text: &str) -> bool {
        let stripped = QUOTED_REGEX.replace_all(text, "");
        let input = stripped.trim();

        match input.chars().next() {
            None => return true,
            Some(c) if c.is_ascii_digit() => return true,
            Some(_) => {}
        }

        match self {
            TextCase::Lower => input == input.to_lowercase(),
            TextCase::Upper => input == input.to_uppercase(),
            TextCase::Sentence => starts_upper(input),
            TextCase::Start => input
                .split(' ')
                .all(|word| starts_upper(word) && word.chars().all(char::is_alphanumeric)),
            TextCase::Pascal => starts_upper(input) && input.chars().all(char::is_alphanumeric),
            TextCase::Camel => !starts_upper(input) && input.chars().all(char::is_alphanumeric),
            TextCase::Kebab => is_delimited_lower(input, '-'),
            TextCase::Snake => is_delimited_lower(input, '_'),
        }
    }
}

/// True when the first character is unchanged by upper-casing it.
fn starts_upper(word: &str) -> bool {
    match word.chars().next() {
        Some(c) => c.to_uppercase().eq(std::iter::once(c)),
        None => false,
    }
}

fn is_delimited_lower(input: &str, delimiter: char) -> bool {
    input == input.to_lowercase()
        && input
            .split(delimiter)
            .all(|part| !part.is_empty() && part.chars().all(char::is_alphanumeric))
}

impl std::str::FromStr for TextCase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(TextCase::Lower),
            "upper-case" | "uppercase" => Ok(TextCase::Upper),
            "sentence-case" | "sentencecase" => Ok(TextCase::Sentence),
            "start-case" | "startcase" => Ok(TextCase::Start),
            "pascal-case" | "pascalcase" => Ok(TextCase::Pascal),
            "camel-case" | "camelcase" => Ok(TextCase::Camel),
            "kebab-case" | "kebabcase" => Ok(TextCase::Kebab),
            "snake-case" | "snakecase" => Ok(TextCase::Snake),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TextCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
