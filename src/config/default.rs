// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::ClintConfig;

/// Get the default configuration.
pub fn default_config() -> ClintConfig {
    ClintConfig::default()
}

/// The default configuration as a commented clint.toml, written by `clint init`.
pub fn example_config() -> &'static str {
    r#"# clint configuration

# Presets are loaded in order; [rules] below override them.
extends = ["@commitlint/config-conventional"]

# Append the upstream linter's merge/revert/fixup ignore patterns.
default_ignores = false

# Rules are [severity, applicability, value].
# Severity: 0 = off, 1 = warning, 2 = error. Applicability: "always" | "never".
[rules]
type-enum = [2, "always", [
    "feat",     # A new feature
    "fix",      # A bug fix
    "docs",     # Documentation only changes
    "style",    # Changes that do not affect the meaning of the code
    "refactor", # A code change that neither fixes a bug nor adds a feature
    "perf",     # A code change that improves performance
    "test",     # Adding missing tests or correcting existing tests
    "build",    # Changes to the build system or external dependencies
    "ci",       # Changes to CI configuration files and scripts
    "chore",    # Other changes that don't modify src or test files
    "revert",   # Reverts a previous commit
]]

# Messages matching any of these skip validation entirely.
[[ignores]]
kind = "empty"

[[ignores]]
kind = "contains"
pattern = "Merge"

[[ignores]]
kind = "contains"
pattern = "merge"

[ui]
color = true
"#
}
