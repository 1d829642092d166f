// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Reads commit messages from the repository or from the file git hands to
//! a `commit-msg` hook.

mod repo;

pub use repo::{get_commit, get_commit_range, open_repo, read_edit_message, Repository};
