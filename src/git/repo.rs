// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::commit::strip_comments;
use crate::error::{ClintError, GitError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with additional functionality.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            ClintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                ClintError::Git(GitError::NotARepository)
            } else {
                ClintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            ClintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            ClintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the commit id and message for a reference.
    pub fn get_commit_message(&self, reference: &str) -> Result<(Oid, String)> {
        let commit = self.get_commit(reference)?;
        Ok((commit.id(), message_of(&commit)))
    }

    /// Get commits reachable from `to` but not from `from`, newest first.
    pub fn get_commits_in_range(&self, from: &str, to: &str) -> Result<Vec<(Oid, String)>> {
        let walk_err = |command: &str, e: git2::Error| {
            ClintError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let mut revwalk = self.inner.revwalk().map_err(|e| walk_err("revwalk", e))?;

        let from = self.get_commit(from)?;
        let to = self.get_commit(to)?;

        revwalk
            .push(to.id())
            .map_err(|e| walk_err("revwalk.push", e))?;
        revwalk
            .hide(from.id())
            .map_err(|e| walk_err("revwalk.hide", e))?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| walk_err("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                ClintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            commits.push((oid, message_of(&commit)));
        }

        Ok(commits)
    }

    /// Default location of the message being edited by `git commit`.
    pub fn edit_message_path(&self) -> PathBuf {
        self.git_dir().join("COMMIT_EDITMSG")
    }
}

/// A commit's message, with invalid UTF-8 replaced rather than dropped.
fn message_of(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes()).into_owned()
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Get the commit SHA and message for a reference.
pub fn get_commit(reference: &str) -> Result<(String, String)> {
    let repo = Repository::open_current()?;
    let (oid, message) = repo.get_commit_message(reference)?;
    Ok((oid.to_string(), message))
}

/// Get commits in `from..to`.
pub fn get_commit_range(from: &str, to: &str) -> Result<Vec<(String, String)>> {
    let repo = Repository::open_current()?;
    let commits = repo.get_commits_in_range(from, to)?;
    Ok(commits
        .into_iter()
        .map(|(oid, msg)| (oid.to_string(), msg))
        .collect())
}

/// Read a commit message file, dropping git comment lines.
///
/// Without a path, reads `COMMIT_EDITMSG` from the current repository.
pub fn read_edit_message(path: Option<&Path>) -> Result<String> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => open_repo()?.edit_message_path(),
    };

    tracing::debug!("Reading commit message from {:?}", path);

    let content = std::fs::read_to_string(&path).map_err(|e| {
        ClintError::Git(GitError::EditFileUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })
    })?;

    Ok(strip_comments(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit<'_>> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn create_test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        commit(&repo, "chore: initial commit");
        commit(&repo, "feat: add login");
        commit(&repo, "wip: quick fix");

        let wrapper = Repository::open(dir.path()).unwrap();
        (dir, wrapper)
    }

    #[test]
    fn test_open_repo() {
        let (dir, _repo) = create_test_repo();
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(ClintError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_get_commit_message() {
        let (_dir, repo) = create_test_repo();
        let (_, message) = repo.get_commit_message("HEAD").unwrap();
        assert_eq!(message, "wip: quick fix");
    }

    #[test]
    fn test_commits_in_range_newest_first() {
        let (_dir, repo) = create_test_repo();
        let commits = repo.get_commits_in_range("HEAD~2", "HEAD").unwrap();
        let messages: Vec<&str> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["wip: quick fix", "feat: add login"]);
    }

    /// Commit `message` on top of HEAD without requiring it to be UTF-8.
    fn commit_raw(repo: &Git2Repo, message: &[u8]) -> Oid {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        let mut raw = format!(
            "tree {}\nparent {}\nauthor Test <test@example.com> 0 +0000\ncommitter Test <test@example.com> 0 +0000\n\n",
            head.tree_id(),
            head.id()
        )
        .into_bytes();
        raw.extend_from_slice(message);

        let oid = repo.odb().unwrap().write(git2::ObjectType::Commit, &raw).unwrap();
        repo.set_head_detached(oid).unwrap();
        oid
    }

    #[test]
    fn test_non_utf8_message_is_kept() {
        let dir = TempDir::new().unwrap();
        let git = Git2Repo::init(dir.path()).unwrap();
        commit(&git, "chore: initial commit");
        commit_raw(&git, b"wip: caf\xe9 quick fix\n");
        let repo = Repository::open(dir.path()).unwrap();

        let commits = repo.get_commits_in_range("HEAD~1", "HEAD").unwrap();
        assert_eq!(commits.len(), 1);
        assert!(commits[0].1.starts_with("wip: caf"));

        let (_, message) = repo.get_commit_message("HEAD").unwrap();
        assert_eq!(message, commits[0].1);

        let engine = crate::rules::RuleEngine::from_config(&crate::ClintConfig::default()).unwrap();
        let result = engine.lint(&commits[0].1);
        assert!(!result.is_ignored());
        assert!(result.has_issue("type-enum"));
    }

    #[test]
    fn test_invalid_reference() {
        let (_dir, repo) = create_test_repo();
        assert!(matches!(
            repo.get_commit("does-not-exist"),
            Err(ClintError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_read_edit_message_strips_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(
            &path,
            "fix: handle timeouts\n\n# Please enter the commit message for your changes.\n",
        )
        .unwrap();
        assert_eq!(read_edit_message(Some(&path)).unwrap(), "fix: handle timeouts");
    }

    #[test]
    fn test_edit_message_comments_do_not_trigger_ignores() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(
            &path,
            "wip: quick fix\n\n# On branch feature\n# Conflicts resolved during merge\n",
        )
        .unwrap();

        let message = read_edit_message(Some(&path)).unwrap();
        assert!(!message.contains("merge"));

        let engine = crate::rules::RuleEngine::from_config(&crate::ClintConfig::default()).unwrap();
        let result = engine.lint(&message);
        assert!(!result.is_ignored());
        assert!(result.has_issue("type-enum"));
    }

    #[test]
    fn test_read_edit_message_missing_file() {
        let err = read_edit_message(Some(Path::new("/nonexistent/COMMIT_EDITMSG"))).unwrap_err();
        assert!(matches!(
            err,
            ClintError::Git(GitError::EditFileUnreadable { .. })
        ));
    }
}
