use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};

use crate::error::Result;

/// Fallback identity when the environment has no git config.
const DEFAULT_IDENTITY: &str = "dockerdev";
const DEFAULT_EMAIL: &str = "dockerdev@localhost";

/// Opens the repository at `path`, initializing one when the application
/// skeleton was generated without git.
pub fn open_or_init(path: &Path) -> Result<Repository> {
    match Repository::open(path) {
        Ok(repo) => Ok(repo),
        Err(_) => {
            log::info!("no git repository in {}, initializing one", path.display());
            Ok(Repository::init(path)?)
        }
    }
}

/// Stages every pending change and records a single commit.
///
/// The first commit on an unborn branch has no parent; later commits chain
/// onto HEAD. An empty staging area still produces a commit, matching
/// `git add . && git commit` driven blindly by the recipe.
pub fn commit_all(repo: &Repository, message: &str) -> Result<Oid> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;

    let signature = repo
        .signature()
        .or_else(|_| Signature::now(DEFAULT_IDENTITY, DEFAULT_EMAIL))?;

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();

    let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
    log::debug!("commit {oid} '{}'", message.lines().next().unwrap_or(""));
    Ok(oid)
}

/// Commit subjects from HEAD back to the root, oldest first.
pub fn commit_subjects(repo: &Repository) -> Result<Vec<String>> {
    let mut walk = repo.revwalk()?;
    walk.push_head()?;
    let mut subjects = Vec::new();
    for oid in walk {
        let commit = repo.find_commit(oid?)?;
        subjects.push(commit.summary().unwrap_or("").to_string());
    }
    subjects.reverse();
    Ok(subjects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_or_init_creates_repository() {
        let dir = TempDir::new().unwrap();
        let repo = open_or_init(dir.path()).unwrap();
        assert!(repo.path().exists());
        // Opening again reuses it.
        open_or_init(dir.path()).unwrap();
    }

    #[test]
    fn test_commit_all_chains_commits() {
        let dir = TempDir::new().unwrap();
        let repo = open_or_init(dir.path()).unwrap();

        std::fs::write(dir.path().join("a.txt"), "one").unwrap();
        commit_all(&repo, "first").unwrap();

        std::fs::write(dir.path().join("b.txt"), "two").unwrap();
        commit_all(&repo, "second").unwrap();

        assert_eq!(commit_subjects(&repo).unwrap(), vec!["first", "second"]);

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.parent_count(), 1);
    }

    #[test]
    fn test_commit_subject_is_first_message_line() {
        let dir = TempDir::new().unwrap();
        let repo = open_or_init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), "one").unwrap();
        commit_all(&repo, "rails new\n\n---options---\ndatabase: postgresql\n---options---")
            .unwrap();
        assert_eq!(commit_subjects(&repo).unwrap(), vec!["rails new"]);
    }
}
