use super::{checkout_branch, GitAuth};
use git2::{build::RepoBuilder, FetchOptions, Repository};
use std::path::PathBuf;

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";
const SHALLOW_DEPTH: i32 = 1;

/// Shallow clone of a remote into a working directory.
pub struct RepoCloner {
    remote_url: String,
    dir: PathBuf,
    remote: String,
    branch: String,
    depth: i32,
    auth: GitAuth,
}

impl RepoCloner {
    pub fn new(remote_url: impl Into<String>, dir: impl Into<PathBuf>, auth: GitAuth) -> Self {
        RepoCloner {
            remote_url: remote_url.into(),
            dir: dir.into(),
            remote: DEFAULT_REMOTE.to_owned(),
            branch: DEFAULT_BRANCH.to_owned(),
            depth: SHALLOW_DEPTH,
            auth,
        }
    }

    pub fn remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// `0` fetches the full history.
    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn clone_repo(self) -> Result<Repository, git2::Error> {
        log::debug!(
            "cloning {} (depth {}) into {}",
            self.remote_url,
            self.depth,
            self.dir.display()
        );

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(self.auth.remote_callbacks());
        if self.depth > 0 {
            fetch_options.depth(self.depth);
        }

        let remote_name = self.remote.clone();
        let repo = RepoBuilder::new()
            .branch(&self.branch)
            .fetch_options(fetch_options)
            .remote_create(move |repo, _name, url| repo.remote(&remote_name, url))
            .clone(&self.remote_url, &self.dir)?;

        log::debug!("checking out {}", self.branch);
        checkout_branch(&repo, &self.remote, &self.branch)?;

        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{current_branch, tests::commit_file};
    use tempdir::TempDir;

    fn source_repo(dir: &TempDir, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
        let repo = Repository::init(dir.path())?;
        let oid = commit_file(&repo, "README.md", "# source", "Initial commit")?;
        let commit = repo.find_commit(oid)?;
        repo.branch(branch, &commit, true)?;

        Ok(dir.path().to_string_lossy().into_owned())
    }

    #[test]
    fn should_clone_with_named_remote_and_branch() -> Result<(), Box<dyn std::error::Error>> {
        let source = TempDir::new("source")?;
        let url = source_repo(&source, "release")?;
        let target = TempDir::new("target")?;
        let dir = target.path().join("checkout");

        let repo = RepoCloner::new(&url, &dir, GitAuth::new("unused"))
            .remote("upstream")
            .branch("release")
            .depth(0)
            .clone_repo()?;

        assert_eq!(current_branch(&repo)?.as_deref(), Some("release"));
        assert_eq!(repo.find_remote("upstream")?.url(), Some(url.as_str()));
        assert!(repo.find_remote("origin").is_err());
        assert!(dir.join("README.md").exists());

        source.close()?;
        target.close()?;
        Ok(())
    }

    #[test]
    fn should_fail_for_missing_branch() -> Result<(), Box<dyn std::error::Error>> {
        let source = TempDir::new("source")?;
        let url = source_repo(&source, "release")?;
        let target = TempDir::new("target")?;

        let result = RepoCloner::new(&url, target.path().join("checkout"), GitAuth::new("unused"))
            .branch("does-not-exist")
            .depth(0)
            .clone_repo();

        assert!(result.is_err());

        source.close()?;
        target.close()?;
        Ok(())
    }
}
