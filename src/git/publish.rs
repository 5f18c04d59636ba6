use super::{current_branch, is_unborn, AuthorInfo, GitAuth, DEFAULT_REMOTE};
use git2::{
    build::CheckoutBuilder, Commit, IndexAddOption, Oid, PushOptions, Repository, Signature,
};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub commit: Oid,
    /// Whether the working tree had to be moved to the target branch.
    pub switched_branch: bool,
}

/// Commits everything in a working tree and pushes it to a branch.
pub struct BranchPublisher {
    dir: PathBuf,
    remote: String,
    branch: String,
    message: String,
    author: AuthorInfo,
    auth: GitAuth,
}

impl BranchPublisher {
    pub fn new(
        dir: impl Into<PathBuf>,
        branch: impl Into<String>,
        message: impl Into<String>,
        auth: GitAuth,
    ) -> Self {
        BranchPublisher {
            dir: dir.into(),
            remote: DEFAULT_REMOTE.to_owned(),
            branch: branch.into(),
            message: message.into(),
            author: AuthorInfo::default(),
            auth,
        }
    }

    pub fn remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn author(mut self, author: AuthorInfo) -> Self {
        self.author = author;
        self
    }

    pub fn publish(self) -> Result<PublishOutcome, git2::Error> {
        let repo = Repository::open(&self.dir)?;

        let switched_branch = switch_branch(&repo, &self.branch)?;

        log::debug!("staging all files in {}", self.dir.display());
        let tree = stage_all(&repo)?;

        let commit = commit(&repo, tree, &self.author, &self.message)?;
        log::debug!("created commit {}", commit);

        push(&repo, &self.remote, &self.branch, &self.auth)?;

        Ok(PublishOutcome {
            commit,
            switched_branch,
        })
    }
}

fn switch_branch(repo: &Repository, branch: &str) -> Result<bool, git2::Error> {
    if current_branch(repo)?.as_deref() == Some(branch) {
        return Ok(false);
    }

    let refname = format!("refs/heads/{}", branch);
    log::debug!("switching to {}", refname);

    if let Ok(existing) = repo.find_reference(&refname) {
        // HEAD only moves once the tree is in place
        let target = existing.peel_to_commit()?;
        repo.checkout_tree(target.as_object(), Some(CheckoutBuilder::new().safe()))?;
        repo.set_head(&refname)?;
        return Ok(true);
    }

    match repo.head() {
        Ok(head) => {
            let commit = head.peel_to_commit()?;
            repo.branch(branch, &commit, false)?;
        }
        // the first commit creates the branch
        Err(err) if is_unborn(&err) => {}
        Err(err) => return Err(err),
    }
    repo.set_head(&refname)?;

    Ok(true)
}

fn stage_all(repo: &Repository) -> Result<Oid, git2::Error> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.update_all(["*"].iter(), None)?;
    index.write()?;

    index.write_tree()
}

fn commit(
    repo: &Repository,
    tree: Oid,
    author: &AuthorInfo,
    message: &str,
) -> Result<Oid, git2::Error> {
    let signature = Signature::now(&author.name, &author.email)?;
    let tree = repo.find_tree(tree)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(err) if is_unborn(&err) => None,
        Err(err) => return Err(err),
    };
    let parents: Vec<&Commit> = parent.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )
}

fn push(repo: &Repository, remote: &str, branch: &str, auth: &GitAuth) -> Result<(), git2::Error> {
    let mut remote = repo.find_remote(remote)?;

    let mut callbacks = auth.remote_callbacks();
    callbacks.push_update_reference(|refname, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "failed to push {}: {}",
            refname, message
        ))),
        None => Ok(()),
    });

    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
    log::debug!("pushing {} to {}", refspec, remote.name().unwrap_or_default());

    remote.push(&[refspec.as_str()], Some(&mut options))
}
