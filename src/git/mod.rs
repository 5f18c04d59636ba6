pub mod author;
mod clone;
mod publish;

pub use author::AuthorInfo;
pub use clone::{RepoCloner, DEFAULT_BRANCH, DEFAULT_REMOTE};
pub use publish::{BranchPublisher, PublishOutcome};

use git2::{build::CheckoutBuilder, Cred, ErrorCode, RemoteCallbacks, Repository};

/// Username sent with the token; the server only checks the password.
pub const GIT_USERNAME: &str = "notempty";

/// Token used as the password for the smart-HTTP transport.
#[derive(Clone)]
pub struct GitAuth {
    token: String,
}

impl GitAuth {
    pub fn new(token: impl Into<String>) -> Self {
        GitAuth {
            token: token.into(),
        }
    }

    pub(crate) fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        let mut attempted = false;
        callbacks.credentials(move |url, _username_from_url, _allowed_types| {
            // libgit2 keeps asking as long as the callback succeeds
            if attempted {
                return Err(git2::Error::from_str(&format!(
                    "authentication failed for {}",
                    url
                )));
            }
            attempted = true;
            Cred::userpass_plaintext(GIT_USERNAME, &self.token)
        });
        callbacks
    }
}

impl std::fmt::Debug for GitAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GitAuth(<redacted>)")
    }
}

/// Name of the branch HEAD points at, including an unborn one. `None` when
/// HEAD is detached.
pub fn current_branch(repo: &Repository) -> Result<Option<String>, git2::Error> {
    match repo.head() {
        Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_owned)),
        Ok(_) => Ok(None),
        Err(err) if is_unborn(&err) => {
            let head = repo.find_reference("HEAD")?;
            Ok(head
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(str::to_owned))
        }
        Err(err) => Err(err),
    }
}

/// Attaches HEAD to `branch`, creating the local branch from
/// `<remote>/<branch>` when only the remote-tracking ref exists.
pub(crate) fn checkout_branch(
    repo: &Repository,
    remote: &str,
    branch: &str,
) -> Result<(), git2::Error> {
    let refname = format!("refs/heads/{}", branch);

    if repo.find_reference(&refname).is_err() {
        let tracking = format!("{}/{}", remote, branch);
        let commit = repo
            .find_reference(&format!("refs/remotes/{}", tracking))?
            .peel_to_commit()?;
        let mut local = repo.branch(branch, &commit, false)?;
        local.set_upstream(Some(&tracking))?;
    }

    repo.set_head(&refname)?;
    repo.checkout_head(Some(CheckoutBuilder::new().force()))?;

    Ok(())
}

pub(crate) fn is_unborn(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use git2::{Oid, Signature};
    use std::{fs, path::Path};
    use tempdir::TempDir;

    pub(crate) fn commit_file(
        repo: &Repository,
        name: &str,
        content: &str,
        message: &str,
    ) -> Result<Oid, Box<dyn std::error::Error>> {
        let workdir = repo.workdir().ok_or("bare repository")?;
        fs::write(workdir.join(name), content)?;

        let mut index = repo.index()?;
        index.add_path(Path::new(name))?;
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;
        let signature = Signature::now("Test User", "test@example.com")?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<_> = parent.iter().collect();

        Ok(repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?)
    }

    #[test]
    fn should_read_current_branch() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("git")?;
        let repo = Repository::init(dir.path())?;
        commit_file(&repo, "test.txt", "Hello, world!", "Initial commit")?;

        let commit = repo.head()?.peel_to_commit()?;
        repo.branch("release", &commit, false)?;
        repo.set_head("refs/heads/release")?;

        assert_eq!(current_branch(&repo)?.as_deref(), Some("release"));

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_read_unborn_branch() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("git")?;
        let repo = Repository::init(dir.path())?;
        repo.set_head("refs/heads/fresh")?;

        assert_eq!(current_branch(&repo)?.as_deref(), Some("fresh"));

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_report_detached_head() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("git")?;
        let repo = Repository::init(dir.path())?;
        let oid = commit_file(&repo, "test.txt", "Hello, world!", "Initial commit")?;
        repo.set_head_detached(oid)?;

        assert_eq!(current_branch(&repo)?, None);

        dir.close()?;
        Ok(())
    }

    #[test]
    fn should_send_token_as_password_once_over_http() -> Result<(), Box<dyn std::error::Error>> {
        use base64::{prelude::BASE64_STANDARD, Engine};
        use mockito::Matcher;

        let mut server = mockito::Server::new();
        let credentials = BASE64_STANDARD.encode(format!("{}:secret-token", GIT_USERNAME));

        let anonymous = server
            .mock("GET", "/repo.git/info/refs")
            .match_query(Matcher::UrlEncoded("service".into(), "git-upload-pack".into()))
            .match_header("authorization", Matcher::Missing)
            .with_status(401)
            .with_header("WWW-Authenticate", "Basic realm=\"azure\"")
            .expect(1)
            .create();
        let authenticated = server
            .mock("GET", "/repo.git/info/refs")
            .match_query(Matcher::UrlEncoded("service".into(), "git-upload-pack".into()))
            .match_header("authorization", format!("Basic {}", credentials).as_str())
            .with_status(401)
            .with_header("WWW-Authenticate", "Basic realm=\"azure\"")
            .expect(1)
            .create();

        let target = TempDir::new("target")?;
        let result = RepoCloner::new(
            format!("{}/repo.git", server.url()),
            target.path().join("checkout"),
            GitAuth::new("secret-token"),
        )
        .clone_repo();

        assert!(result.is_err());
        anonymous.assert();
        authenticated.assert();

        target.close()?;
        Ok(())
    }
}
