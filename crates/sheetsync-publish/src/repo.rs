use std::path::{Path, PathBuf};

use crate::error::PublishError;

#[derive(Debug, Clone)]
pub struct RepoContext {
    /// Working tree root.
    pub root: PathBuf,
    pub git_dir: PathBuf,
    /// Checked out branch, `None` on a detached HEAD.
    pub branch: Option<String>,
}

pub fn discover_repo(dir: &Path) -> Result<RepoContext, PublishError> {
    let repo = gix::discover(dir).map_err(|_| PublishError::NotGitRepo(dir.to_path_buf()))?;
    let root = repo
        .work_dir()
        .map(Path::to_path_buf)
        .ok_or_else(|| PublishError::Git(format!("bare repository at {}", dir.display())))?;
    let git_dir = repo.git_dir().to_path_buf();

    let head = repo
        .head()
        .map_err(|e| PublishError::Git(format!("read HEAD: {e}")))?;
    let branch = head
        .referent_name()
        .map(|name| name.shorten().to_string());

    tracing::debug!(root = %root.display(), branch = ?branch, "discovered repository");

    Ok(RepoContext {
        root,
        git_dir,
        branch,
    })
}

/// Commit id `HEAD` currently points at.
pub(crate) fn head_commit(ctx: &RepoContext) -> Result<String, PublishError> {
    let repo = gix::open(&ctx.git_dir).map_err(|e| PublishError::Git(format!("open repository: {e}")))?;
    let id = repo
        .head_id()
        .map_err(|e| PublishError::Git(format!("read HEAD commit: {e}")))?;
    Ok(id.to_string())
}

/// Path of `file` relative to the working tree root. Relative paths are
/// taken from the current directory.
pub(crate) fn relative_to_root(ctx: &RepoContext, file: &Path) -> Result<PathBuf, PublishError> {
    let root = ctx.root.canonicalize()?;
    file.canonicalize()?
        .strip_prefix(&root)
        .map(Path::to_path_buf)
        .map_err(|_| PublishError::OutsideRepo {
            path: file.to_path_buf(),
        })
}
