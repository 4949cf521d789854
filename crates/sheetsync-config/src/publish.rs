//! Git publishing settings.

use serde::{Deserialize, Serialize};

fn default_remote() -> String {
    String::from("origin")
}

fn default_message() -> String {
    String::from("Update sheet data")
}

const fn default_push() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublishConfig {
    /// Commit the written files after every successful run.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch to push. Empty pushes the currently checked out branch.
    #[serde(default)]
    pub branch: String,

    #[serde(default = "default_message")]
    pub message: String,

    /// Push after committing.
    #[serde(default = "default_push")]
    pub push: bool,

    /// Repository to commit into. Empty uses the output directory.
    #[serde(default)]
    pub repo_dir: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            remote: default_remote(),
            branch: String::new(),
            message: default_message(),
            push: default_push(),
            repo_dir: String::new(),
        }
    }
}

impl PublishConfig {
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        if self.branch.trim().is_empty() {
            None
        } else {
            Some(self.branch.trim())
        }
    }

    #[must_use]
    pub fn repo_dir(&self) -> Option<&str> {
        if self.repo_dir.trim().is_empty() {
            None
        } else {
            Some(self.repo_dir.trim())
        }
    }
}
