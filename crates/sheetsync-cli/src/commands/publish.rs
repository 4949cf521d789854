use std::path::PathBuf;

use anyhow::{Context, bail};
use sheetsync_config::SyncConfig;
use sheetsync_core::responses::PublishSummary;
use sheetsync_publish::{PublishOptions, PublishOutcome, discover_repo, publish};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `sheetsync publish`: commit the configured mode's files as they are
/// on disk.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config(flags)?;
    let files: Vec<PathBuf> = config
        .output
        .paths_for(config.output.mode)
        .into_iter()
        .filter(|path| path.exists())
        .collect();
    if files.is_empty() {
        bail!(
            "no {} output to publish in {}",
            config.output.mode.as_str(),
            config.output.dir().display()
        );
    }
    let summary = publish_files(&config, &files)?;
    output(&summary, flags.format)
}

pub fn publish_files(config: &SyncConfig, files: &[PathBuf]) -> anyhow::Result<PublishSummary> {
    let repo_dir = config
        .publish
        .repo_dir()
        .map_or_else(|| config.output.dir().to_path_buf(), PathBuf::from);
    let ctx = discover_repo(&repo_dir)?;
    let options = PublishOptions {
        remote: config.publish.remote.clone(),
        branch: config.publish.branch().map(str::to_string),
        message: config.publish.message.clone(),
        push: config.publish.push,
    };

    let outcome = publish(&ctx, files, &options).context("failed to publish output files")?;
    Ok(match outcome {
        PublishOutcome::NoChanges => PublishSummary::NoChanges,
        PublishOutcome::Committed { commit, pushed } => PublishSummary::Committed { commit, pushed },
    })
}
