//! Template acquisition
//!
//! The template is cloned into a throwaway directory. The target only receives
//! the working tree, without git history, and only once the clone succeeded.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::run_checked;
use crate::error::hints;
use crate::exec::subprocess::CommandRunner;
use crate::utils::{paths, terminal};

/// Version-control metadata removed from the cloned template
pub const VCS_METADATA: &str = ".git";

/// Clone `url` and copy its working tree into `dest`
///
/// Returns the number of files copied.
pub fn fetch_template<R: CommandRunner + ?Sized>(runner: &mut R, url: &str, dest: &Path) -> Result<u64> {
    let staging = tempfile::Builder::new()
        .prefix("cntrl-template-")
        .tempdir()
        .context("Failed to create temporary directory for the template")?;
    let clone_dir = staging.path().join("template");

    let args = vec![
        "clone".to_string(),
        "--depth".to_string(),
        "1".to_string(),
        url.to_string(),
        clone_dir.to_string_lossy().into_owned(),
    ];
    run_checked(runner, "git", &args, staging.path(), Some(hints::clone_failed()))?;

    strip_vcs_metadata(&clone_dir)?;

    let spinner = terminal::create_spinner(&format!("Copying template into {}", dest.display()));
    let copied = paths::copy_dir_all(&clone_dir, dest);
    spinner.finish_and_clear();
    let copied = copied?;

    if let Err(e) = staging.close() {
        terminal::print_warning(&format!("Failed to remove temporary template clone: {}", e));
    }

    Ok(copied)
}

/// Remove `.git` (directory, or worktree pointer file) from the root of `dir`
pub fn strip_vcs_metadata(dir: &Path) -> Result<()> {
    let vcs = dir.join(VCS_METADATA);
    let metadata = match fs::symlink_metadata(&vcs) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect {}", vcs.display()));
        }
    };

    if metadata.is_dir() {
        fs::remove_dir_all(&vcs)
    } else {
        fs::remove_file(&vcs)
    }
    .with_context(|| format!("Failed to remove {}", vcs.display()))
}
