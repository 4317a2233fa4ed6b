//! Environment file generation

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::API_URL_KEY;

/// Render the single `KEY=value` line
pub fn render(api_url: &str) -> String {
    format!("{}={}", API_URL_KEY, api_url)
}

/// Append the API URL line to `<project_dir>/<file_name>`, creating it if needed
pub fn write_env_file(project_dir: &Path, file_name: &str, api_url: &str) -> Result<PathBuf> {
    let path = project_dir.join(file_name);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(render(api_url).as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
