//! Tool detection and validation
//!
//! Every scaffold step delegates to an external program, so a missing one
//! should be reported before anything touches the filesystem.

use std::path::PathBuf;

use anyhow::Result;
use which::which;

use crate::error::{hints, ScaffoldError};
use crate::exec::subprocess::run_command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Path to the tool executable
    pub path: PathBuf,
    /// Tool version string (if available)
    pub version: Option<String>,
}

/// Check if a tool exists and return its information
pub fn check_tool(tool_name: &str) -> Option<ToolInfo> {
    match which(tool_name) {
        Ok(path) => {
            let version = get_tool_version(tool_name);
            Some(ToolInfo {
                name: tool_name.to_string(),
                path,
                version,
            })
        }
        Err(_) => None,
    }
}

/// Get tool version by running `tool --version`
fn get_tool_version(tool_name: &str) -> Option<String> {
    let result = run_command(tool_name, &["--version".to_string()], None, false).ok()?;
    if !result.success {
        return None;
    }
    result
        .stdout
        .lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
}

/// Require a tool to exist, return error with hint if missing
pub fn require_tool(tool_name: &str, required_for: &str) -> Result<ToolInfo> {
    match check_tool(tool_name) {
        Some(info) => Ok(info),
        None => Err(ScaffoldError::missing_tool(tool_name, required_for, get_tool_hint(tool_name)).into()),
    }
}

/// Get installation hint for a tool
fn get_tool_hint(tool_name: &str) -> String {
    match tool_name {
        "git" => hints::git().to_string(),
        "npm" | "yarn" | "pnpm" => hints::node_package_manager(tool_name),
        _ => "Install this tool and ensure it's in your PATH".to_string(),
    }
}
