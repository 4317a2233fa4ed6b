//! Node.js package manager invocations

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// Package manager used to install the template's dependencies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Arguments for a lockfile-exact install
    pub fn install_args(&self) -> Vec<String> {
        let args: &[&str] = match self {
            PackageManager::Npm => &["ci"],
            PackageManager::Yarn => &["install", "--frozen-lockfile"],
            PackageManager::Pnpm => &["install", "--frozen-lockfile"],
        };
        args.iter().map(|s| s.to_string()).collect()
    }

    /// Arguments to run a package.json script
    pub fn run_script_args(&self, script: &str) -> Vec<String> {
        vec!["run".to_string(), script.to_string()]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
