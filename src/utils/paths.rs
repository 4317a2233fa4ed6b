//! Path utilities for the scaffolder

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Whether `path` can receive a new project: absent, or an empty directory
pub fn is_usable_target(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?;
    Ok(entries.next().is_none())
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Copy a directory tree, returning the number of files copied
///
/// Symlinks are recreated rather than followed on unix; elsewhere their
/// targets are copied.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<u64> {
    ensure_dir(dst)?;
    let mut copied = 0u64;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("{} escaped {}", entry.path().display(), src.display()))?;
        let dest_path = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            ensure_dir(&dest_path)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &dest_path)?;
            copied += 1;
        } else {
            fs::copy(entry.path(), &dest_path).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    dest_path.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src)
        .with_context(|| format!("Failed to read link: {}", src.display()))?;
    std::os::unix::fs::symlink(&target, dst)
        .with_context(|| format!("Failed to create link: {}", dst.display()))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_is_usable() {
        let temp = TempDir::new().unwrap();
        assert!(is_usable_target(&temp.path().join("new-site")).unwrap());
    }

    #[test]
    fn test_empty_dir_is_usable() {
        let temp = TempDir::new().unwrap();
        assert!(is_usable_target(temp.path()).unwrap());
    }

    #[test]
    fn test_non_empty_dir_is_not_usable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "hi").unwrap();
        assert!(!is_usable_target(temp.path()).unwrap());
    }

    #[test]
    fn test_file_is_not_usable() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("site");
        fs::write(&file, "").unwrap();
        assert!(!is_usable_target(&file).unwrap());
    }

    #[test]
    fn test_copy_dir_all_nested() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("pages/api")).unwrap();
        fs::write(src.join("package.json"), "{}").unwrap();
        fs::write(src.join("pages/api/hello.ts"), "export {}").unwrap();
        fs::create_dir_all(src.join("public")).unwrap();

        let dst = temp.path().join("dst");
        let copied = copy_dir_all(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.join("package.json")).unwrap(), "{}");
        assert_eq!(
            fs::read_to_string(dst.join("pages/api/hello.ts")).unwrap(),
            "export {}"
        );
        assert!(dst.join("public").is_dir());
    }
}
