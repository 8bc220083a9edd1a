//! Last-used archive directory
//!
//! A single path stored as plain text. Loading never fails: a missing file,
//! an unreadable file, or a stored directory that no longer exists all fall
//! back to the current directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Store for the directory the last archive was opened from
#[derive(Debug, Clone)]
pub struct LastDirectory {
    file: PathBuf,
}

impl LastDirectory {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Stored directory if it still exists, otherwise `.`
    pub fn load(&self) -> PathBuf {
        fs::read_to_string(&self.file)
            .ok()
            .and_then(|content| content.lines().next().map(str::to_owned))
            .map(PathBuf::from)
            .filter(|dir| !dir.as_os_str().is_empty() && dir.exists())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Overwrite the stored directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.file, dir.to_string_lossy().as_bytes())
            .with_context(|| format!("Failed to write {}", self.file.display()))
    }

    /// Resolve an archive argument the way the CLI does
    ///
    /// Relative paths that do not exist in the working directory are looked up
    /// in the last-used directory instead.
    pub fn resolve(&self, archive: &Path) -> PathBuf {
        if archive.is_absolute() || archive.exists() {
            return archive.to_path_buf();
        }
        let candidate = self.load().join(archive);
        if candidate.exists() {
            candidate
        } else {
            archive.to_path_buf()
        }
    }

    /// Remember the directory containing `archive`
    pub fn remember_archive(&self, archive: &Path) -> Result<()> {
        let absolute = fs::canonicalize(archive)
            .with_context(|| format!("Failed to resolve {}", archive.display()))?;
        match absolute.parent() {
            Some(dir) => self.save(dir),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_defaults_to_current_dir() {
        let dir = TempDir::new().unwrap();
        let store = LastDirectory::new(dir.path().join("dir"));
        assert_eq!(store.load(), PathBuf::from("."));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = LastDirectory::new(dir.path().join("state").join("dir"));
        let archives = dir.path().join("archives");
        fs::create_dir(&archives).unwrap();

        store.save(&archives).unwrap();
        assert_eq!(store.load(), archives);

        store.save(dir.path()).unwrap();
        assert_eq!(store.load(), dir.path());
    }

    #[test]
    fn test_vanished_directory_falls_back() {
        let dir = TempDir::new().unwrap();
        let store = LastDirectory::new(dir.path().join("dir"));
        store.save(&dir.path().join("gone")).unwrap();
        assert_eq!(store.load(), PathBuf::from("."));
    }

    #[test]
    fn test_resolve_uses_last_directory() {
        let dir = TempDir::new().unwrap();
        let archives = dir.path().join("archives");
        fs::create_dir(&archives).unwrap();
        fs::write(archives.join("only-here.zip"), b"PK").unwrap();

        let store = LastDirectory::new(dir.path().join("dir"));
        store.remember_archive(&archives.join("only-here.zip")).unwrap();

        let resolved = store.resolve(Path::new("only-here.zip"));
        assert_eq!(
            fs::canonicalize(resolved).unwrap(),
            fs::canonicalize(archives.join("only-here.zip")).unwrap()
        );
        assert_eq!(
            store.resolve(Path::new("nowhere.zip")),
            PathBuf::from("nowhere.zip")
        );
    }
}
