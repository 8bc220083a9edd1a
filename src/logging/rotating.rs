use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Timestamp layout shared by tracing's file layer and the rotation marker
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// When and how far to rotate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    pub directory: PathBuf,
    pub file_name: String,
    /// Rotate before a write once the active file has reached this size
    pub max_file_size: u64,
    /// Rotated generations kept as `<file_name>.1` .. `<file_name>.N`
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "app.log".to_string(),
            max_file_size: 1024 * 1024,
            max_backups: 5,
        }
    }
}

/// Size-rotated append-only log file
///
/// Cheap to clone; clones share the same file. Passed explicitly to the
/// subscriber setup as its file writer.
#[derive(Clone)]
pub struct RotatingLog {
    inner: Arc<Mutex<RotatingFile>>,
}

struct RotatingFile {
    policy: RotationPolicy,
    file: Option<File>,
    size: u64,
}

impl RotatingLog {
    /// Create the directory if needed and open the active file for appending
    pub fn open(policy: RotationPolicy) -> io::Result<Self> {
        fs::create_dir_all(&policy.directory)?;
        let path = policy.directory.join(&policy.file_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(RotatingFile {
                policy,
                file: Some(file),
                size,
            })),
        })
    }

    /// Path of the active file
    pub fn path(&self) -> PathBuf {
        self.lock().active_path()
    }

    fn lock(&self) -> MutexGuard<'_, RotatingFile> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RotatingFile {
    fn active_path(&self) -> PathBuf {
        self.policy.directory.join(&self.policy.file_name)
    }

    fn backup_path(&self, generation: usize) -> PathBuf {
        self.policy
            .directory
            .join(format!("{}.{}", self.policy.file_name, generation))
    }

    fn rotate_if_needed(&mut self) -> io::Result<()> {
        if self.size < self.policy.max_file_size {
            return Ok(());
        }
        self.rotate()
    }

    /// Shift `.1..N-1` up one generation, drop the oldest, start a fresh file
    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        let active = self.active_path();

        if self.policy.max_backups == 0 {
            remove_if_exists(&active)?;
        } else {
            remove_if_exists(&self.backup_path(self.policy.max_backups))?;
            for generation in (1..self.policy.max_backups).rev() {
                let older = self.backup_path(generation);
                if older.exists() {
                    fs::rename(&older, self.backup_path(generation + 1))?;
                }
            }
            if active.exists() {
                fs::rename(&active, self.backup_path(1))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&active)?;
        let marker = format!(
            "{}  INFO Log rotated\n",
            chrono::Local::now().format(TIMESTAMP_FORMAT)
        );
        file.write_all(marker.as_bytes())?;
        self.size = marker.len() as u64;
        self.file = Some(file);
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Writer handed out per event; holds the lock for the event's duration
pub struct RotatingWriter<'a> {
    guard: MutexGuard<'a, RotatingFile>,
}

impl Write for RotatingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut *self.guard;
        inner.rotate_if_needed()?;
        let file = inner
            .file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file is closed"))?;
        let written = file.write(buf)?;
        inner.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.guard.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RotatingLog {
    type Writer = RotatingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter { guard: self.lock() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn policy(dir: &TempDir, max_file_size: u64, max_backups: usize) -> RotationPolicy {
        RotationPolicy {
            directory: dir.path().join("logs"),
            file_name: "app.log".to_string(),
            max_file_size,
            max_backups,
        }
    }

    fn write_line(log: &RotatingLog, line: &str) {
        let mut writer = log.make_writer();
        writer.write_all(line.as_bytes()).unwrap();
        writer.flush().unwrap();
    }

    #[test]
    fn test_creates_directory_and_appends() {
        let dir = TempDir::new().unwrap();
        let log = RotatingLog::open(policy(&dir, 1024, 2)).unwrap();
        write_line(&log, "first\n");
        drop(log);

        let log = RotatingLog::open(policy(&dir, 1024, 2)).unwrap();
        write_line(&log, "second\n");
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_rotates_and_renumbers() {
        let dir = TempDir::new().unwrap();
        let log = RotatingLog::open(policy(&dir, 10, 2)).unwrap();
        let logs = dir.path().join("logs");

        write_line(&log, "generation-a\n");
        write_line(&log, "generation-b\n");
        assert!(fs::read_to_string(logs.join("app.log.1")).unwrap().contains("generation-a"));

        // Marker plus the new line already exceed the limit
        write_line(&log, "generation-c\n");
        assert!(fs::read_to_string(logs.join("app.log.2")).unwrap().contains("generation-a"));
        assert!(fs::read_to_string(logs.join("app.log.1")).unwrap().contains("generation-b"));

        let active = fs::read_to_string(logs.join("app.log")).unwrap();
        assert!(active.contains("Log rotated"));
        assert!(active.contains("generation-c"));
    }

    #[test]
    fn test_discards_generations_beyond_retention() {
        let dir = TempDir::new().unwrap();
        let log = RotatingLog::open(policy(&dir, 1, 2)).unwrap();
        let logs = dir.path().join("logs");

        for i in 0..6 {
            write_line(&log, &format!("line-{i}\n"));
        }

        assert!(logs.join("app.log.1").exists());
        assert!(logs.join("app.log.2").exists());
        assert!(!logs.join("app.log.3").exists());
        assert!(fs::read_to_string(logs.join("app.log")).unwrap().contains("line-5"));
        assert!(fs::read_to_string(logs.join("app.log.1")).unwrap().contains("line-4"));
    }

    #[test]
    fn test_zero_backups_truncates() {
        let dir = TempDir::new().unwrap();
        let log = RotatingLog::open(policy(&dir, 5, 0)).unwrap();
        write_line(&log, "old-content\n");
        write_line(&log, "new-content\n");

        let active = fs::read_to_string(log.path()).unwrap();
        assert!(!active.contains("old-content"));
        assert!(active.contains("new-content"));
        assert!(!dir.path().join("logs/app.log.1").exists());
    }
}
