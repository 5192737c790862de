//! Size-bounded append-only sink with numbered backups.
//!
//! # Responsibilities
//! - Serialize each record as one JSON object per line
//! - Roll the live file into `path.1`, `path.2`, ... at a byte threshold
//! - Discard backups beyond the configured retention count
//!
//! # Design Decisions
//! - Appends take a mutex so a record is never interleaved with another;
//!   writes are a single small line each, so contention is negligible
//! - Rotation happens before the write that would cross the threshold,
//!   so an oversized record still lands in a fresh file

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;

/// Append-only structured log sink shared by the accept loop and every
/// connection handler.
#[derive(Debug)]
pub struct RotatingSink {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    file: File,
    len: u64,
}

impl RotatingSink {
    /// Open (or create) the live log file for appending.
    pub fn open(
        path: impl Into<PathBuf>,
        max_bytes: u64,
        backup_count: usize,
    ) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            backup_count,
            inner: Mutex::new(Inner { file, len }),
        })
    }

    /// Serialize `record` and append it as one line, rolling files first if
    /// the write would push the live file past the threshold.
    pub fn append<T: Serialize>(&self, record: &T) -> io::Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut inner = self.inner.lock().expect("sink mutex poisoned");
        if inner.len > 0 && inner.len + line.len() as u64 > self.max_bytes {
            self.roll(&mut inner)?;
        }
        inner.file.write_all(line.as_bytes())?;
        inner.file.flush()?;
        inner.len += line.len() as u64;
        Ok(())
    }

    /// Shift backups up by one, retire the oldest, and start a fresh live
    /// file. With zero retention the live file is simply truncated.
    fn roll(&self, inner: &mut Inner) -> io::Result<()> {
        inner.file.flush()?;

        if self.backup_count == 0 {
            inner.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            inner.len = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backup_count).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        inner.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        inner.len = 0;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Path of the live log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Serialize)]
    struct Record {
        seq: u64,
        note: &'static str,
    }

    fn record(seq: u64) -> Record {
        Record {
            seq,
            note: "connection_attempt",
        }
    }

    #[test]
    fn appends_one_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RotatingSink::open(dir.path().join("events.json"), 4096, 3).unwrap();
        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["note"], "connection_attempt");
        }
    }

    #[test]
    fn rotates_at_byte_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let line_len = serde_json::to_string(&record(0)).unwrap().len() as u64 + 1;
        // Room for exactly two lines.
        let sink = RotatingSink::open(&path, line_len * 2, 3).unwrap();

        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();
        assert!(!dir.path().join("events.json.1").exists());

        sink.append(&record(3)).unwrap();
        let backup = fs::read_to_string(dir.path().join("events.json.1")).unwrap();
        assert_eq!(backup.lines().count(), 2);
        let live = fs::read_to_string(&path).unwrap();
        assert_eq!(live.lines().count(), 1);
    }

    #[test]
    fn retention_never_exceeds_backup_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let sink = RotatingSink::open(&path, 1, 2).unwrap();

        // Every append after the first forces a roll.
        for seq in 0..10 {
            sink.append(&record(seq)).unwrap();
        }
        assert!(dir.path().join("events.json.1").exists());
        assert!(dir.path().join("events.json.2").exists());
        assert!(!dir.path().join("events.json.3").exists());
    }

    #[test]
    fn oldest_backup_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let sink = RotatingSink::open(&path, 1, 2).unwrap();

        for seq in 0..4 {
            sink.append(&record(seq)).unwrap();
        }
        // seq 3 live, seq 2 in .1, seq 1 in .2, seq 0 gone.
        let live = fs::read_to_string(&path).unwrap();
        assert!(live.contains("\"seq\":3"));
        let first = fs::read_to_string(dir.path().join("events.json.1")).unwrap();
        assert!(first.contains("\"seq\":2"));
        let second = fs::read_to_string(dir.path().join("events.json.2")).unwrap();
        assert!(second.contains("\"seq\":1"));
    }

    #[test]
    fn zero_backup_count_truncates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let sink = RotatingSink::open(&path, 1, 0).unwrap();

        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();

        let live = fs::read_to_string(&path).unwrap();
        assert_eq!(live.lines().count(), 1);
        assert!(live.contains("\"seq\":2"));
        assert!(!dir.path().join("events.json.1").exists());
    }

    #[test]
    fn oversized_record_lands_in_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let sink = RotatingSink::open(&path, 8, 3).unwrap();

        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();

        let live = fs::read_to_string(&path).unwrap();
        assert_eq!(live.lines().count(), 1);
        assert!(live.contains("\"seq\":2"));
    }

    #[test]
    fn concurrent_appends_keep_records_whole() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(RotatingSink::open(dir.path().join("events.json"), 1 << 20, 3).unwrap());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(std::thread::spawn(move || {
                for seq in 0..100 {
                    sink.append(&record(seq)).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 800);
        for line in lines {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }
}
