//! Append-only audit log
//!
//! One JSON object per line. Each entry goes out in a single `write_all` on a
//! file opened in append mode, so concurrent runs never interleave lines.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{FinbotError, FinbotResult};

use super::entry::AuditEntry;

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn append(&self, entry: &AuditEntry) -> FinbotResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| {
                FinbotError::Io(format!(
                    "Cannot append to audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })
    }

    /// The last `count` entries, oldest first
    ///
    /// Only `count` entries are held in memory while the file is scanned.
    /// A line that does not parse is an error naming its line number.
    pub fn read_recent(&self, count: usize) -> FinbotResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(FinbotError::Io(format!(
                    "Cannot open audit log {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        let mut window = VecDeque::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                FinbotError::Json(format!("audit log line {}: {}", index + 1, e))
            })?;

            if count == 0 {
                continue;
            }
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        }

        Ok(window.into())
    }

    pub fn read_all(&self) -> FinbotResult<Vec<AuditEntry>> {
        self.read_recent(usize::MAX)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
