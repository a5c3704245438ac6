//! File sink

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use super::format;
use super::traits::{LogRecord, Sink};
use crate::debug_log;
use crate::error::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A sink appending timestamped plain-text lines to a file
///
/// Each record is written with a single `write_all` on the file, so a
/// failing destination is reported by the call that logged. Colors are
/// never written to files.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Open `path` for appending, creating missing parent directories
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = Self::open_append(&path).map_err(|source| Error::SinkOpen {
            path: path.clone(),
            source,
        })?;
        debug_log!("Opened log file {}", path.display());

        Ok(Self { path, file })
    }

    fn open_append(path: &Path) -> io::Result<File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn write(&mut self, record: &LogRecord<'_>, _colors: bool) -> io::Result<()> {
        let line = format!(
            "{} {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            format::render(record, false)
        );
        self.file.write_all(line.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
