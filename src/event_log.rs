//! Append-only JSON-lines log of game events.
//!
//! One [`GameEvent`] per line. The file is opened in append mode and never
//! read back.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::GameEvent;

pub struct EventLog {
    path: PathBuf,
    out: BufWriter<File>,
    buf: Vec<u8>,
    written: usize,
}

impl EventLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
            buf: Vec::with_capacity(256),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Events written through this handle.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn append(&mut self, event: &GameEvent) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, event).context("encode event")?;
        self.buf.push(b'\n');
        self.out
            .write_all(&self.buf)
            .with_context(|| format!("write event log {}", self.path.display()))?;
        self.written += 1;
        Ok(())
    }

    /// Append a batch and flush.
    pub fn append_all(&mut self, events: &[GameEvent]) -> Result<()> {
        for event in events {
            self.append(event)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out
            .flush()
            .with_context(|| format!("flush event log {}", self.path.display()))
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}
