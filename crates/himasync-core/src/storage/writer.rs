//! Sequential writer for the target image file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// How an attempt opens its target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Start over: create or truncate.
    Truncate,
    /// Resume: keep existing bytes and write after them.
    Append,
}

/// Open target file of one download attempt.
pub struct TargetFile {
    file: File,
}

impl TargetFile {
    pub fn open(path: &Path, mode: WriteMode) -> io::Result<Self> {
        let mut opts = File::options();
        match mode {
            WriteMode::Truncate => opts.write(true).create(true).truncate(true),
            WriteMode::Append => opts.append(true).create(true),
        };
        Ok(Self {
            file: opts.open(path)?,
        })
    }

    /// Write a whole body chunk.
    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)
    }

    /// Flush file data to disk.
    pub fn sync(&self) -> io::Result<()> {
        self.file.sync_data()
    }
}
