use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes a file into the scratch directory and returns its path.
    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn out_path(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}

/// A small well-formed CRLF fixture with three subtitles and a gap in the
/// ID numbering.
pub const CRLF_FIXTURE: &str = "1\r\n00:00:05,000 --> 00:00:07,000\r\nHello\r\n\r\n2\r\n00:00:10,000 --> 00:00:12,000\r\nSecond line\r\nwith a continuation\r\n\r\n4\r\n00:01:00,000 --> 00:01:02,000\r\nThird\r\n\r\n";
