//! File input and output for the command-line tool.

use anyhow::{Context, Result, anyhow};
use getrandom::fill;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// A file read as digest input or written as cipher output.
#[derive(Debug, Clone)]
pub struct PayloadFile {
    path: PathBuf,
}

impl PayloadFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the whole file into memory.
    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).with_context(|| format!("failed to read {}", self.path.display()))
    }

    /// Writes `data` so that readers see either the old file or the new one.
    ///
    /// The bytes go to a randomly named sibling first, are synced, and are
    /// then renamed over the target. Parent directories are created.
    pub fn write(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.random_tmp_path()?;

        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        tmp_file.write_all(data)?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e)
                .with_context(|| format!("failed to replace {}", self.path.display()));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            File::open(parent)?.sync_all()?;
        }

        Ok(())
    }

    /// `<name>.tmp.<16 hex digits>` next to the target.
    fn random_tmp_path(&self) -> Result<PathBuf> {
        let mut buf = [0u8; 8];
        fill(&mut buf).map_err(|_| anyhow!("OS random generator unavailable"))?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| anyhow!("{} is not a file path", self.path.display()))?
            .to_string_lossy();

        Ok(self
            .path
            .with_file_name(format!("{}.tmp.{}", file_name, hex::encode(buf))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_returns_written_data() {
        let dir = tempdir().unwrap();
        let file = PayloadFile::new(dir.path().join("out.bin"));

        file.write(b"hello world").unwrap();
        assert_eq!(file.read().unwrap(), b"hello world");
    }

    #[test]
    fn read_of_missing_file_names_the_path() {
        let dir = tempdir().unwrap();
        let file = PayloadFile::new(dir.path().join("missing.bin"));

        let err = file.read().unwrap_err();
        assert!(format!("{err}").contains("missing.bin"));
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let file = PayloadFile::new(&path);

        file.write(b"first").unwrap();
        file.write(b"second").unwrap();

        assert_eq!(fs::read(path).unwrap(), b"second");
    }

    #[test]
    fn no_temporary_file_is_left_behind() {
        let dir = tempdir().unwrap();
        let file = PayloadFile::new(dir.path().join("out.bin"));
        file.write(&[7u8; 10_000]).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], "out.bin");
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("out.bin");

        PayloadFile::new(&nested).write(b"data").unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn tmp_paths_are_unique_siblings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let file = PayloadFile::new(&path);

        let a = file.random_tmp_path().unwrap();
        let b = file.random_tmp_path().unwrap();

        assert_ne!(a, b);
        assert_ne!(a, path);
        assert_eq!(a.parent(), path.parent());
    }
}
