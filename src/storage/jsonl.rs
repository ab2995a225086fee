//! JSONL storage for posts and tags
//!
//! Records are stored one JSON object per line, in the order the fetch
//! layer produced them. That order matters: it is the tie-break for posts
//! with equal votes. Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store for records of type `T` in JSONL format
pub struct JsonlStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonlStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records in file order
    pub fn read_all(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open store: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .with_context(|| format!("Failed to acquire read lock on {}", self.path.display()))?;

        let reader = BufReader::new(&file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let record: T = serde_json::from_str(&line).with_context(|| {
                format!("Failed to parse {} at line {}", self.path.display(), line_num + 1)
            })?;

            records.push(record);
        }

        // Lock is released when file is dropped
        Ok(records)
    }

    /// Writes all records to the store (full rewrite)
    pub fn write_all(&self, records: &[T]) -> Result<()> {
        self.stage(records)?.commit()
    }

    /// Writes all records to a temp file beside the store.
    ///
    /// The store itself is untouched until the returned write is committed.
    pub fn stage(&self, records: &[T]) -> Result<StagedWrite> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let staged = StagedWrite::new(self.path.with_extension("jsonl.tmp"), &self.path);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(staged.temp_path())
            .with_context(|| {
                format!("Failed to create temp file: {}", staged.temp_path().display())
            })?;

        // Acquire exclusive lock
        file.lock_exclusive().with_context(|| {
            format!("Failed to acquire write lock on {}", staged.temp_path().display())
        })?;

        let mut writer = BufWriter::new(&file);

        for record in records {
            let line = serde_json::to_string(record).context("Failed to serialize record")?;
            writeln!(writer, "{}", line).context("Failed to write record")?;
        }

        writer.flush().context("Failed to flush store")?;

        Ok(staged)
    }
}

/// A fully written temp file waiting to replace its target.
///
/// Dropping it without committing removes the temp file.
#[derive(Debug)]
pub struct StagedWrite {
    temp: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedWrite {
    pub(crate) fn new(temp: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            temp: temp.into(),
            target: target.into(),
            committed: false,
        }
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp
    }

    /// Atomically renames the temp file over the target
    pub fn commit(mut self) -> Result<()> {
        fs::rename(&self.temp, &self.target).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                self.temp.display(),
                self.target.display()
            )
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp);
        }
    }
}
