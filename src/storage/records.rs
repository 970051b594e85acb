use anyhow::{Context, Result};
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;

/// A record stored as one line of whitespace-separated fields
pub trait FlatRecord: Sized {
    /// Number of tokens making up one record
    const FIELDS: usize;

    /// Render the record as a single space-separated line (no newline)
    fn to_line(&self) -> String;

    /// Parse one record from exactly `FIELDS` tokens
    /// Returns None if any field is malformed
    fn from_fields(fields: &[&str]) -> Option<Self>;
}

/// Trait for record collection persistence
pub trait RecordStorage<T> {
    /// Load all records; `Ok(None)` means the backing store does not exist
    fn load(&self) -> Result<Option<Vec<T>>>;

    /// Overwrite the backing store with the given records
    fn save(&self, records: &[T]) -> Result<()>;

    /// Get the storage file path
    fn path(&self) -> &PathBuf;
}

/// Plain text implementation of RecordStorage
/// Rewrites the whole file on every save (truncate, no temp file)
pub struct FlatFileStorage<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: FlatRecord> FlatFileStorage<T> {
    /// Create a new FlatFileStorage backed by the given path
    pub fn new(path: PathBuf) -> Self {
        FlatFileStorage {
            path,
            _record: PhantomData,
        }
    }
}

impl<T: FlatRecord> RecordStorage<T> for FlatFileStorage<T> {
    fn load(&self) -> Result<Option<Vec<T>>> {
        if !self.path.exists() {
            log::info!("Record store not found at {:?}", self.path);
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read records from {:?}", self.path))?;

        let records = parse_records(&contents);
        log::info!("Loaded {} records from {:?}", records.len(), self.path);

        Ok(Some(records))
    }

    fn save(&self, records: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let contents: String = records
            .iter()
            .map(|record| record.to_line() + "\n")
            .collect();

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write records to {:?}", self.path))?;

        log::debug!("Saved {} records to {:?}", records.len(), self.path);

        Ok(())
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Parse a whitespace token stream into records
/// Stops at the first malformed or incomplete record and keeps what came before
pub fn parse_records<T: FlatRecord>(contents: &str) -> Vec<T> {
    let tokens: Vec<&str> = contents.split_whitespace().collect();
    let mut records = Vec::with_capacity(tokens.len() / T::FIELDS.max(1));

    for fields in tokens.chunks(T::FIELDS) {
        match T::from_fields(fields) {
            Some(record) => records.push(record),
            None => {
                log::warn!(
                    "Malformed record {:?}, ignoring the rest of the store",
                    fields.join(" ")
                );
                break;
            }
        }
    }

    records
}
