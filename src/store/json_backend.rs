use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{app_data_dir, ensure_dir, write_atomic};
use crate::errors::Result;
use crate::records::{ExpenseDraft, ExpenseRecord, RecordId};
use crate::store::{MemoryStore, RecordStore};

const RECORDS_FILE: &str = "expenses.json";
const TMP_SUFFIX: &str = "tmp";

/// Record store persisted to a single JSON file.
///
/// Mutations write through a temp file and rename into place, so a crash
/// mid-write never leaves a torn record set behind.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonStore {
    /// Opens the store at `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            MemoryStore::new()
        };
        tracing::info!(path = %path.display(), records = inner.len(), "record store opened");
        Ok(Self { path, inner })
    }

    /// Opens the store at the managed default location.
    pub fn open_default() -> Result<Self> {
        let dir = app_data_dir();
        ensure_dir(&dir)?;
        Self::open(dir.join(RECORDS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.inner)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn list_all(&self) -> Result<Vec<ExpenseRecord>> {
        self.inner.list_all()
    }

    fn create(&mut self, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        let record = self.inner.create(draft)?;
        self.persist()?;
        Ok(record)
    }

    fn update(&mut self, id: RecordId, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        let record = self.inner.update(id, draft)?;
        self.persist()?;
        Ok(record)
    }

    fn delete(&mut self, id: RecordId) -> Result<ExpenseRecord> {
        let removed = self.inner.delete(id)?;
        self.persist()?;
        Ok(removed)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
