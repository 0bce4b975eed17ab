use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::{
    pkg::internal::records::spec::ResumeRecord,
    prelude::{Error, Result},
};

/// Append-only collection of parsed resumes, persisted as one pretty-printed
/// JSON array. Mutations hold the writer mutex and replace the file through a
/// temp-file-and-rename, so concurrent in-process appends cannot lose updates
/// or leave a half-written artifact behind.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        RecordStore {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn load(&self) -> Result<Vec<ResumeRecord>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::Persistence(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        serde_json::from_slice(&raw).map_err(|e| {
            Error::Persistence(format!("corrupt record store {}: {}", self.path.display(), e))
        })
    }

    pub async fn append(&self, record: &ResumeRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        records.push(record.clone());
        self.replace(&records).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<ResumeRecord>> {
        let needle = keyword.to_lowercase();
        let mut matches = Vec::new();
        for record in self.load().await? {
            let blob = serde_json::to_string(&record)
                .map_err(|e| Error::Persistence(e.to_string()))?
                .to_lowercase();
            if blob.contains(&needle) {
                matches.push(record);
            }
        }
        Ok(matches)
    }

    async fn replace(&self, records: &[ResumeRecord]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| Error::Persistence(e.to_string()))?;
        let payload = serde_json::to_vec_pretty(records)
            .map_err(|e| Error::Persistence(e.to_string()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|e| Error::Persistence(e.to_string()))?;
        tmp.write_all(&payload)
            .map_err(|e| Error::Persistence(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Persistence(e.to_string()))?;
        Ok(())
    }
}
