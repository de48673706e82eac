use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use tracing::{debug, info, warn};

use crate::db::models::PatientRecord;
use crate::error::CerviError;

pub type RecordMap = BTreeMap<String, Vec<PatientRecord>>;

/// All patient records, keyed by the username that created them, mirrored to
/// a single JSON file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    records: RecordMap,
}

impl RecordStore {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: RecordMap::new(),
        }
    }

    /// Read the whole file. A missing file yields an empty store; a file that
    /// is not a JSON object of record arrays is an error.
    pub fn load_all(path: impl Into<PathBuf>) -> Result<Self, CerviError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<RecordMap>(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "records file not found; starting empty");
                RecordMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        info!(
            path = %path.display(),
            users = records.len(),
            records = records.values().map(Vec::len).sum::<usize>(),
            "record store loaded"
        );
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn all(&self) -> &RecordMap {
        &self.records
    }

    /// Records for `username` in insertion order.
    pub fn records_for(&self, username: &str) -> &[PatientRecord] {
        self.records.get(username).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Give `username` an empty list if it has none. In-memory only.
    pub fn ensure_user(&mut self, username: &str) {
        self.records.entry(username.to_string()).or_default();
    }

    /// Append in memory, then rewrite the whole file. If the write fails the
    /// in-memory mapping is restored to what it was before the call.
    pub async fn append_record(
        &mut self,
        username: &str,
        record: PatientRecord,
    ) -> Result<(), CerviError> {
        let had_user = self.records.contains_key(username);
        self.records
            .entry(username.to_string())
            .or_default()
            .push(record);

        if let Err(e) = self.flush().await {
            if had_user {
                if let Some(list) = self.records.get_mut(username) {
                    list.pop();
                }
            } else {
                self.records.remove(username);
            }
            warn!(username = %username, error = %e, "record write failed; append rolled back");
            return Err(e);
        }

        debug!(
            username = %username,
            count = self.records_for(username).len(),
            "record appended"
        );
        Ok(())
    }

    /// Serialize the full mapping to a sibling temp file and rename it over
    /// the target.
    pub async fn flush(&self) -> Result<(), CerviError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let body = serde_json::to_vec_pretty(&self.records)?;
        tokio::fs::write(&tmp, body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
