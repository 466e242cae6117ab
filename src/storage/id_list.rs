//! Flat lists of user ids (partner applications, partners).
//!
//! Unlike the entity stores there is no in-memory copy: every call reads the
//! file, edits the list and writes it back inside one mutex scope. A missing
//! file is an empty list.

use crate::core::error::StorageError;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// A JSON array of integers on disk
pub struct IdListFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl IdListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Current contents, in insertion order
    pub async fn ids(&self) -> Result<Vec<i32>, StorageError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    pub async fn contains(&self, id: i32) -> Result<bool, StorageError> {
        Ok(self.ids().await?.contains(&id))
    }

    /// Append `id`; duplicates are kept
    pub async fn append(&self, id: i32) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut ids = self.read().await?;
        ids.push(id);
        self.write(&ids).await
    }

    /// Remove the first occurrence of `id`; the file is only rewritten when
    /// something was removed
    pub async fn remove_first(&self, id: i32) -> Result<bool, StorageError> {
        let _guard = self.lock.lock().await;
        let mut ids = self.read().await?;
        let Some(index) = ids.iter().position(|&existing| existing == id) else {
            return Ok(false);
        };
        ids.remove(index);
        self.write(&ids).await?;
        Ok(true)
    }

    async fn read(&self) -> Result<Vec<i32>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, ids: &[i32]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(ids).map_err(|source| StorageError::Encode {
            what: "id list",
            source,
        })?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let list = IdListFile::new(dir.path().join("applications.json"));
        assert!(list.ids().await.unwrap().is_empty());
        assert!(!list.contains(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_append_keeps_duplicates() {
        let dir = TempDir::new().unwrap();
        let list = IdListFile::new(dir.path().join("applications.json"));
        list.append(4).await.unwrap();
        list.append(2).await.unwrap();
        list.append(4).await.unwrap();
        assert_eq!(list.ids().await.unwrap(), vec![4, 2, 4]);
    }

    #[tokio::test]
    async fn test_remove_first_only() {
        let dir = TempDir::new().unwrap();
        let list = IdListFile::new(dir.path().join("applications.json"));
        for id in [4, 2, 4] {
            list.append(id).await.unwrap();
        }

        assert!(list.remove_first(4).await.unwrap());
        assert_eq!(list.ids().await.unwrap(), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_remove_absent_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("applications.json");
        let list = IdListFile::new(&path);

        assert!(!list.remove_first(4).await.unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partners.json");
        std::fs::write(&path, "[1,5]").unwrap();

        let list = IdListFile::new(&path);
        assert_eq!(list.ids().await.unwrap(), vec![1, 5]);
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partners.json");
        std::fs::write(&path, "[1,").unwrap();

        let list = IdListFile::new(&path);
        assert!(matches!(
            list.ids().await,
            Err(StorageError::Malformed { .. })
        ));
    }
}
