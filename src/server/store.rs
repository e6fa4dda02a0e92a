//! Disk-backed file store.
//!
//! Each upload is written to `<root>/<uuid>` and described by an entry in
//! `<root>/index.json`. Identifiers are assigned sequentially and never reused.
//! The in-memory index only changes once the new index is on disk.

use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::format::format_file_size;
use crate::{FileId, FileRecord};

const INDEX_FILE: &str = "index.json";
const INDEX_TMP_FILE: &str = "index.json.tmp";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found with id {0}")]
    NotFound(u64),

    #[error("Cannot store empty file")]
    Empty,

    #[error("File size exceeds maximum allowed size of {limit}")]
    TooLarge { limit: String },

    #[error("Filename contains invalid path sequence: {0}")]
    InvalidName(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt file index: {0}")]
    Index(#[from] serde_json::Error),
}

/// One entry of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: u64,
    pub file_name: String,
    pub file_type: Option<String>,
    pub file_size: u64,
    pub upload_date_time: String,
    blob: String,
}

impl StoredFile {
    /// Wire form, with the download URL rooted at `base`.
    pub fn to_record(&self, base: &str) -> FileRecord {
        FileRecord {
            id: FileId::from(self.id),
            file_name: self.file_name.clone(),
            file_type: self.file_type.clone(),
            file_size: self.file_size,
            upload_date_time: self.upload_date_time.clone(),
            download_url: Some(format!("{}/{}", base.trim_end_matches('/'), self.id)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Index {
    next_id: u64,
    files: Vec<StoredFile>,
}

pub struct FileStore {
    root: PathBuf,
    max_size: u64,
    index: Mutex<Index>,
}

/// Bytes of an upload being streamed into a blob.
pub struct PendingUpload {
    file_name: String,
    blob: String,
    path: PathBuf,
    file: fs::File,
    size: u64,
    max_size: u64,
}

impl PendingUpload {
    pub async fn write(&mut self, chunk: &[u8]) -> Result<(), StoreError> {
        self.size += chunk.len() as u64;
        if self.size > self.max_size {
            return Err(StoreError::TooLarge {
                limit: format_file_size(self.max_size),
            });
        }
        self.file.write_all(chunk).await?;
        Ok(())
    }

    /// Removes the partially written blob.
    pub async fn discard(self) {
        drop(self.file);
        if let Err(e) = fs::remove_file(&self.path).await {
            log::warn!("Could not remove partial upload {}: {}", self.path.display(), e);
        }
    }
}

impl FileStore {
    /// Opens (or creates) the store rooted at `root`. Uploads above `max_size` bytes are refused.
    pub async fn open(root: impl Into<PathBuf>, max_size: u64) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        let index = match fs::read(root.join(INDEX_FILE)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Index::default(),
            Err(e) => return Err(e.into()),
        };
        log::info!(
            "Opened file store at {} with {} files",
            root.display(),
            index.files.len()
        );
        Ok(Self {
            root,
            max_size,
            index: Mutex::new(index),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn list(&self) -> Vec<StoredFile> {
        log::info!("Retrieving all files");
        self.index.lock().await.files.clone()
    }

    /// Metadata of file `id` and the path of its blob.
    pub async fn locate(&self, id: u64) -> Result<(StoredFile, PathBuf), StoreError> {
        let file = self.find(id).await?;
        let path = self.root.join(&file.blob);
        Ok((file, path))
    }

    /// Validates `file_name` and opens a fresh blob for it.
    pub async fn begin(&self, file_name: &str) -> Result<PendingUpload, StoreError> {
        let file_name = clean_name(file_name);
        if file_name.contains("..") {
            return Err(StoreError::InvalidName(file_name));
        }
        let blob = Uuid::new_v4().to_string();
        let path = self.root.join(&blob);
        let file = fs::File::create(&path).await?;
        Ok(PendingUpload {
            file_name,
            blob,
            path,
            file,
            size: 0,
            max_size: self.max_size,
        })
    }

    /// Records a fully written upload in the index.
    pub async fn commit(
        &self,
        mut upload: PendingUpload,
        file_type: Option<String>,
    ) -> Result<StoredFile, StoreError> {
        if upload.size == 0 {
            upload.discard().await;
            return Err(StoreError::Empty);
        }
        if let Err(e) = upload.file.flush().await {
            upload.discard().await;
            return Err(e.into());
        }

        let PendingUpload {
            file_name,
            blob,
            path,
            file,
            size,
            ..
        } = upload;
        drop(file);

        log::info!("Storing file: {}", file_name);
        let mut index = self.index.lock().await;
        let mut next = index.clone();
        next.next_id += 1;
        let stored = StoredFile {
            id: next.next_id,
            file_name,
            file_type,
            file_size: size,
            upload_date_time: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            blob,
        };
        next.files.push(stored.clone());
        if let Err(e) = self.persist(&next).await {
            drop(index);
            if let Err(cleanup) = fs::remove_file(&path).await {
                log::warn!("Could not remove unrecorded upload {}: {}", path.display(), cleanup);
            }
            return Err(e);
        }
        *index = next;
        Ok(stored)
    }

    pub async fn delete(&self, id: u64) -> Result<StoredFile, StoreError> {
        let mut index = self.index.lock().await;
        let position = index
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| {
                log::error!("File not found with id: {}", id);
                StoreError::NotFound(id)
            })?;
        let mut next = index.clone();
        let removed = next.files.remove(position);
        log::info!("Deleting file: {}", removed.file_name);
        self.persist(&next).await?;
        *index = next;
        drop(index);

        if let Err(e) = fs::remove_file(self.root.join(&removed.blob)).await {
            log::warn!("Could not remove blob of file {}: {}", id, e);
        }
        Ok(removed)
    }

    async fn find(&self, id: u64) -> Result<StoredFile, StoreError> {
        self.index
            .lock()
            .await
            .files
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| {
                log::error!("File not found with id: {}", id);
                StoreError::NotFound(id)
            })
    }

    /// Replaces the index on disk through a temporary file and a rename.
    async fn persist(&self, index: &Index) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(index)?;
        let tmp = self.root.join(INDEX_TMP_FILE);
        fs::write(&tmp, bytes).await?;
        if let Err(e) = fs::rename(&tmp, self.root.join(INDEX_FILE)).await {
            log::error!("Could not replace file index: {}", e);
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Normalizes separators and drops `.` segments, keeping the name otherwise intact.
fn clean_name(raw: &str) -> String {
    raw.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with(store: &FileStore, name: &str, bytes: &[u8]) -> StoredFile {
        let mut upload = store.begin(name).await.unwrap();
        upload.write(bytes).await.unwrap();
        store
            .commit(upload, Some("text/plain".to_string()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn stores_reads_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path(), 1024).await.unwrap();

        let stored = store_with(&store, "notes.txt", b"hello").await;
        assert_eq!(stored.id, 1);
        assert_eq!(stored.file_size, 5);

        let (meta, path) = store.locate(1).await.unwrap();
        assert_eq!(meta.file_name, "notes.txt");
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");

        store.delete(1).await.unwrap();
        assert!(store.list().await.is_empty());
        assert!(!path.exists());
        assert!(matches!(store.locate(1).await, Err(StoreError::NotFound(1))));
        assert!(matches!(store.delete(1).await, Err(StoreError::NotFound(1))));
    }

    #[tokio::test]
    async fn index_survives_reopen_and_ids_are_not_reused() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path(), 1024).await.unwrap();
            store_with(&store, "a.txt", b"a").await;
            store_with(&store, "b.txt", b"b").await;
            store.delete(2).await.unwrap();
        }

        let store = FileStore::open(dir.path(), 1024).await.unwrap();
        let names: Vec<_> = store.list().await.into_iter().map(|f| f.file_name).collect();
        assert_eq!(names, ["a.txt"]);
        assert_eq!(store_with(&store, "c.txt", b"c").await.id, 3);
    }

    #[tokio::test]
    async fn rejects_empty_oversized_and_traversing_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).await.unwrap();

        let upload = store.begin("empty.txt").await.unwrap();
        assert!(matches!(
            store.commit(upload, None).await,
            Err(StoreError::Empty)
        ));

        let mut upload = store.begin("big.bin").await.unwrap();
        let err = upload.write(b"too many bytes").await.unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds maximum allowed size of 4 Bytes");
        upload.discard().await;

        let err = store.begin("../etc/passwd").await.err().unwrap();
        assert_eq!(
            err.to_string(),
            "Filename contains invalid path sequence: ../etc/passwd"
        );

        // Only the index may remain on disk.
        let mut entries = std::fs::read_dir(dir.path()).unwrap();
        assert!(entries.all(|e| e.unwrap().file_name() == INDEX_FILE));
    }

    #[tokio::test]
    async fn failed_index_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path(), 1024).await.unwrap();
        let kept = store_with(&store, "a.txt", b"a").await;

        // A directory in place of the index makes every rename onto it fail.
        let index_path = dir.path().join(INDEX_FILE);
        std::fs::remove_file(&index_path).unwrap();
        std::fs::create_dir(&index_path).unwrap();

        let mut upload = store.begin("b.txt").await.unwrap();
        upload.write(b"b").await.unwrap();
        assert!(matches!(
            store.commit(upload, None).await,
            Err(StoreError::Io(_))
        ));
        assert!(matches!(store.delete(1).await, Err(StoreError::Io(_))));
        assert_eq!(store.list().await, vec![kept.clone()]);

        let blobs: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name != INDEX_FILE && name != INDEX_TMP_FILE)
            .collect();
        assert_eq!(blobs, vec![kept.blob]);
    }

    #[test]
    fn cleans_separators() {
        assert_eq!(clean_name("dir\\./report.pdf"), "dir/report.pdf");
        assert_eq!(clean_name("plain.txt"), "plain.txt");
    }

    #[test]
    fn record_carries_download_url() {
        let stored = StoredFile {
            id: 7,
            file_name: "a.txt".into(),
            file_type: None,
            file_size: 1,
            upload_date_time: "2024-01-01T00:00:00+00:00".into(),
            blob: "x".into(),
        };
        let record = stored.to_record("http://localhost:8080/api/files/");
        assert_eq!(record.id, FileId::from(7));
        assert_eq!(
            record.download_url.as_deref(),
            Some("http://localhost:8080/api/files/7")
        );
    }
}
