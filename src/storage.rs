use std::io::ErrorKind;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use crate::entities::{Article, ArticleId};
use crate::error::StoreError;

/// One line of the store log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StoreOperation {
    Create { article: Article },
    Update { article: Article },
    Delete { article_id: ArticleId },
}

pub trait Storage {
    async fn read_all(&self) -> Result<Vec<StoreOperation>, StoreError>;
    async fn write(&mut self, operation: StoreOperation) -> Result<(), StoreError>;
}

/// Append-only JSON-lines log on disk.
#[derive(Debug)]
pub struct FileStorage {
    log_path: PathBuf,
}

impl FileStorage {
    /// Opens the log at `log_path`, creating an empty one if nothing is there.
    pub fn new(log_path: PathBuf) -> anyhow::Result<Self> {
        match std::fs::metadata(&log_path) {
            Ok(metadata) if !metadata.is_file() => {
                anyhow::bail!("article log {} is not a file", log_path.display())
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                std::fs::File::create(&log_path)?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Self { log_path })
    }
}

impl Storage for FileStorage {
    async fn read_all(&self) -> Result<Vec<StoreOperation>, StoreError> {
        let file = File::open(&self.log_path).await.map_err(StoreError::LogIOError)?;
        let mut lines = BufReader::new(file).lines();
        let mut operations = Vec::new();
        while let Some(line) = lines.next_line().await.map_err(StoreError::LogIOError)? {
            if line.trim().is_empty() {
                continue;
            }
            operations.push(serde_json::from_str(&line).map_err(StoreError::LogSerializationError)?);
        }
        Ok(operations)
    }

    /// Appends one line. The log must already exist; it is never recreated here.
    async fn write(&mut self, operation: StoreOperation) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(&operation).map_err(StoreError::LogSerializationError)?;
        line.push(b'\n');
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)
            .await
            .map_err(StoreError::LogIOError)?;
        file.write_all(&line).await.map_err(StoreError::LogIOError)?;
        file.flush().await.map_err(StoreError::LogIOError)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    operations: Vec<StoreOperation>,
}

impl Storage for InMemoryStorage {
    async fn read_all(&self) -> Result<Vec<StoreOperation>, StoreError> {
        Ok(self.operations.clone())
    }

    async fn write(&mut self, operation: StoreOperation) -> Result<(), StoreError> {
        self.operations.push(operation);
        Ok(())
    }
}

/// The log selected at start-up.
#[derive(Debug)]
pub enum StorageBackend {
    File(FileStorage),
    InMemory(InMemoryStorage),
}

impl Storage for StorageBackend {
    async fn read_all(&self) -> Result<Vec<StoreOperation>, StoreError> {
        match self {
            StorageBackend::File(storage) => storage.read_all().await,
            StorageBackend::InMemory(storage) => storage.read_all().await,
        }
    }

    async fn write(&mut self, operation: StoreOperation) -> Result<(), StoreError> {
        match self {
            StorageBackend::File(storage) => storage.write(operation).await,
            StorageBackend::InMemory(storage) => storage.write(operation).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: ArticleId) -> Article {
        Article { id, title: format!("Article {}", id), tags: vec!["Rust".to_string()], ..Default::default() }
    }

    #[tokio::test]
    async fn test_file_storage_appends_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.log.json");
        let mut storage = FileStorage::new(path.clone()).unwrap();
        assert!(storage.read_all().await.unwrap().is_empty());

        storage.write(StoreOperation::Create { article: article(1) }).await.unwrap();
        storage.write(StoreOperation::Delete { article_id: 1 }).await.unwrap();

        let reopened = FileStorage::new(path).unwrap();
        let operations = reopened.read_all().await.unwrap();
        assert_eq!(operations, vec![
            StoreOperation::Create { article: article(1) },
            StoreOperation::Delete { article_id: 1 },
        ]);
    }

    #[tokio::test]
    async fn test_file_storage_rejects_garbage_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.log.json");
        std::fs::write(&path, "not json\n").unwrap();
        let storage = FileStorage::new(path).unwrap();
        let result = storage.read_all().await;
        assert!(matches!(result, Err(StoreError::LogSerializationError(_))));
    }

    #[tokio::test]
    async fn test_file_storage_write_fails_when_log_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.log.json");
        let mut storage = FileStorage::new(path.clone()).unwrap();
        std::fs::remove_file(&path).unwrap();

        let result = storage.write(StoreOperation::Delete { article_id: 1 }).await;
        assert!(matches!(result, Err(StoreError::LogIOError(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileStorage::new(dir.path().to_path_buf()).is_err());
    }
}
