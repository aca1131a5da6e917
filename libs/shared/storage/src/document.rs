use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on document '{document}': {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Document '{document}' is corrupt: {source}")]
    Corrupt {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode document '{document}': {source}")]
    Encode {
        document: String,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed JSON document store. Each named document lives in its own
/// file under the storage root and carries its own async mutex, so every
/// read-modify-write through [`DocumentStore::update`] is exclusive with
/// respect to all other writers of the same document.
///
/// All persisted state goes through this type; nothing else may touch the
/// underlying files.
pub struct DocumentStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn document_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(
            locks
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    async fn load<T>(&self, name: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path_for(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                error!("Document {} at {} failed to parse", name, path.display());
                StorageError::Corrupt {
                    document: name.to_string(),
                    source,
                }
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Document {} not present yet, starting empty", name);
                Ok(T::default())
            }
            Err(source) => Err(StorageError::Io {
                document: name.to_string(),
                source,
            }),
        }
    }

    async fn persist<T>(&self, name: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize,
    {
        let io = |source| StorageError::Io {
            document: name.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(io)?;

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode {
            document: name.to_string(),
            source,
        })?;

        // Write-then-rename so readers never observe a half-written document.
        let tmp = self.root.join(format!("{name}.json.tmp"));
        tokio::fs::write(&tmp, &bytes).await.map_err(io)?;
        tokio::fs::rename(&tmp, self.path_for(name)).await.map_err(io)?;

        Ok(())
    }

    /// Read the current contents of a document. A document that has never
    /// been written yields `T::default()`.
    pub async fn read<T>(&self, name: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let lock = self.document_lock(name).await;
        let _guard = lock.lock().await;
        self.load(name).await
    }

    /// Atomic read-modify-write: the document mutex is held across load,
    /// mutation, and persist, so concurrent updates serialize and each
    /// closure sees the latest committed state.
    pub async fn update<T, R>(
        &self,
        name: &str,
        mutate: impl FnOnce(&mut T) -> R,
    ) -> Result<R, StorageError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let lock = self.document_lock(name).await;
        let _guard = lock.lock().await;

        let mut value: T = self.load(name).await?;
        let outcome = mutate(&mut value);
        self.persist(name, &value).await?;

        Ok(outcome)
    }
}
