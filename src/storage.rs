use crate::errors::StoreError;
use crate::models::AppData;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

#[async_trait]
pub trait Store: Send + Sync {
    async fn load(&self) -> Result<AppData, StoreError>;
    async fn persist(&self, data: &AppData) -> Result<(), StoreError>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load(&self) -> Result<AppData, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no state file yet, starting fresh");
                Ok(AppData::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, data: &AppData) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(data)?;
        fs::write(&self.path, payload).await?;
        debug!(path = %self.path.display(), "state persisted");
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<AppData>>,
    writes: Mutex<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: AppData) -> Self {
        Self {
            snapshot: Mutex::new(Some(data)),
            writes: Mutex::new(0),
        }
    }

    pub async fn snapshot(&self) -> Option<AppData> {
        self.snapshot.lock().await.clone()
    }

    pub async fn write_count(&self) -> u64 {
        *self.writes.lock().await
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> Result<AppData, StoreError> {
        Ok(self.snapshot.lock().await.clone().unwrap_or_default())
    }

    async fn persist(&self, data: &AppData) -> Result<(), StoreError> {
        *self.snapshot.lock().await = Some(data.clone());
        *self.writes.lock().await += 1;
        Ok(())
    }
}
