use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::medicines::domain::MedicineDb;
use crate::medicines::repository::MedicineStorage;

/// In-process medicine storage; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MedicineDb>,
}

impl MemoryStore {
    pub fn new(db: MedicineDb) -> Self {
        Self { inner: RwLock::new(db) }
    }
}

#[async_trait]
impl MedicineStorage for MemoryStore {
    async fn load(&self) -> Result<MedicineDb, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, db: &MedicineDb) -> Result<(), ServiceError> {
        *self.inner.write().await = db.clone();
        Ok(())
    }
}
