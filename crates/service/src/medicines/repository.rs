use async_trait::async_trait;

use super::domain::MedicineDb;
use crate::errors::ServiceError;

/// Storage port for the medicine collection.
/// Implementations load and save the whole collection as one unit.
#[async_trait]
pub trait MedicineStorage: Send + Sync {
    async fn load(&self) -> Result<MedicineDb, ServiceError>;
    async fn save(&self, db: &MedicineDb) -> Result<(), ServiceError>;
}
