use std::{path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::medicines::domain::MedicineDb;
use crate::medicines::repository::MedicineStorage;
use crate::storage::json_doc_store::JsonDocStore;

/// File-backed medicine storage persisting `{"medicines": [...]}` as JSON.
#[derive(Clone)]
pub struct JsonFileStore {
    doc: JsonDocStore<MedicineDb>,
}

impl JsonFileStore {
    /// Open the data file, seeding an empty collection if it is missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let doc = JsonDocStore::open(path, &MedicineDb::default()).await?;
        Ok(Arc::new(Self { doc }))
    }

    pub fn path(&self) -> &Path {
        self.doc.path()
    }
}

#[async_trait]
impl MedicineStorage for JsonFileStore {
    async fn load(&self) -> Result<MedicineDb, ServiceError> { self.doc.load().await }
    async fn save(&self, db: &MedicineDb) -> Result<(), ServiceError> { self.doc.save(db).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medicines::domain::Medicine;
    use crate::test_support::TempPath;

    #[tokio::test]
    async fn seeds_empty_collection_and_persists() -> Result<(), anyhow::Error> {
        let guard = TempPath::file("medicines");
        let tmp = guard.path();
        let store = JsonFileStore::open(tmp).await?;

        let raw = tokio::fs::read_to_string(tmp).await?;
        assert_eq!(raw, r#"{"medicines":[]}"#);

        let mut db = store.load().await?;
        db.push(Medicine::new("Aspirin", 5.0));
        store.save(&db).await?;

        // reload from disk through a fresh handle
        let reopened = JsonFileStore::open(tmp).await?;
        assert_eq!(reopened.load().await?, db);

        Ok(())
    }

    #[tokio::test]
    async fn load_then_save_keeps_records_and_order() -> Result<(), anyhow::Error> {
        let guard = TempPath::file("medicines");
        let tmp = guard.path();
        let original = r#"{"medicines":[{"name":"B","price":2.5,"form":"tablet"},{"name":"A","price":1.0}]}"#;
        tokio::fs::write(tmp, original).await?;

        let store = JsonFileStore::open(tmp).await?;
        let db = store.load().await?;
        store.save(&db).await?;

        let before: serde_json::Value = serde_json::from_str(original)?;
        let after: serde_json::Value = serde_json::from_slice(&tokio::fs::read(tmp).await?)?;
        assert_eq!(before, after);

        Ok(())
    }
}
