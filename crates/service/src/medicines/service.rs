use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::domain::{Confirmation, Medicine, MedicineDb, MedicineInput};
use super::repository::MedicineStorage;
use crate::errors::ServiceError;

const ENTITY: &str = "Medicine";

/// CRUD over the medicine collection, independent of the web framework.
///
/// Every call loads the full collection from storage. Mutations hold
/// `write_lock` across load-modify-save so two requests in this process cannot
/// overwrite each other's changes; writers in other processes are not seen.
pub struct MedicineService {
    storage: Arc<dyn MedicineStorage>,
    write_lock: Mutex<()>,
}

impl MedicineService {
    pub fn new(storage: Arc<dyn MedicineStorage>) -> Self {
        Self { storage, write_lock: Mutex::new(()) }
    }

    /// The whole collection, unmodified.
    pub async fn list_all(&self) -> Result<MedicineDb, ServiceError> {
        self.storage.load().await
    }

    /// First record whose name equals `name` exactly (case-sensitive).
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::medicines::{MedicineService, MedicineInput, repo::MemoryStore};
    /// let svc = MedicineService::new(Arc::new(MemoryStore::default()));
    /// tokio_test::block_on(svc.create(MedicineInput { name: "Aspirin".into(), price: 5.0 })).unwrap();
    /// let med = tokio_test::block_on(svc.get_by_name("Aspirin")).unwrap();
    /// assert_eq!(med.price, 5.0);
    /// assert!(tokio_test::block_on(svc.get_by_name("aspirin")).unwrap_err().is_not_found());
    /// ```
    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> Result<Medicine, ServiceError> {
        let db = self.storage.load().await?;
        db.find(name).cloned().ok_or_else(|| {
            debug!("medicine lookup missed");
            ServiceError::not_found(ENTITY)
        })
    }

    /// Append a record. Duplicate names are accepted; lookups keep
    /// resolving to the earliest one.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: MedicineInput) -> Result<Confirmation, ServiceError> {
        input.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut db = self.storage.load().await?;
        db.push(Medicine::new(input.name.clone(), input.price));
        self.storage.save(&db).await?;
        info!(price = input.price, "medicine_created");
        Ok(Confirmation::created(&input.name))
    }

    /// Set the price of the first record named `input.name`.
    /// Nothing is written when no record matches.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update(&self, input: MedicineInput) -> Result<Confirmation, ServiceError> {
        input.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut db = self.storage.load().await?;
        let med = db.find_mut(&input.name).ok_or_else(|| ServiceError::not_found(ENTITY))?;
        med.price = input.price;
        self.storage.save(&db).await?;
        info!(price = input.price, "medicine_updated");
        Ok(Confirmation::updated(&input.name))
    }

    /// Remove the first record named `name`. Nothing is written when no
    /// record matches.
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<Confirmation, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut db = self.storage.load().await?;
        db.remove_first(name).ok_or_else(|| ServiceError::not_found(ENTITY))?;
        self.storage.save(&db).await?;
        info!("medicine_deleted");
        Ok(Confirmation::deleted(name))
    }
}
