use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// A single medicine entry.
///
/// Fields other than `name` and `price` found in the stored document are kept
/// in `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    pub name: String,
    pub price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Medicine {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self { name: name.into(), price, extra: Map::new() }
    }
}

/// The whole persisted collection: `{"medicines": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MedicineDb {
    pub medicines: Vec<Medicine>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MedicineDb {
    pub fn new(medicines: Vec<Medicine>) -> Self {
        Self { medicines, extra: Map::new() }
    }

    /// First record whose name matches exactly.
    pub fn find(&self, name: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Medicine> {
        self.medicines.iter_mut().find(|m| m.name == name)
    }

    /// Remove only the first record with `name`; later duplicates stay.
    pub fn remove_first(&mut self, name: &str) -> Option<Medicine> {
        let idx = self.medicines.iter().position(|m| m.name == name)?;
        Some(self.medicines.remove(idx))
    }

    pub fn push(&mut self, medicine: Medicine) {
        self.medicines.push(medicine);
    }
}

/// Create/update input. Names are not checked for emptiness or uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicineInput {
    pub name: String,
    pub price: f64,
}

impl MedicineInput {
    /// JSON cannot represent NaN or infinities, so they never reach the store.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !self.price.is_finite() {
            return Err(ServiceError::Validation("price must be a finite number".into()));
        }
        Ok(())
    }
}

/// Success payload returned by mutating operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn created(name: &str) -> Self {
        Self { message: format!("Medicine created successfully with name: {name}") }
    }

    pub fn updated(name: &str) -> Self {
        Self { message: format!("Medicine updated successfully with name: {name}") }
    }

    pub fn deleted(name: &str) -> Self {
        Self { message: format!("Medicine deleted successfully with name: {name}") }
    }
}
