//! Service layer for the medicine store.
//! - `medicines` holds the domain model, the storage port and the CRUD service.
//! - `storage` holds reusable JSON file persistence.
//! - Handlers in the `server` crate depend only on `MedicineService`.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod medicines;
#[cfg(test)]
pub mod test_support;
