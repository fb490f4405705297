//! Medicines module: domain, storage port, and the CRUD service.
//!
//! The service loads the whole collection for every call and writes the
//! whole collection back after every mutation.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Confirmation, Medicine, MedicineDb, MedicineInput};
pub use repository::MedicineStorage;
pub use service::MedicineService;
