use std::sync::Arc;

use service::medicines::{MedicineService, MedicineStorage};

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub medicines: Arc<MedicineService>,
}

impl ServerState {
    pub fn new(storage: Arc<dyn MedicineStorage>) -> Self {
        Self { medicines: Arc::new(MedicineService::new(storage)) }
    }
}
