use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use service::medicines::{Confirmation, Medicine, MedicineDb, MedicineInput};

use crate::errors::ApiError;
use crate::extract::FormOrMultipart;
use crate::metrics::observe;
use crate::state::ServerState;

/// Body of `POST /create` and `POST /update`, urlencoded or multipart.
#[derive(Debug, Deserialize)]
pub struct MedicineForm {
    pub name: String,
    pub price: f64,
}

/// Body of `DELETE /delete`, urlencoded or multipart.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub name: String,
}

impl From<MedicineForm> for MedicineInput {
    fn from(f: MedicineForm) -> Self {
        MedicineInput { name: f.name, price: f.price }
    }
}

/// GET /medicines
pub async fn list_medicines(State(state): State<ServerState>) -> Result<Json<MedicineDb>, ApiError> {
    let res = state.medicines.list_all().await;
    observe("list", &res);
    Ok(Json(res?))
}

/// GET /medicines/:name
pub async fn get_medicine(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Medicine>, ApiError> {
    let res = state.medicines.get_by_name(&name).await;
    observe("get", &res);
    Ok(Json(res?))
}

/// POST /create
pub async fn create_medicine(
    State(state): State<ServerState>,
    FormOrMultipart(form): FormOrMultipart<MedicineForm>,
) -> Result<Json<Confirmation>, ApiError> {
    let res = state.medicines.create(form.into()).await;
    observe("create", &res);
    Ok(Json(res?))
}

/// POST /update
pub async fn update_medicine(
    State(state): State<ServerState>,
    FormOrMultipart(form): FormOrMultipart<MedicineForm>,
) -> Result<Json<Confirmation>, ApiError> {
    let res = state.medicines.update(form.into()).await;
    observe("update", &res);
    Ok(Json(res?))
}

/// DELETE /delete
pub async fn delete_medicine(
    State(state): State<ServerState>,
    FormOrMultipart(form): FormOrMultipart<DeleteForm>,
) -> Result<Json<Confirmation>, ApiError> {
    let res = state.medicines.delete(&form.name).await;
    observe("delete", &res);
    Ok(Json(res?))
}
