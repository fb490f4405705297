use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use serde::de::DeserializeOwned;

use crate::errors::ApiError;

/// Form body accepted either as `application/x-www-form-urlencoded` or as
/// `multipart/form-data` (what browsers send for a `FormData` payload).
///
/// Multipart text fields are decoded into `T` with the same rules as the
/// urlencoded path, so a missing or unparseable field is a 422 either way.
#[derive(Debug)]
pub struct FormOrMultipart<T>(pub T);

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for FormOrMultipart<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|r| ApiError::Rejected(r.status(), r.body_text()))?;

        let mut fields: Vec<(String, String)> = Vec::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?
        {
            // unnamed parts cannot map onto a struct field
            let Some(name) = field.name().map(str::to_owned) else { continue };
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;
            fields.push((name, text));
        }

        // re-encode so field typing matches `Form` exactly
        let encoded = serde_urlencoded::to_string(&fields).map_err(|e| ApiError::Internal(e.to_string()))?;
        serde_urlencoded::from_str(&encoded).map(Self).map_err(|e| {
            ApiError::Rejected(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to deserialize form body: {e}"),
            )
        })
    }
}
