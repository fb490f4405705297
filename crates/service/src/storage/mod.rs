//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores that persist a whole JSON document
//! at a time.

pub mod json_doc_store;
