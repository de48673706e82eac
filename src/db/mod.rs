//! Local persistence: patient records and uploaded images.
//!
//! Layout:
//! - `models.rs`: the persisted record shape
//! - `json_store.rs`: whole-file JSON store keyed by username
//! - `images.rs`: upload directory for microscopy images

pub mod images;
pub mod json_store;
pub mod models;

pub use images::ImageStore;
pub use json_store::{RecordMap, RecordStore};
pub use models::PatientRecord;
