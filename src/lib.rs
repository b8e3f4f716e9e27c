//! Hemascope: a CBC-based anemia screening and classification service
//!
//! Hemascope classifies a blood sample's anemia status and morphological
//! subtype from hemoglobin and the corpuscular indices (MCV, MCH, MCHC),
//! against fixed clinical reference ranges. A thin REST surface exposes the
//! classifier to presentation layers.

pub mod api;
pub mod config;
pub mod hematology;

pub use hematology::classifier::Classifier;
pub use hematology::{CbcIndices, Diagnosis, Sex};
