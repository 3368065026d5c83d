//! Reference-data taxonomy engine for the professional registration console.
//!
//! Categories, sub-categories, degree types, degrees and specialisations live in
//! [`taxonomy::EntityStore`]s; the category/sub-category association lives in a
//! [`taxonomy::MappingStore`]; qualifications and professions are composed from those
//! records and validated against them before anything is committed.

pub mod config;
pub mod error;
pub mod taxonomy;
pub mod telemetry;
