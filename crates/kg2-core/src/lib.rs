//! # kg2-core
//!
//! Core types shared across the RTX-KG2 gateway crates:
//! - [`Value`]: tagged scalar/list/map value returned by graph queries
//! - [`EntityRecord`]: one node or relationship, with internal bookkeeping
//!   fields split from user-visible fields at construction
//! - [`TableDescriptor`] and [`TableListing`]: database object names by type
//! - Cross-cutting error types

pub mod errors;
pub mod record;
pub mod table;
pub mod value;

pub use errors::CoreError;
pub use record::{EntityRecord, INTERNAL_MARKER, Record, filter_entity_metadata, is_internal_field};
pub use table::{TableDescriptor, TableListing, TableType};
pub use value::Value;
