//! Core data model for mailing list campaigns.
//!
//! The types here are shared by every other crate in the workspace:
//!
//! - **Catalog**: [`SystemHeader`] entries that uploaded columns are mapped onto
//! - **Mapping**: [`ColumnMapping`] from original file headers to catalog ids
//! - **Records**: [`Record`] rows grouped under an [`UploadedList`] and a [`Campaign`]
//! - **Segments**: [`Segment`] saved queries made of [`FilterCondition`]s

#![deny(unsafe_code)]

mod campaign;
mod catalog;
mod error;
mod ids;
mod list;
mod mapping;
mod record;
mod segment;

pub use campaign::Campaign;
pub use catalog::{SystemHeader, default_catalog, field_slug};
pub use error::{ModelError, Result};
pub use ids::{CampaignId, FieldId, ListId, RecordId, SegmentId, UserId};
pub use list::UploadedList;
pub use mapping::ColumnMapping;
pub use record::{Record, RecordData};
pub use segment::{FilterCondition, Operator, Segment};
