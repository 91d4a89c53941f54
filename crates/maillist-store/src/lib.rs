//! Persistence for campaigns, lists, records, segments and the field catalog.
//!
//! The service layer talks to storage only through the traits in this crate.
//! [`MemoryStore`] implements all of them; [`snapshot`] writes it to disk
//! between CLI invocations.

#![deny(unsafe_code)]

mod error;
mod memory;
pub mod snapshot;
mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use traits::{CampaignStore, CatalogStore, ListStore, RecordStore, SegmentStore, Store};
