//! Mailing list operations.
//!
//! [`MailingList`] wraps any [`Store`](maillist_store::Store) and exposes the
//! user-facing operations:
//!
//! - campaigns and their cascade delete
//! - the two-step upload: [`MailingList::prepare_upload`] then
//!   [`MailingList::commit_upload`]
//! - segments, evaluated on every read
//! - CSV export of a campaign or a segment

#![deny(unsafe_code)]

mod campaigns;
mod catalog;
mod error;
mod export;
mod lists;
mod segments;
mod service;
mod upload;

pub use error::{Result, ServiceError};
pub use service::MailingList;
pub use upload::{UploadOutcome, project_row};
