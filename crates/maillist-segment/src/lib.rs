//! Segment evaluation.
//!
//! A segment is a saved conjunction of [`FilterCondition`]s. Membership is
//! computed on every read by scanning the campaign's records; nothing is
//! cached.
//!
//! [`FilterCondition`]: maillist_model::FilterCondition

#![deny(unsafe_code)]

mod explain;
mod filter;

pub use explain::{ConditionStats, explain};
pub use filter::{SegmentFilter, condition_matches};
