//! CLI library components for the mailing list tool.

pub mod logging;
pub mod settings;
