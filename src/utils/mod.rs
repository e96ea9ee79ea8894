//! Utility functions shared across layers.
//!
//! - [`cookies`] - Cookie header parsing and `Set-Cookie` values
//! - [`deadline`] - Time limits for store calls
//! - [`like_pattern`] - Literal substring patterns for `ILIKE`

pub mod cookies;
pub mod deadline;
pub mod like_pattern;
