//! Command implementations.
//!
//! - [`active_keys`] - Report IAM users holding active access keys across accounts

pub mod active_keys;
