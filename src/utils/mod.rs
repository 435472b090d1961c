//! Utility functions and helpers.
//!
//! - [`arn`] - Role ARN construction and identifier validation
//! - [`time`] - Timestamp conversion and report date formatting
//!
//! # Examples
//!
//! ```
//! use aws_key_audit::utils::arn::role_arn;
//!
//! assert_eq!(
//!     role_arn("111111111111", "auditor"),
//!     "arn:aws:iam::111111111111:role/auditor"
//! );
//! ```

pub mod arn;
pub mod time;
