//! # AWS Key Audit
//!
//! Command-line tool that reports IAM users holding active access keys across
//! multiple AWS accounts.
//!
//! ## Overview
//!
//! For every target account the tool assumes a single audit role, pages through
//! the account's IAM users, looks up each user's access keys, and keeps the
//! ones whose status is `Active`. Keys from all accounts are flattened into one
//! CSV report:
//!
//! ```text
//! UserName,AccessKeyId,Status,CreateDate,AccountId
//! alice,AKIAEXAMPLE1,Active,2023-01-02 03:04:05,111111111111
//! ```
//!
//! Accounts are processed one after another. An account whose role cannot be
//! assumed is logged and left out; the report is still written.
//!
//! ## Architecture
//!
//! - [`inventory`] - Pipeline stages, data types, and the provider traits
//! - [`aws_api`] - AWS SDK implementations of those traits
//! - [`commands`] - Command implementations wiring the stages together
//! - [`config`] - Run configuration (CLI and JSON config file)
//! - [`error`] - Typed errors for role assumption and configuration
//! - [`utils`] - ARN helpers and timestamp formatting
//!
//! ## Example Usage
//!
//! ```bash
//! # Report on two accounts using the default credential chain
//! aws-key-audit report 111111111111 222222222222 --role-name auditor
//!
//! # Read accounts and role from a file, write to a custom path
//! aws-key-audit report --config accounts.json -o keys.csv
//!
//! # More detail on what is happening
//! aws-key-audit --log-level debug report 111111111111 --role-name auditor
//! ```
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```

pub mod aws_api;
pub mod commands;
pub mod config;
pub mod error;
pub mod inventory;
pub mod utils;
