//! # Controller
//!
//! Core controller modules for the secret initialiser.
//!
//! - `reconciler`: fetch-or-create, ownership check, lazy fill and write-back of Secrets
pub mod reconciler;
