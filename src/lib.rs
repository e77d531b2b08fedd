//! Init Secrets Library
//!
//! Idempotently ensures that declared keys exist in labeled Kubernetes Secrets,
//! generating cryptographic material only for keys that are missing. Existing
//! values are never regenerated, and Secrets owned by another tool are never touched.
//!
//! ## Quick Start
//!
//! ```rust
//! use init_secrets::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod observability;
pub mod prelude;
pub mod secret;
pub mod store;
