//! # Observability
//!
//! Observability modules for structured logging.
//!
//! - `logging`: tracing subscriber setup (text or JSON)

pub mod logging;

pub use logging::init_tracing;
