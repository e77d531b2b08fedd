//! # Secrets
//!
//! What to generate: declarations, labels, and the material generator itself.

pub mod declaration;
pub mod generator;
pub mod labels;
pub mod private_keys;
pub mod types;
pub mod validation;

pub use declaration::{parse_declarations, ParseError, SecretDeclaration};
pub use generator::{GenerationCause, GenerationError, MaterialGenerator, SecretGenerator};
pub use labels::{is_managed, parse_labels, ManagedLabels};
pub use types::SecretType;
