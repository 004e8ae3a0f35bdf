//! Profile data model and persistence backends.
//!
//! Holds the serde types for the persisted profile, the default profile,
//! and the key-value storage the store writes through to.

pub mod backend;
pub mod defaults;
pub mod types;

// Re-export commonly used items
pub use backend::{FileStorage, KeyValueStorage, MemoryStorage};
pub use defaults::normalize;
pub use types::*;
