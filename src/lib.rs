//! Circle Profile Store
//!
//! Persistent store for a circle profile: circle name, personal info and
//! six ingredient slots laid out on a 2x3 grid.
//!
//! # Features
//!
//! - Load the profile from key-value storage, tolerating corrupt data
//! - Write-through mutations (avatar, keywords, ingredients, ordering, ...)
//! - Change notification for consumers
//! - File-backed and in-memory storage
//!
//! # Example
//!
//! ```
//! use circle_profile_store::{IngredientPatch, MemoryStorage, ProfileStore, Trend};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = ProfileStore::new(MemoryStorage::new());
//!     store.load_from_storage()?;
//!
//!     store.update_keywords(["rust", "tea", "hiking"])?;
//!     store.update_ingredient(0, &IngredientPatch::default().name("Coffee").trend(Trend::Up))?;
//!
//!     // Drag the first slot to the end of the top row
//!     store.update_ingredients_order(0, 2)?;
//!     assert_eq!(store.profile().ingredients[2].name, "Coffee");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod utils;

// Re-exports for convenience
pub use config::StoreConfig;
pub use error::{ProfileError, Result};
pub use storage::{
    AttributeChoice, FileStorage, GridPosition, Ingredient, IngredientPatch, KeyValueStorage,
    MemoryStorage, PersonalInfo, ProfileData, Selection, Trend,
};
pub use store::{LoadOutcome, ProfileChange, ProfileStore, SubscriptionId};
