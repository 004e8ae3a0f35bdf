//! The profile store.
//!
//! [`ProfileStore`] owns the current [`ProfileData`], loads it from a
//! [`KeyValueStorage`] and writes the whole value back after every
//! mutation. Consumers that need to react to changes register a callback
//! with [`ProfileStore::subscribe`].

pub mod observer;

pub use observer::{Callback, ProfileChange, SubscriptionId, Subscribers};

use crate::config::{DEFAULT_STORAGE_KEY, StoreConfig};
use crate::error::{ProfileError, Result};
use crate::storage::{
    self, AttributeChoice, INGREDIENT_SLOTS, IngredientPatch, KeyValueStorage,
    MAX_KEYWORDS, ProfileData, Selection,
};

/// Result of [`ProfileStore::load_from_storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored value replaced the in-memory profile.
    Loaded,
    /// Nothing stored under the key.
    Missing,
    /// Stored value could not be parsed; the in-memory profile is unchanged.
    Malformed,
}

/// Holds the profile and keeps storage in sync with it.
#[derive(Debug)]
pub struct ProfileStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    pretty: bool,
    profile: ProfileData,
    subscribers: Subscribers,
}

impl<S: KeyValueStorage> ProfileStore<S> {
    /// Store with a default profile, persisting under `profile-data`.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            pretty: false,
            profile: ProfileData::default(),
            subscribers: Subscribers::default(),
        }
    }

    pub fn from_config(storage: S, config: &StoreConfig) -> Self {
        let mut store = Self::with_key(storage, config.storage_key.clone());
        store.pretty = config.pretty_json;
        store
    }

    pub fn profile(&self) -> &ProfileData {
        &self.profile
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback run after every replacement or mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ProfileData, &ProfileChange) + 'static,
    {
        self.subscribers.add(Box::new(callback))
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the in-memory profile with the stored one.
    ///
    /// A stored value that is corrupt or fails to parse is logged and
    /// otherwise ignored: the current profile stays as it was and no error
    /// is returned. Only a failure of the storage itself is an error.
    pub fn load_from_storage(&mut self) -> Result<LoadOutcome> {
        let stored = match self.storage.get(&self.key) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                log::debug!("No stored profile under '{}'", self.key);
                return Ok(LoadOutcome::Missing);
            }
            Err(e @ ProfileError::CorruptValue { .. }) => {
                log::error!("Failed to load profile data: {}", e);
                return Ok(LoadOutcome::Malformed);
            }
            Err(e) => return Err(e),
        };

        let mut profile: ProfileData = match serde_json::from_str(&stored) {
            Ok(profile) => profile,
            Err(e) => {
                log::error!("Failed to load profile data: {}", e);
                return Ok(LoadOutcome::Malformed);
            }
        };

        if storage::normalize(&mut profile) {
            log::warn!(
                "Stored profile under '{}' had an inconsistent layout; normalized",
                self.key
            );
        }

        self.profile = profile;
        self.subscribers.notify(&self.profile, &ProfileChange::Loaded);
        log::info!("Loaded profile from '{}'", self.key);
        Ok(LoadOutcome::Loaded)
    }

    /// Serialize the whole profile and write it under the store key.
    pub fn save_to_storage(&mut self) -> Result<()> {
        let content = if self.pretty {
            serde_json::to_string_pretty(&self.profile)?
        } else {
            serde_json::to_string(&self.profile)?
        };
        self.storage.set(&self.key, &content)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn update_circle_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.profile.circle_name = name.into();
        self.commit(ProfileChange::CircleName)
    }

    /// Set the avatar. The value is stored as given.
    pub fn update_avatar(&mut self, base64: impl Into<String>) -> Result<()> {
        self.profile.personal_info.avatar = base64.into();
        self.commit(ProfileChange::Avatar)
    }

    /// Keep the first five keywords; the rest are dropped.
    pub fn update_keywords<I, T>(&mut self, keywords: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.profile.personal_info.keywords = keywords
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(Into::into)
            .collect();
        self.commit(ProfileChange::Keywords)
    }

    pub fn update_interests(
        &mut self,
        main: Option<String>,
        other: Option<String>,
    ) -> Result<()> {
        let info = &mut self.profile.personal_info;
        if let Some(main) = main {
            info.main_interests = main;
        }
        if let Some(other) = other {
            info.other_interests = other;
        }
        self.commit(ProfileChange::Interests)
    }

    /// Insert or replace an attribute.
    pub fn update_attribute(
        &mut self,
        name: impl Into<String>,
        choice: AttributeChoice,
    ) -> Result<()> {
        let name = name.into();
        self.profile
            .personal_info
            .attributes
            .insert(name.clone(), choice);
        self.commit(ProfileChange::Attribute(name))
    }

    /// Change which option of an existing attribute is selected.
    pub fn select_attribute(&mut self, name: &str, selected: Selection) -> Result<()> {
        let choice = self
            .profile
            .personal_info
            .attributes
            .get_mut(name)
            .ok_or_else(|| ProfileError::UnknownAttribute(name.to_string()))?;
        choice.selected = selected;
        self.commit(ProfileChange::Attribute(name.to_string()))
    }

    /// Merge `patch` into the ingredient at `index`.
    ///
    /// A non-finite percentage is rejected: JSON cannot represent it, so
    /// the saved profile would no longer load.
    pub fn update_ingredient(&mut self, index: usize, patch: &IngredientPatch) -> Result<()> {
        check_index(index)?;
        if let Some(percentage) = patch.percentage.filter(|p| !p.is_finite()) {
            return Err(ProfileError::InvalidInput(format!(
                "Percentage must be a finite number, got {}",
                percentage
            )));
        }
        self.profile.ingredients[index].apply(patch);
        self.commit(ProfileChange::Ingredient(index))
    }

    /// Move the ingredient at `from` to `to`.
    ///
    /// Same as removing it and reinserting it at `to` in the shortened list.
    /// Afterwards every ingredient's order is its index and its position is
    /// recomputed.
    pub fn update_ingredients_order(&mut self, from: usize, to: usize) -> Result<()> {
        check_index(from)?;
        check_index(to)?;

        let ingredients = &mut self.profile.ingredients;
        if from < to {
            ingredients[from..=to].rotate_left(1);
        } else if from > to {
            ingredients[to..=from].rotate_right(1);
        }
        for (index, ingredient) in ingredients.iter_mut().enumerate() {
            ingredient.place(index);
        }

        self.commit(ProfileChange::IngredientsOrder { from, to })
    }

    /// Notify subscribers, then write through.
    fn commit(&mut self, change: ProfileChange) -> Result<()> {
        log::debug!("Profile change: {:?}", change);
        self.subscribers.notify(&self.profile, &change);
        self.save_to_storage()
    }
}

fn check_index(index: usize) -> Result<()> {
    if index >= INGREDIENT_SLOTS {
        return Err(ProfileError::IndexOutOfRange {
            index,
            len: INGREDIENT_SLOTS,
        });
    }
    Ok(())
}
