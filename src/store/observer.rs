//! Change notification for [`ProfileStore`](super::ProfileStore) consumers.

use crate::storage::ProfileData;

/// What a mutation touched.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileChange {
    /// Whole value replaced from storage.
    Loaded,
    CircleName,
    Avatar,
    Keywords,
    Interests,
    /// Attribute inserted, replaced or re-selected.
    Attribute(String),
    /// Fields of the ingredient at this index changed.
    Ingredient(usize),
    /// Ingredient moved; every order and position was recomputed.
    IngredientsOrder { from: usize, to: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Callback = Box<dyn FnMut(&ProfileData, &ProfileChange)>;

/// Ordered list of callbacks.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn add(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Call every subscriber in subscription order.
    pub fn notify(&mut self, profile: &ProfileData, change: &ProfileChange) {
        for (_, callback) in self.entries.iter_mut() {
            callback(profile, change);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_order_and_remove() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::default();

        let first = {
            let seen = Rc::clone(&seen);
            subscribers.add(Box::new(move |_: &ProfileData, change: &ProfileChange| {
                seen.borrow_mut().push(("first", change.clone()))
            }))
        };
        {
            let seen = Rc::clone(&seen);
            subscribers.add(Box::new(move |_: &ProfileData, change: &ProfileChange| {
                seen.borrow_mut().push(("second", change.clone()))
            }));
        }

        let profile = ProfileData::default();
        subscribers.notify(&profile, &ProfileChange::Avatar);
        assert_eq!(
            *seen.borrow(),
            vec![
                ("first", ProfileChange::Avatar),
                ("second", ProfileChange::Avatar)
            ]
        );

        assert!(subscribers.remove(first));
        assert!(!subscribers.remove(first));
        assert_eq!(subscribers.len(), 1);

        subscribers.notify(&profile, &ProfileChange::Keywords);
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(seen.borrow()[2], ("second", ProfileChange::Keywords));
    }
}
