//! Default profile and layout normalization.

use super::types::{Ingredient, MAX_KEYWORDS, PersonalInfo, ProfileData, SCHEMA_VERSION};

impl Default for ProfileData {
    /// Fresh profile: empty personal info and six empty ingredients laid out
    /// in sequential order.
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            circle_name: String::new(),
            personal_info: PersonalInfo::default(),
            ingredients: std::array::from_fn(Ingredient::empty),
        }
    }
}

/// Restore the layout invariants on a freshly parsed profile.
///
/// Resets every `order` to its array index, recomputes `position` and
/// truncates keywords. Returns `true` if anything changed.
pub fn normalize(profile: &mut ProfileData) -> bool {
    let mut changed = false;

    for (index, ingredient) in profile.ingredients.iter_mut().enumerate() {
        let before = (ingredient.order(), ingredient.position());
        ingredient.place(index);
        if before != (ingredient.order(), ingredient.position()) {
            changed = true;
        }
    }

    if profile.personal_info.keywords.len() > MAX_KEYWORDS {
        profile.personal_info.keywords.truncate(MAX_KEYWORDS);
        changed = true;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::GridPosition;

    fn is_normalized(profile: &ProfileData) -> bool {
        profile
            .ingredients
            .iter()
            .enumerate()
            .all(|(index, i)| i.order() == index && i.position() == GridPosition::from_order(index))
            && profile.personal_info.keywords.len() <= MAX_KEYWORDS
    }

    #[test]
    fn test_default_profile() {
        let profile = ProfileData::default();
        assert_eq!(profile.schema_version, 1);
        assert!(profile.circle_name.is_empty());
        assert!(profile.personal_info.keywords.is_empty());
        assert!(profile.personal_info.attributes.is_empty());

        let orders: Vec<usize> = profile.ingredients.iter().map(|i| i.order()).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(
            profile.ingredients[4].position(),
            GridPosition { row: 1, column: 1 }
        );
        assert!(is_normalized(&profile));
    }

    #[test]
    fn test_normalize_fixes_layout() {
        let json = r#"{
            "circleName": "",
            "personalInfo": {
                "avatar": "", "mainInterests": "", "otherInterests": "",
                "keywords": ["a", "b", "c", "d", "e", "f", "g"],
                "attributes": {}
            },
            "ingredients": [
                { "name": "", "image": "", "percentage": 0, "trend": "up", "order": 5, "position": { "row": 0, "column": 0 } },
                { "name": "", "image": "", "percentage": 0, "trend": "up", "order": 1, "position": { "row": 0, "column": 1 } },
                { "name": "", "image": "", "percentage": 0, "trend": "up", "order": 2, "position": { "row": 0, "column": 2 } },
                { "name": "", "image": "", "percentage": 0, "trend": "up", "order": 3, "position": { "row": 1, "column": 0 } },
                { "name": "", "image": "", "percentage": 0, "trend": "up", "order": 4, "position": { "row": 1, "column": 1 } },
                { "name": "", "image": "", "percentage": 0, "trend": "up", "order": 0, "position": { "row": 1, "column": 2 } }
            ]
        }"#;
        let mut profile: ProfileData = serde_json::from_str(json).unwrap();
        assert!(!is_normalized(&profile));

        assert!(normalize(&mut profile));
        assert!(is_normalized(&profile));
        assert_eq!(profile.ingredients[0].order(), 0);
        assert_eq!(
            profile.ingredients[5].position(),
            GridPosition { row: 1, column: 2 }
        );
        assert_eq!(profile.personal_info.keywords.len(), 5);

        assert!(!normalize(&mut profile));
    }
}
