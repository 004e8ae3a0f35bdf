//! Persisted profile shape.
//!
//! Field names match the stored JSON (camelCase). The JSON produced here is
//! both the storage format and the data contract for consumers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of ingredient slots in a profile.
pub const INGREDIENT_SLOTS: usize = 6;

/// Columns in the ingredient grid (2 rows x 3 columns).
pub const GRID_COLUMNS: usize = 3;

/// Maximum number of keywords kept in personal info.
pub const MAX_KEYWORDS: usize = 5;

/// Current persisted schema version.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Root aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    /// Blobs written before versioning load as version 1.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub circle_name: String,
    pub personal_info: PersonalInfo,
    /// Always exactly six; a blob with any other count fails to parse.
    pub ingredients: [Ingredient; INGREDIENT_SLOTS],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    /// Base64 image (usually a data URL) or empty.
    pub avatar: String,
    pub main_interests: String,
    pub other_interests: String,
    pub keywords: Vec<String>,
    pub attributes: BTreeMap<String, AttributeChoice>,
}

/// A binary choice: two labels and which one is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChoice {
    pub options: [String; 2],
    pub selected: Selection,
}

impl AttributeChoice {
    pub fn new(first: impl Into<String>, second: impl Into<String>, selected: Selection) -> Self {
        Self {
            options: [first.into(), second.into()],
            selected,
        }
    }

    /// Label of the selected option.
    pub fn selected_label(&self) -> &str {
        &self.options[self.selected.index()]
    }
}

/// Selected index of an [`AttributeChoice`]. Stored as `0` or `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Selection {
    #[default]
    First,
    Second,
}

impl Selection {
    pub fn index(self) -> usize {
        match self {
            Selection::First => 0,
            Selection::Second => 1,
        }
    }
}

impl TryFrom<u8> for Selection {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Selection::First),
            1 => Ok(Selection::Second),
            other => Err(format!("selected must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Selection> for u8 {
    fn from(value: Selection) -> Self {
        value.index() as u8
    }
}

/// Direction of an ingredient's recent change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    #[default]
    Stable,
    Down,
}

impl Trend {
    pub fn name(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Stable => "stable",
            Trend::Down => "down",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Cell in the 2x3 ingredient grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u8,
    pub column: u8,
}

impl GridPosition {
    /// Layout cell for a display order.
    pub fn from_order(order: usize) -> Self {
        Self {
            row: (order / GRID_COLUMNS) as u8,
            column: (order % GRID_COLUMNS) as u8,
        }
    }
}

/// One of the six ingredient slots.
///
/// `order` and `position` are owned by the store: they only change through
/// reordering, and `position` is always derived from `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub image: String,
    pub percentage: f64,
    pub trend: Trend,
    order: usize,
    position: GridPosition,
}

impl Ingredient {
    /// Empty slot placed at `order`.
    pub fn empty(order: usize) -> Self {
        Self {
            name: String::new(),
            image: String::new(),
            percentage: 0.0,
            trend: Trend::Stable,
            order,
            position: GridPosition::from_order(order),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Move to `order`, recomputing the grid cell.
    pub(crate) fn place(&mut self, order: usize) {
        self.order = order;
        self.position = GridPosition::from_order(order);
    }

    /// Shallow merge: fields set in `patch` overwrite, the rest stay.
    pub fn apply(&mut self, patch: &IngredientPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(percentage) = patch.percentage {
            self.percentage = percentage;
        }
        if let Some(trend) = patch.trend {
            self.trend = trend;
        }
    }
}

/// Partial update for an [`Ingredient`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

impl IngredientPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image.is_none()
            && self.percentage.is_none()
            && self.trend.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_position_from_order() {
        assert_eq!(GridPosition::from_order(0), GridPosition { row: 0, column: 0 });
        assert_eq!(GridPosition::from_order(2), GridPosition { row: 0, column: 2 });
        assert_eq!(GridPosition::from_order(3), GridPosition { row: 1, column: 0 });
        assert_eq!(GridPosition::from_order(5), GridPosition { row: 1, column: 2 });
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut ingredient = Ingredient::empty(4);
        ingredient.name = "Coffee".into();
        ingredient.image = "img".into();

        ingredient.apply(&IngredientPatch::default().percentage(42.5).trend(Trend::Up));

        assert_eq!(ingredient.name, "Coffee");
        assert_eq!(ingredient.image, "img");
        assert_eq!(ingredient.percentage, 42.5);
        assert_eq!(ingredient.trend, Trend::Up);
        assert_eq!(ingredient.order(), 4);
        assert_eq!(ingredient.position(), GridPosition { row: 1, column: 1 });
    }

    #[test]
    fn test_ingredient_json_shape() {
        let json = serde_json::to_value(Ingredient::empty(3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "",
                "image": "",
                "percentage": 0.0,
                "trend": "stable",
                "order": 3,
                "position": { "row": 1, "column": 0 }
            })
        );
    }

    #[test]
    fn test_selection_rejects_out_of_range() {
        let parsed: std::result::Result<AttributeChoice, _> =
            serde_json::from_str(r#"{ "options": ["a", "b"], "selected": 2 }"#);
        assert!(parsed.is_err());

        let choice: AttributeChoice =
            serde_json::from_str(r#"{ "options": ["Early bird", "Night owl"], "selected": 1 }"#)
                .unwrap();
        assert_eq!(choice.selected, Selection::Second);
        assert_eq!(choice.selected_label(), "Night owl");
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Down).unwrap(), "\"down\"");
        let trend: Trend = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(trend, Trend::Up);
    }
}
