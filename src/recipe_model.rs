//! # Recipe Data Model
//!
//! This module defines the typed records exchanged between the recipe
//! provider, the aggregator and the presentation layer.
//!
//! ## Core Concepts
//!
//! - **Recipe**: a fully fetched provider record with up to 20 ingredient lines
//! - **IngredientLine**: one non-empty `(ingredient, measure)` slot
//! - **MatchResult**: a recipe annotated with how many of its ingredients
//!   match the user's input
//! - **MealSummary**: the short form returned by filter queries
//!
//! Provider JSON is decoded into [`RawMeal`] where every field is optional,
//! then validated once into a [`Recipe`]. Nothing downstream looks at raw JSON.
//!
//! ## Usage
//!
//! ```rust
//! use chefmatch::recipe_model::{IngredientLine, MatchResult, Recipe};
//!
//! let recipe = Recipe::new("52772", "Teriyaki Chicken Casserole")
//!     .with_area("Japanese")
//!     .with_ingredient(IngredientLine::new("soy sauce", "3/4 cup"));
//!
//! let result = MatchResult::new(recipe, 1, 1);
//! assert_eq!(result.ratio(), 1.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::errors::ProviderError;

/// Highest ingredient slot index in a provider record
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// Cuisine filter value meaning "no filter"
pub const ALL_AREAS: &str = "All";

/// One ingredient slot of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Ingredient name as listed by the provider (e.g. "soy sauce")
    pub ingredient: String,
    /// Measure text, empty when the provider gave none (e.g. "3/4 cup")
    pub measure: String,
}

impl IngredientLine {
    pub fn new(ingredient: &str, measure: &str) -> Self {
        Self {
            ingredient: ingredient.to_string(),
            measure: measure.to_string(),
        }
    }
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.measure.is_empty() {
            write!(f, "{}", self.ingredient)
        } else {
            write!(f, "{} {}", self.measure, self.ingredient)
        }
    }
}

/// A validated recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Provider-assigned unique identifier
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Cuisine/area (e.g. "Italian")
    pub area: Option<String>,
    pub instructions: Option<String>,
    /// Non-empty ingredient slots in provider order
    pub ingredients: Vec<IngredientLine>,
    pub source_url: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl Recipe {
    /// Create a recipe with only an identifier and a name
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: None,
            area: None,
            instructions: None,
            ingredients: Vec::new(),
            source_url: None,
            video_url: None,
            thumbnail_url: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_area(mut self, area: &str) -> Self {
        self.area = Some(area.to_string());
        self
    }

    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = Some(instructions.to_string());
        self
    }

    pub fn with_ingredient(mut self, line: IngredientLine) -> Self {
        self.ingredients.push(line);
        self
    }

    /// Ingredient names in slot order
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients
            .iter()
            .map(|line| line.ingredient.as_str())
            .collect()
    }

    /// Whether this recipe passes the cuisine filter
    ///
    /// `None` and the [`ALL_AREAS`] sentinel accept every recipe. Otherwise the
    /// area must equal the filter exactly.
    pub fn matches_area(&self, filter: Option<&str>) -> bool {
        match active_area_filter(filter) {
            Some(wanted) => self.area.as_deref() == Some(wanted),
            None => true,
        }
    }
}

/// Returns the filter value when it actually restricts results
pub fn active_area_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|value| !value.is_empty() && *value != ALL_AREAS)
}

/// A recipe scored against the user's ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Record exactly as the provider returned it
    pub original: Recipe,
    /// Translated copy shown to the user, when translation is enabled
    pub translated: Option<Recipe>,
    /// Number of recipe ingredients matching a user ingredient
    pub matches: usize,
    /// Number of non-empty ingredient slots
    pub total: usize,
    /// Set when at least one field kept its original text after a failed translation
    pub translation_fallback: bool,
}

impl MatchResult {
    pub fn new(original: Recipe, matches: usize, total: usize) -> Self {
        Self {
            original,
            translated: None,
            matches: matches.min(total),
            total,
            translation_fallback: false,
        }
    }

    pub fn with_translation(mut self, translated: Recipe, fallback: bool) -> Self {
        self.translated = Some(translated);
        self.translation_fallback = fallback;
        self
    }

    pub fn id(&self) -> &str {
        &self.original.id
    }

    /// The record to display: translated when available, original otherwise
    pub fn recipe(&self) -> &Recipe {
        self.translated.as_ref().unwrap_or(&self.original)
    }

    /// Fraction of recipe ingredients the user has, `0.0` for empty recipes
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matches as f64 / self.total as f64
        }
    }
}

/// Short recipe form returned by filter queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail_url: Option<String>,
}

/// Entry of the area listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AreaEntry {
    #[serde(rename = "strArea")]
    pub area: Option<String>,
}

/// The `{"meals": [...]}` envelope every provider endpoint uses
///
/// The provider answers `{"meals": null}` when nothing matches.
#[derive(Debug, Clone, Deserialize)]
pub struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    pub fn into_meals(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

/// Full provider record before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "strSource")]
    pub source_url: Option<String>,
    #[serde(rename = "strYoutube")]
    pub video_url: Option<String>,
    /// `strIngredientN` / `strMeasureN` slots and any other fields
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn slot_text(slots: &HashMap<String, Value>, key: &str) -> String {
    slots
        .get(key)
        .and_then(Value::as_str)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

impl TryFrom<RawMeal> for Recipe {
    type Error = ProviderError;

    fn try_from(raw: RawMeal) -> Result<Self, Self::Error> {
        let id = non_empty(raw.id).ok_or(ProviderError::MissingField("idMeal"))?;
        let name = non_empty(raw.name).ok_or(ProviderError::MissingField("strMeal"))?;

        let ingredients = (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let ingredient = slot_text(&raw.slots, &format!("strIngredient{slot}"));
                if ingredient.is_empty() {
                    return None;
                }
                let measure = slot_text(&raw.slots, &format!("strMeasure{slot}"));
                Some(IngredientLine {
                    ingredient,
                    measure,
                })
            })
            .collect();

        Ok(Recipe {
            id,
            name,
            category: non_empty(raw.category),
            area: non_empty(raw.area),
            instructions: non_empty(raw.instructions),
            ingredients,
            source_url: non_empty(raw.source_url),
            video_url: non_empty(raw.video_url),
            thumbnail_url: non_empty(raw.thumbnail_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMeal {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_recipe_from_full_record() {
        let recipe = Recipe::try_from(raw(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strInstructions": "Preheat oven to 350.",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strYoutube": "https://www.youtube.com/watch?v=4aZr5hZXP_s",
            "strSource": "",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "water",
            "strMeasure2": "1/2 cup",
            "strIngredient3": "",
            "strMeasure3": " ",
            "strIngredient4": null,
            "strMeasure4": null,
        })))
        .unwrap();

        assert_eq!(recipe.id, "52772");
        assert_eq!(recipe.area.as_deref(), Some("Japanese"));
        assert_eq!(recipe.source_url, None);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1], IngredientLine::new("water", "1/2 cup"));
    }

    #[test]
    fn test_recipe_keeps_slot_order_with_gaps() {
        let recipe = Recipe::try_from(raw(json!({
            "idMeal": "1",
            "strMeal": "Gap",
            "strIngredient2": "egg",
            "strIngredient20": "salt",
            "strMeasure20": "pinch",
        })))
        .unwrap();

        assert_eq!(recipe.ingredient_names(), vec!["egg", "salt"]);
        assert_eq!(recipe.ingredients[0].measure, "");
    }

    #[test]
    fn test_recipe_requires_id_and_name() {
        let err = Recipe::try_from(raw(json!({"strMeal": "No id"}))).unwrap_err();
        assert!(matches!(err, ProviderError::MissingField("idMeal")));

        let err = Recipe::try_from(raw(json!({"idMeal": "7", "strMeal": "  "}))).unwrap_err();
        assert!(matches!(err, ProviderError::MissingField("strMeal")));
    }

    #[test]
    fn test_envelope_with_null_meals() {
        let envelope: MealsEnvelope<MealSummary> =
            serde_json::from_str(r#"{"meals": null}"#).unwrap();
        assert!(envelope.into_meals().is_empty());

        let envelope: MealsEnvelope<MealSummary> = serde_json::from_str("{}").unwrap();
        assert!(envelope.into_meals().is_empty());
    }

    fn decode_meals<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Vec<T> {
        serde_json::from_value::<MealsEnvelope<T>>(body).unwrap().into_meals()
    }

    #[test]
    fn test_envelope_decodes_any_deserializable_item() {
        let areas: Vec<AreaEntry> = decode_meals(json!({"meals": [{"strArea": "Thai"}]}));
        assert_eq!(areas[0].area.as_deref(), Some("Thai"));

        let raw: Vec<RawMeal> = decode_meals(json!({}));
        assert!(raw.is_empty());
    }

    #[test]
    fn test_ratio_guards_zero_total() {
        let result = MatchResult::new(Recipe::new("1", "Empty"), 0, 0);
        assert_eq!(result.ratio(), 0.0);

        let result = MatchResult::new(Recipe::new("2", "Half"), 1, 2);
        assert_eq!(result.ratio(), 0.5);
    }

    #[test]
    fn test_area_filter_sentinel() {
        let recipe = Recipe::new("1", "Pasta").with_area("Italian");
        assert!(recipe.matches_area(None));
        assert!(recipe.matches_area(Some(ALL_AREAS)));
        assert!(recipe.matches_area(Some("Italian")));
        assert!(!recipe.matches_area(Some("italian")));
        assert!(!Recipe::new("2", "No area").matches_area(Some("Italian")));
    }

    #[test]
    fn test_display_prefers_translation() {
        let original = Recipe::new("1", "Rice");
        let translated = Recipe::new("1", "Arroz");
        let result = MatchResult::new(original, 1, 1).with_translation(translated, false);
        assert_eq!(result.recipe().name, "Arroz");
        assert_eq!(result.original.name, "Rice");
    }
}
