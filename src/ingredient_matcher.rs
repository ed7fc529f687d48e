//! # Ingredient Matcher Module
//!
//! Scores a recipe's ingredient list against the ingredients a user has.
//!
//! Matching is a loose bidirectional substring test on lower-cased names: a
//! recipe ingredient counts when a user ingredient is contained in it, or when
//! it is contained in a user ingredient. This tolerates plurals and translated
//! forms ("tomato" vs "tomatoes", "milk" vs "coconut milk") at the cost of
//! occasionally counting distinct ingredients that share a substring.

use tracing::trace;

/// Outcome of scoring one recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    /// Recipe ingredients found among the user's ingredients
    pub matches: usize,
    /// Non-empty recipe ingredient slots
    pub total: usize,
}

/// Split comma-separated user input into ingredient names
///
/// ```rust
/// use chefmatch::ingredient_matcher::parse_ingredient_input;
///
/// assert_eq!(parse_ingredient_input(" egg, flour ,, sugar"), vec!["egg", "flour", "sugar"]);
/// ```
pub fn parse_ingredient_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|ingredient| !ingredient.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize user ingredients once so they can be scored against many recipes
pub fn normalize_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Vec<String> {
    ingredients
        .iter()
        .map(|ingredient| ingredient.as_ref().trim().to_lowercase())
        .filter(|ingredient| !ingredient.is_empty())
        .collect()
}

/// Whether one recipe ingredient matches any of the (already normalized) user ingredients
pub fn is_match(recipe_ingredient: &str, normalized_user: &[String]) -> bool {
    let recipe_ingredient = recipe_ingredient.trim().to_lowercase();
    if recipe_ingredient.is_empty() {
        return false;
    }

    normalized_user.iter().any(|user| {
        recipe_ingredient.contains(user.as_str()) || user.contains(recipe_ingredient.as_str())
    })
}

/// Score a recipe against the user's ingredients
///
/// # Arguments
///
/// * `recipe_ingredients` - Ingredient names in recipe slot order
/// * `user_ingredients` - Ingredients the user typed, in any case
///
/// # Examples
///
/// ```rust
/// use chefmatch::ingredient_matcher::score;
///
/// let result = score(&["Chicken", "rice", "soy sauce"], &["chicken", "RICE"]);
/// assert_eq!(result.matches, 2);
/// assert_eq!(result.total, 3);
/// ```
pub fn score<R: AsRef<str>, U: AsRef<str>>(recipe_ingredients: &[R], user_ingredients: &[U]) -> MatchScore {
    let normalized_user = normalize_ingredients(user_ingredients);

    let mut total = 0;
    let mut matches = 0;
    for ingredient in recipe_ingredients {
        let ingredient = ingredient.as_ref();
        if ingredient.trim().is_empty() {
            continue;
        }
        total += 1;
        if is_match(ingredient, &normalized_user) {
            matches += 1;
        }
    }

    trace!(matches, total, "Scored recipe ingredients");
    MatchScore { matches, total }
}
