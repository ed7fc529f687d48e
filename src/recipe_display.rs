//! Text formatting helpers for showing search results

use crate::ingredient_matcher::{is_match, normalize_ingredients};
use crate::localization::LocalizationManager;
use crate::recipe_model::{MatchResult, Recipe};
use crate::session::SessionState;

/// "Compatibility: 2/3 ingredients"
pub fn compatibility_caption(result: &MatchResult, localization: &LocalizationManager, language: &str) -> String {
    localization.get_message_with_args(
        "compatibility",
        language,
        &[
            ("matches", &result.matches.to_string()),
            ("total", &result.total.to_string()),
        ],
    )
}

/// Category and cuisine captions, "N/A" when the provider gave none
pub fn metadata_captions(recipe: &Recipe, localization: &LocalizationManager, language: &str) -> (String, String) {
    let not_available = localization.get_message_in_language("not-available", language, None);
    let category = recipe.category.as_deref().unwrap_or(&not_available);
    let cuisine = recipe.area.as_deref().unwrap_or(&not_available);

    (
        localization.get_message_with_args("category", language, &[("category", category)]),
        localization.get_message_with_args("cuisine", language, &[("cuisine", cuisine)]),
    )
}

/// One line per ingredient, marked ✅ when the user has it and ❌ otherwise
pub fn format_ingredient_checklist(recipe: &Recipe, user_ingredients: &[String]) -> String {
    let normalized = normalize_ingredients(user_ingredients);
    let mut result = String::new();

    for line in &recipe.ingredients {
        let indicator = if is_match(&line.ingredient, &normalized) {
            "✅"
        } else {
            "❌"
        };
        result.push_str(&format!("{} {}\n", indicator, capitalize(&line.to_string())));
    }

    result
}

/// Source and video links that exist for a recipe
pub fn format_links(recipe: &Recipe, localization: &LocalizationManager, language: &str) -> Vec<String> {
    let mut links = Vec::new();
    if let Some(source) = &recipe.source_url {
        links.push(format!(
            "🔗 [{}]({})",
            localization.get_message_in_language("original-recipe", language, None),
            source
        ));
    }
    if let Some(video) = &recipe.video_url {
        links.push(format!(
            "📺 [{}]({})",
            localization.get_message_in_language("video", language, None),
            video
        ));
    }
    links
}

/// Full text card for one result
pub fn format_recipe_card(
    result: &MatchResult,
    user_ingredients: &[String],
    session: &SessionState,
    localization: &LocalizationManager,
    language: &str,
) -> String {
    let recipe = result.recipe();
    let (category, cuisine) = metadata_captions(recipe, localization, language);

    let mut card = String::new();
    card.push_str(&format!("🍳 **{}**\n", recipe.name));
    card.push_str(&format!("🎯 {}\n", compatibility_caption(result, localization, language)));
    card.push_str(&format!("🗂️ {category}\n"));
    card.push_str(&format!("🌍 {cuisine}\n"));

    if let Some(rating) = session.rating(result.id()) {
        let rating = rating.to_string();
        card.push_str(&format!(
            "⭐ {}\n",
            localization.get_message_with_args("your-rating", language, &[("rating", &rating)])
        ));
    }

    if result.translation_fallback {
        card.push_str(&format!(
            "⚠️ {}\n",
            localization.get_message_in_language("translation-warning", language, None)
        ));
    }

    for link in format_links(recipe, localization, language) {
        card.push_str(&link);
        card.push('\n');
    }

    card.push_str(&format!(
        "\n📋 {}:\n",
        localization.get_message_in_language("ingredients-heading", language, None)
    ));
    card.push_str(&format_ingredient_checklist(recipe, user_ingredients));

    if let Some(instructions) = &recipe.instructions {
        card.push_str(&format!(
            "\n👩‍🍳 {}:\n{}\n",
            localization.get_message_in_language("instructions-heading", language, None),
            instructions
        ));
    }

    card
}

/// Sidebar listing of saved main results
pub fn format_saved_searches(session: &SessionState, localization: &LocalizationManager, language: &str) -> String {
    let mut result = String::new();
    let mut any = false;

    for (i, saved) in session.saved_searches().enumerate() {
        any = true;
        result.push_str(&format!(
            "{}. {} ({}/{})",
            i + 1,
            saved.recipe().name,
            saved.matches,
            saved.total
        ));
        if let Some(rating) = session.rating(saved.id()) {
            result.push_str(&format!(" ⭐ {rating}/5"));
        }
        result.push('\n');
    }

    if !any {
        result.push_str(&localization.get_message_in_language("no-saved-recipes", language, None));
        result.push('\n');
    }
    result
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
