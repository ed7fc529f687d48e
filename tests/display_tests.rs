//! # Display Tests
//!
//! Result cards and saved-search listings in both bundled languages.

use chefmatch::localization::LocalizationManager;
use chefmatch::recipe_display::{
    compatibility_caption, format_links, format_recipe_card, format_saved_searches, metadata_captions,
};
use chefmatch::recipe_model::{IngredientLine, MatchResult, Recipe};
use chefmatch::session::SessionState;

#[cfg(test)]
mod tests {
    use super::*;

    fn localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    fn fried_rice() -> Recipe {
        Recipe::new("52801", "Chicken Fried Rice")
            .with_category("Chicken")
            .with_area("Chinese")
            .with_instructions("Fry everything.")
            .with_ingredient(IngredientLine::new("chicken", "200g"))
            .with_ingredient(IngredientLine::new("rice", "2 cups"))
            .with_ingredient(IngredientLine::new("soy sauce", "1 tbs"))
    }

    #[test]
    fn test_compatibility_caption() {
        let manager = localization();
        let result = MatchResult::new(fried_rice(), 2, 3);

        assert_eq!(
            compatibility_caption(&result, &manager, "en"),
            "Compatibility: 2/3 ingredients"
        );
        assert_eq!(
            compatibility_caption(&result, &manager, "pt"),
            "Compatibilidade: 2/3 ingredientes"
        );
    }

    #[test]
    fn test_metadata_captions_fill_missing_fields() {
        let manager = localization();

        let (category, cuisine) = metadata_captions(&fried_rice(), &manager, "en");
        assert_eq!(category, "Category: Chicken");
        assert_eq!(cuisine, "Cuisine: Chinese");

        let (category, cuisine) = metadata_captions(&Recipe::new("1", "Plain"), &manager, "pt");
        assert_eq!(category, "Categoria: N/D");
        assert_eq!(cuisine, "Cozinha: N/D");
    }

    #[test]
    fn test_links_only_for_present_urls() {
        let manager = localization();
        let mut recipe = fried_rice();
        assert!(format_links(&recipe, &manager, "en").is_empty());

        recipe.video_url = Some("https://youtube.com/watch?v=1".to_string());
        let links = format_links(&recipe, &manager, "en");
        assert_eq!(links, vec!["📺 [Video on YouTube](https://youtube.com/watch?v=1)"]);
    }

    #[test]
    fn test_recipe_card() {
        let manager = localization();
        let mut session = SessionState::new();
        let result = MatchResult::new(fried_rice(), 2, 3);
        session.set_rating("52801", 5).unwrap();

        let user = vec!["chicken".to_string(), "rice".to_string()];
        let card = format_recipe_card(&result, &user, &session, &manager, "en");

        assert!(card.starts_with("🍳 **Chicken Fried Rice**\n"));
        assert!(card.contains("🎯 Compatibility: 2/3 ingredients\n"));
        assert!(card.contains("⭐ Your rating: 5/5\n"));
        assert!(card.contains("✅ 200g chicken\n✅ 2 cups rice\n❌ 1 tbs soy sauce\n"));
        assert!(card.contains("Fry everything."));
        assert!(!card.contains("⚠️"));
    }

    #[test]
    fn test_recipe_card_shows_translation_and_warning() {
        let manager = localization();
        let session = SessionState::new();
        let translated = Recipe::new("52801", "Arroz Frito com Frango")
            .with_area("Chinesa")
            .with_ingredient(IngredientLine::new("frango", "200g"))
            .with_ingredient(IngredientLine::new("arroz", "2 xícaras"))
            .with_ingredient(IngredientLine::new("soy sauce", "1 colher de sopa"));
        let result = MatchResult::new(fried_rice(), 2, 3).with_translation(translated, true);

        let user = vec!["frango".to_string()];
        let card = format_recipe_card(&result, &user, &session, &manager, "pt");

        assert!(card.starts_with("🍳 **Arroz Frito com Frango**\n"));
        assert!(card.contains("🌍 Cozinha: Chinesa\n"));
        assert!(card.contains("⚠️ "));
        assert!(card.contains("✅ 200g frango\n❌ 2 xícaras arroz\n"));
        assert!(!card.contains("Instruções"));
    }

    #[test]
    fn test_saved_searches_listing() {
        let manager = localization();
        let mut session = SessionState::new();

        assert_eq!(
            format_saved_searches(&session, &manager, "en"),
            "No saved recipes yet. Run a search to get started!\n"
        );

        let result = MatchResult::new(fried_rice(), 2, 3);
        session.save_main_result(&result);
        session.set_rating("52801", 4).unwrap();

        assert_eq!(
            format_saved_searches(&session, &manager, "en"),
            "1. Chicken Fried Rice (2/3) ⭐ 4/5\n"
        );
    }
}
