//! Search recipes from the terminal
//!
//! ```text
//! cargo run --example find_recipes -- "chicken, rice" --area=Chinese --rate=5
//! cargo run --example find_recipes -- --browse=Italian
//! ```

use anyhow::Result;
use chefmatch::aggregator::RecipeAggregator;
use chefmatch::config::AppConfig;
use chefmatch::ingredient_matcher::parse_ingredient_input;
use chefmatch::localization::{LocalizationManager, DEFAULT_LANGUAGE};
use chefmatch::observability::init_tracing;
use chefmatch::recipe_display::{format_recipe_card, format_saved_searches};
use chefmatch::recipe_model::ALL_AREAS;
use chefmatch::session::SessionState;
use tracing::info;

#[derive(Default)]
struct Args {
    ingredients: Vec<String>,
    area: Option<String>,
    browse: Option<String>,
    rating: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--area=") {
            args.area = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--browse=") {
            args.browse = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--rate=") {
            args.rating = Some(value.to_string());
        } else {
            args.ingredients.push(arg);
        }
    }
    args
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.logging)?;
    let args = parse_args();

    let localization = LocalizationManager::new()?;
    let aggregator = RecipeAggregator::from_config(&config)?;
    let language = if aggregator.translation_enabled() {
        config.translation.user_language.clone()
    } else {
        DEFAULT_LANGUAGE.to_string()
    };
    let mut session = SessionState::new();

    println!("{}\n", localization.get_message_in_language("app-title", &language, None));

    let areas: Vec<String> = aggregator
        .list_areas()
        .await
        .into_iter()
        .map(|area| {
            if area == ALL_AREAS {
                localization.get_message_in_language("all-areas", &language, None)
            } else {
                area
            }
        })
        .collect();
    info!(areas = areas.len(), "Loaded cuisine list");
    println!("🌍 {}\n", areas.join(", "));

    if let Some(area) = &args.browse {
        let meals = aggregator.recipes_by_area(area).await;
        if meals.is_empty() {
            println!(
                "{}",
                localization.get_message_with_args("no-area-recipes", &language, &[("area", area)])
            );
        }
        for meal in &meals {
            if let Some(result) = aggregator.recipe_details(&mut session, &meal.id).await {
                println!("{}", format_recipe_card(&result, &[], &session, &localization, &language));
            }
        }
        return Ok(());
    }

    let ingredients = parse_ingredient_input(&args.ingredients.join(","));
    if ingredients.is_empty() {
        println!("{}", localization.get_message_in_language("enter-ingredient", &language, None));
        return Ok(());
    }

    let results = aggregator.search(&mut session, &ingredients, args.area.as_deref()).await;
    if results.is_empty() {
        println!("{}", localization.get_message_in_language("no-recipes-found", &language, None));
        return Ok(());
    }

    if let Some(rating) = &args.rating {
        let saved = rating
            .parse::<u8>()
            .is_ok_and(|rating| session.set_rating(results[0].id(), rating).is_ok());
        let key = if saved { "rating-saved" } else { "rating-invalid" };
        println!("{}\n", localization.get_message_in_language(key, &language, None));
    }

    let count = results.len().to_string();
    println!(
        "{}\n",
        localization.get_message_with_args("recipes-found", &language, &[("count", &count)])
    );
    for result in results.iter().take(3) {
        println!("{}", format_recipe_card(result, &ingredients, &session, &localization, &language));
    }

    println!(
        "{}:\n{}",
        localization.get_message_in_language("saved-recipes-heading", &language, None),
        format_saved_searches(&session, &localization, &language)
    );
    Ok(())
}
