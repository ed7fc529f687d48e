//! # Recipe Aggregator Module
//!
//! The search pipeline: turn a list of user ingredients into a ranked list
//! of [`MatchResult`]s.
//!
//! ## Pipeline
//!
//! 1. One filter-by-ingredient query per user ingredient (translated into the
//!    provider language first when translation is on). Identifiers are
//!    unioned in first-seen order; failed queries are skipped.
//! 2. The candidate list is cut to `candidate_cap`.
//! 3. Candidates already in the session cache are reused. The rest are looked
//!    up concurrently, at most `fetch_concurrency` at a time, and the whole
//!    batch is awaited before going on. Failed lookups are dropped.
//! 4. The cuisine filter is applied to the provider's own area field, for
//!    cached and fresh recipes alike.
//! 5. Fresh recipes are translated (optional) and every recipe is scored
//!    against the user's original ingredient list.
//! 6. Results are ranked by match ratio, then match count, and truncated.
//!
//! Workers only return values; the session is written by the caller's task
//! once the batch is complete.

use anyhow::Result;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, SearchConfig};
use crate::ingredient_matcher::score;
use crate::provider::{MealDbClient, RecipeProvider};
use crate::recipe_model::{active_area_filter, MatchResult, MealSummary, Recipe, ALL_AREAS};
use crate::session::SessionState;
use crate::translation::TranslationAdapter;

/// Orchestrates recipe search over a provider and an optional translator
pub struct RecipeAggregator {
    provider: Arc<dyn RecipeProvider>,
    translator: Option<Arc<TranslationAdapter>>,
    config: SearchConfig,
}

impl RecipeAggregator {
    pub fn new(provider: Arc<dyn RecipeProvider>, config: SearchConfig) -> Self {
        Self {
            provider,
            translator: None,
            config,
        }
    }

    /// Enable translation between the provider's and the user's language
    pub fn with_translation(mut self, translator: TranslationAdapter) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    /// Build the HTTP-backed aggregator described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = MealDbClient::new(&config.provider)?;
        let aggregator = Self::new(Arc::new(provider), config.search.clone());

        Ok(match TranslationAdapter::from_config(&config.translation)? {
            Some(translator) => {
                info!(
                    provider_language = %translator.languages().provider,
                    user_language = %translator.languages().user,
                    "Translation enabled"
                );
                aggregator.with_translation(translator)
            }
            None => aggregator,
        })
    }

    pub fn translation_enabled(&self) -> bool {
        self.translator.is_some()
    }

    /// Search with the configured default limit and remember the best result
    pub async fn search(
        &self,
        session: &mut SessionState,
        user_ingredients: &[String],
        cuisine_filter: Option<&str>,
    ) -> Vec<MatchResult> {
        let results = self
            .find_matching_recipes(session, user_ingredients, cuisine_filter, self.config.result_limit)
            .await;

        if let Some(main) = results.first() {
            session.save_main_result(main);
        }
        results
    }

    /// Find recipes using the user's ingredients, best match first
    ///
    /// # Arguments
    ///
    /// * `session` - Session cache consulted before fetching and updated after
    /// * `user_ingredients` - Ingredients as the user typed them
    /// * `cuisine_filter` - Exact provider area to keep, `None` or `"All"` for any
    /// * `limit` - Maximum number of results
    ///
    /// Never fails: provider or translation problems only shrink the result.
    pub async fn find_matching_recipes(
        &self,
        session: &mut SessionState,
        user_ingredients: &[String],
        cuisine_filter: Option<&str>,
        limit: usize,
    ) -> Vec<MatchResult> {
        let mut candidates = self.discover_candidates(user_ingredients).await;
        if candidates.is_empty() {
            info!("No candidate recipes found");
            return Vec::new();
        }
        if candidates.len() > self.config.candidate_cap {
            debug!(
                found = candidates.len(),
                cap = self.config.candidate_cap,
                "Truncating candidate recipes"
            );
            candidates.truncate(self.config.candidate_cap);
        }

        let area = active_area_filter(cuisine_filter);
        let mut scored: Vec<(usize, MatchResult)> = Vec::new();
        let mut to_fetch: Vec<(usize, String)> = Vec::new();

        for (position, id) in candidates.into_iter().enumerate() {
            match session.cached_recipe(&id) {
                Some(cached) => {
                    if cached.original.matches_area(area) {
                        scored.push((position, rescore(cached.clone(), user_ingredients)));
                    }
                }
                None => to_fetch.push((position, id)),
            }
        }
        let reused = scored.len();

        let fetched = self.fetch_details(to_fetch).await;
        let survivors: Vec<(usize, Recipe)> = fetched
            .into_iter()
            .filter(|(_, recipe)| recipe.matches_area(area))
            .collect();

        let fresh = self.process_recipes(survivors, user_ingredients).await;
        for (_, result) in &fresh {
            session.put_cached_recipe(result.clone());
        }
        for (_, result) in &scored {
            session.put_cached_recipe(result.clone());
        }
        scored.extend(fresh);

        info!(
            reused,
            total = scored.len(),
            area = area.unwrap_or(ALL_AREAS),
            "Scored candidate recipes"
        );

        scored.sort_by_key(|(position, _)| *position);
        let mut results: Vec<MatchResult> = scored.into_iter().map(|(_, result)| result).collect();
        rank_results(&mut results);
        results.truncate(limit);
        results
    }

    /// Union of recipe identifiers for every ingredient, in first-seen order
    async fn discover_candidates(&self, user_ingredients: &[String]) -> Vec<String> {
        let ingredients: Vec<String> = user_ingredients
            .iter()
            .map(|ingredient| ingredient.trim().to_string())
            .filter(|ingredient| !ingredient.is_empty())
            .collect();
        if ingredients.is_empty() {
            return Vec::new();
        }

        let queries = match &self.translator {
            Some(translator) => translator.to_provider_language(&ingredients).await.texts,
            None => ingredients,
        };

        let responses = join_all(queries.iter().map(|query| async move {
            (query, self.provider.filter_by_ingredient(query).await)
        }))
        .await;

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for (query, response) in responses {
            match response {
                Ok(meals) => {
                    debug!(ingredient = %query, found = meals.len(), "Ingredient query answered");
                    for meal in meals {
                        if seen.insert(meal.id.clone()) {
                            candidates.push(meal.id);
                        }
                    }
                }
                Err(e) => {
                    warn!(ingredient = %query, error = %e, "Ingredient query failed, skipping");
                }
            }
        }
        candidates
    }

    /// Look up every identifier with bounded concurrency, dropping failures
    async fn fetch_details(&self, ids: Vec<(usize, String)>) -> Vec<(usize, Recipe)> {
        if ids.is_empty() {
            return Vec::new();
        }
        debug!(count = ids.len(), "Fetching recipe details");

        let provider = &self.provider;
        stream::iter(ids)
            .map(|(position, id)| async move {
                match provider.lookup(&id).await {
                    Ok(Some(recipe)) => Some((position, recipe)),
                    Ok(None) => {
                        debug!(recipe_id = %id, "Recipe not found, skipping");
                        None
                    }
                    Err(e) => {
                        warn!(recipe_id = %id, error = %e, "Recipe lookup failed, skipping");
                        None
                    }
                }
            })
            .buffer_unordered(self.config.fetch_concurrency.max(1))
            .filter_map(|fetched| async move { fetched })
            .collect()
            .await
    }

    /// Translate (when enabled) and score freshly fetched recipes
    async fn process_recipes(
        &self,
        recipes: Vec<(usize, Recipe)>,
        user_ingredients: &[String],
    ) -> Vec<(usize, MatchResult)> {
        stream::iter(recipes)
            .map(|(position, recipe)| async move {
                (position, self.process_recipe(recipe, user_ingredients).await)
            })
            .buffer_unordered(self.config.fetch_concurrency.max(1))
            .collect()
            .await
    }

    async fn process_recipe(&self, recipe: Recipe, user_ingredients: &[String]) -> MatchResult {
        let result = MatchResult::new(recipe, 0, 0);
        let result = match &self.translator {
            Some(translator) => {
                let translated = translator.translate_recipe(&result.original).await;
                if translated.fallback {
                    warn!(recipe_id = %result.id(), "Recipe partially left untranslated");
                }
                result.with_translation(translated.recipe, translated.fallback)
            }
            None => result,
        };
        rescore(result, user_ingredients)
    }

    /// Cuisine names for a filter selector, starting with the "All" sentinel
    pub async fn list_areas(&self) -> Vec<String> {
        let mut areas = match self.provider.list_areas().await {
            Ok(areas) => areas,
            Err(e) => {
                warn!(error = %e, "Failed to list areas");
                Vec::new()
            }
        };
        areas.sort();
        areas.dedup();
        areas.retain(|area| area != ALL_AREAS);
        areas.insert(0, ALL_AREAS.to_string());
        areas
    }

    /// A handful of recipes from one cuisine
    pub async fn recipes_by_area(&self, area: &str) -> Vec<MealSummary> {
        match self.provider.filter_by_area(area).await {
            Ok(mut meals) => {
                meals.truncate(self.config.area_browse_limit);
                meals
            }
            Err(e) => {
                warn!(area = %area, error = %e, "Failed to browse area");
                Vec::new()
            }
        }
    }

    /// Full details of one recipe for display, served from the session when possible
    ///
    /// Recipes opened this way are scored against an empty ingredient list.
    pub async fn recipe_details(&self, session: &mut SessionState, recipe_id: &str) -> Option<MatchResult> {
        if let Some(cached) = session.cached_recipe(recipe_id) {
            return Some(cached.clone());
        }

        let recipe = match self.provider.lookup(recipe_id).await {
            Ok(Some(recipe)) => recipe,
            Ok(None) => {
                debug!(recipe_id = %recipe_id, "Recipe not found");
                return None;
            }
            Err(e) => {
                warn!(recipe_id = %recipe_id, error = %e, "Failed to load recipe details");
                return None;
            }
        };

        let result = self.process_recipe(recipe, &[]).await;
        session.put_cached_recipe(result.clone());
        Some(result)
    }
}

/// Recompute `matches`/`total` from the displayed ingredient list
fn rescore(mut result: MatchResult, user_ingredients: &[String]) -> MatchResult {
    let match_score = score(&result.recipe().ingredient_names(), user_ingredients);
    result.matches = match_score.matches;
    result.total = match_score.total;
    result
}

/// Sort best-first: higher match ratio, then more matches
///
/// The sort is stable, so equal keys keep their incoming order.
pub fn rank_results(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.ratio()
            .total_cmp(&a.ratio())
            .then_with(|| b.matches.cmp(&a.matches))
    });
}
