//! # Session State Module
//!
//! Process-local state for one user session: ratings, the session cache of
//! every recipe seen so far, and the saved main results of past searches.
//!
//! All mutation goes through `&mut SessionState`, so only the orchestrating
//! task ever writes. Nothing here outlives the session.

use std::collections::{HashMap, VecDeque};
use tracing::{debug, info};

use crate::errors::SessionError;
use crate::recipe_model::MatchResult;

/// Maximum number of saved searches kept
pub const MAX_SAVED_SEARCHES: usize = 10;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Ratings, cached recipes and saved searches for one user session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    ratings: HashMap<String, u8>,
    recipes: HashMap<String, MatchResult>,
    saved: VecDeque<MatchResult>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's rating for a recipe, if any
    pub fn rating(&self, recipe_id: &str) -> Option<u8> {
        self.ratings.get(recipe_id).copied()
    }

    /// Create or overwrite a rating
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RatingOutOfRange`] unless `1 <= rating <= 5`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chefmatch::session::SessionState;
    ///
    /// let mut session = SessionState::new();
    /// session.set_rating("52772", 4)?;
    /// assert_eq!(session.rating("52772"), Some(4));
    /// assert!(session.set_rating("52772", 0).is_err());
    /// # Ok::<(), chefmatch::errors::SessionError>(())
    /// ```
    pub fn set_rating(&mut self, recipe_id: &str, rating: u8) -> Result<(), SessionError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(SessionError::RatingOutOfRange(rating));
        }
        info!(recipe_id = %recipe_id, rating, "Rating saved");
        self.ratings.insert(recipe_id.to_string(), rating);
        Ok(())
    }

    /// Rated recipes that can be opened from the session cache, best rated first
    pub fn rated_recipes(&self) -> Vec<(u8, &MatchResult)> {
        let mut rated: Vec<(u8, &MatchResult)> = self
            .ratings
            .iter()
            .filter_map(|(id, rating)| self.recipes.get(id).map(|result| (*rating, result)))
            .collect();
        rated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id().cmp(b.1.id())));
        rated
    }

    pub fn cached_recipe(&self, recipe_id: &str) -> Option<&MatchResult> {
        self.recipes.get(recipe_id)
    }

    /// Store the latest result for a recipe, replacing any previous one
    pub fn put_cached_recipe(&mut self, result: MatchResult) {
        debug!(recipe_id = %result.id(), "Caching recipe in session");
        self.recipes.insert(result.id().to_string(), result);
    }

    pub fn cached_recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Remember the main result of a search
    ///
    /// Inserted at the front unless an equal result is already saved; the
    /// list is then cut to [`MAX_SAVED_SEARCHES`]. Returns whether it was added.
    pub fn save_main_result(&mut self, result: &MatchResult) -> bool {
        if self.saved.contains(result) {
            return false;
        }
        self.saved.push_front(result.clone());
        self.saved.truncate(MAX_SAVED_SEARCHES);
        true
    }

    /// Saved results, most recent first
    pub fn saved_searches(&self) -> impl Iterator<Item = &MatchResult> {
        self.saved.iter()
    }

    pub fn saved_search(&self, index: usize) -> Option<&MatchResult> {
        self.saved.get(index)
    }

    pub fn remove_saved_search(&mut self, index: usize) -> Result<MatchResult, SessionError> {
        self.saved
            .remove(index)
            .ok_or(SessionError::SavedSearchIndex(index))
    }
}
