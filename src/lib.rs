//! # ChefMatch
//!
//! Recipe discovery by ingredients: queries a TheMealDB-compatible recipe
//! API, scores candidate recipes by ingredient overlap, optionally translates
//! them for the user, and keeps per-session ratings and search history.

pub mod aggregator;
pub mod config;
pub mod errors;
pub mod ingredient_matcher;
pub mod localization;
pub mod memo_cache;
pub mod observability;
pub mod provider;
pub mod recipe_display;
pub mod recipe_model;
pub mod session;
pub mod translation;
pub mod unit_substitution;
