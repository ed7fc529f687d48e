//! # Translation Module
//!
//! This module wraps a black-box text translation service.
//!
//! - [`Translator`] is the seam to the service; [`LibreTranslateClient`] talks
//!   to any LibreTranslate-compatible HTTP endpoint.
//! - [`TranslationAdapter`] memoizes translations by exact source text and
//!   language direction, and falls back to the original text when the service
//!   fails, so a translation problem never drops a recipe.
//! - [`TranslationAdapter::translate_recipe`] produces a new translated
//!   [`Recipe`] and leaves the provider record untouched.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::TranslationConfig;
use crate::errors::TranslationError;
use crate::memo_cache::MemoCache;
use crate::recipe_model::{IngredientLine, Recipe};
use crate::unit_substitution;

/// Text translation service
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate every text from `source` to `target`, preserving order
    async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, TranslationError>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranslatedText {
    Batch(Vec<String>),
    Single(String),
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: TranslatedText,
}

/// Client for a LibreTranslate-compatible `POST /translate` endpoint
pub struct LibreTranslateClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(api_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .context("Failed to build translation HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/translate", api_url.trim_end_matches('/')),
            api_key,
        })
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, TranslationError> {
        let request = TranslateRequest {
            q: texts,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status.as_u16()));
        }

        let body: TranslateResponse = response.json().await?;
        let translated = match body.translated_text {
            TranslatedText::Batch(texts) => texts,
            TranslatedText::Single(text) => vec![text],
        };

        if translated.len() != texts.len() {
            return Err(TranslationError::LengthMismatch {
                expected: texts.len(),
                actual: translated.len(),
            });
        }
        Ok(translated)
    }
}

/// Direction-agnostic language pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    /// Language of the recipe provider
    pub provider: String,
    /// Language of the user
    pub user: String,
}

impl LanguagePair {
    pub fn new(provider: &str, user: &str) -> Self {
        Self {
            provider: provider.to_string(),
            user: user.to_string(),
        }
    }
}

/// Result of translating a batch of texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedTexts {
    pub texts: Vec<String>,
    /// At least one text kept its original wording because the service failed
    pub fallback: bool,
}

/// A translated copy of a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedRecipe {
    pub recipe: Recipe,
    pub fallback: bool,
}

type CacheKey = (String, String, String);

/// Memoizing, failure-tolerant wrapper around a [`Translator`]
pub struct TranslationAdapter {
    inner: Arc<dyn Translator>,
    languages: LanguagePair,
    cache: MemoCache<CacheKey, String>,
}

impl TranslationAdapter {
    /// Create an adapter keeping at most `capacity` translations
    pub fn new(inner: Arc<dyn Translator>, languages: LanguagePair, capacity: usize) -> Self {
        Self {
            inner,
            languages,
            cache: MemoCache::new(capacity),
        }
    }

    /// Build the HTTP-backed adapter, or `None` when translation is disabled
    pub fn from_config(config: &TranslationConfig) -> Result<Option<Self>> {
        let api_url = match (&config.api_url, config.is_enabled()) {
            (Some(url), true) => url,
            _ => return Ok(None),
        };

        let client = LibreTranslateClient::new(
            api_url,
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Some(Self::new(
            Arc::new(client),
            LanguagePair::new(&config.provider_language, &config.user_language),
            config.cache_capacity,
        )))
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    /// Number of memoized translations
    pub fn cached_translations(&self) -> usize {
        self.cache.len()
    }

    /// Translate user input into the provider's language
    pub async fn to_provider_language(&self, texts: &[String]) -> TranslatedTexts {
        self.translate_texts(texts, &self.languages.user, &self.languages.provider)
            .await
    }

    /// Translate provider content into the user's language
    pub async fn to_user_language(&self, texts: &[String]) -> TranslatedTexts {
        self.translate_texts(texts, &self.languages.provider, &self.languages.user)
            .await
    }

    /// Translate texts, reusing memoized results and sending the rest in one call
    ///
    /// Blank texts are returned unchanged without calling the service. On any
    /// service failure the untranslated texts are returned as they are and
    /// `fallback` is set. A blank translation of a non-blank text counts as a
    /// failure for that text and is not memoized.
    pub async fn translate_texts(&self, texts: &[String], source: &str, target: &str) -> TranslatedTexts {
        let mut resolved: Vec<Option<String>> = Vec::with_capacity(texts.len());
        let mut pending: Vec<String> = Vec::new();

        for text in texts {
            if text.trim().is_empty() {
                resolved.push(Some(text.clone()));
                continue;
            }
            let key = (source.to_string(), target.to_string(), text.clone());
            match self.cache.get(&key) {
                Some(cached) => resolved.push(Some(cached)),
                None => {
                    if !pending.contains(text) {
                        pending.push(text.clone());
                    }
                    resolved.push(None);
                }
            }
        }

        let mut fallback = false;
        let mut fresh: HashMap<String, String> = HashMap::new();
        if !pending.is_empty() {
            debug!(count = pending.len(), source, target, "Requesting translations");
            match self.inner.translate_batch(&pending, source, target).await {
                Ok(translated) if translated.len() == pending.len() => {
                    for (original, translation) in pending.into_iter().zip(translated) {
                        // A non-blank text never translates to nothing
                        if translation.trim().is_empty() {
                            warn!(text = %original, "Translation service returned a blank text, keeping original");
                            fallback = true;
                            continue;
                        }
                        self.cache.insert(
                            (source.to_string(), target.to_string(), original.clone()),
                            translation.clone(),
                        );
                        fresh.insert(original, translation);
                    }
                }
                Ok(translated) => {
                    warn!(
                        expected = pending.len(),
                        actual = translated.len(),
                        "Translation service returned a different number of texts, keeping originals"
                    );
                    fallback = true;
                }
                Err(e) => {
                    warn!(error = %e, "Translation failed, keeping original text");
                    fallback = true;
                }
            }
        }

        let texts = texts
            .iter()
            .zip(resolved)
            .map(|(original, resolved)| {
                resolved
                    .or_else(|| fresh.get(original).cloned())
                    .unwrap_or_else(|| original.clone())
            })
            .collect();

        TranslatedTexts { texts, fallback }
    }

    /// Produce a translated copy of a provider recipe
    ///
    /// Name, category, area and instructions go out in one batch; ingredient
    /// names and measures in a second. Measures then get the unit
    /// substitution pass for the user's language.
    pub async fn translate_recipe(&self, recipe: &Recipe) -> TranslatedRecipe {
        let scalars = vec![
            recipe.name.clone(),
            recipe.category.clone().unwrap_or_default(),
            recipe.area.clone().unwrap_or_default(),
            recipe.instructions.clone().unwrap_or_default(),
        ];
        let scalars = self.to_user_language(&scalars).await;

        let count = recipe.ingredients.len();
        let mut lines: Vec<String> = Vec::with_capacity(count * 2);
        lines.extend(recipe.ingredients.iter().map(|line| line.ingredient.clone()));
        lines.extend(recipe.ingredients.iter().map(|line| line.measure.clone()));
        let lines = self.to_user_language(&lines).await;

        let units = unit_substitution::for_language(&self.languages.user);
        let ingredients = (0..count)
            .map(|i| {
                let measure = &lines.texts[count + i];
                IngredientLine {
                    ingredient: lines.texts[i].clone(),
                    measure: units
                        .map(|table| table.apply(measure))
                        .unwrap_or_else(|| measure.clone()),
                }
            })
            .collect();

        // Absent optional fields were sent as blanks and stay absent
        let keep = |present: &Option<String>, text: &str| present.as_ref().map(|_| text.to_string());

        let translated = Recipe {
            id: recipe.id.clone(),
            name: scalars.texts[0].clone(),
            category: keep(&recipe.category, &scalars.texts[1]),
            area: keep(&recipe.area, &scalars.texts[2]),
            instructions: keep(&recipe.instructions, &scalars.texts[3]),
            ingredients,
            source_url: recipe.source_url.clone(),
            video_url: recipe.video_url.clone(),
            thumbnail_url: recipe.thumbnail_url.clone(),
        };

        TranslatedRecipe {
            recipe: translated,
            fallback: scalars.fallback || lines.fallback,
        }
    }
}
