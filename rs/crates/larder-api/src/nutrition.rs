//! Nutrition API client (Spoonacular `parseIngredients`).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::{trim_base, ApiConfig};
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::model::{MacroBreakdown, NutritionFacts};

#[async_trait]
pub trait NutritionApi: Send + Sync {
    /// Parse one free-text ingredient line. `None` when the answer has no calories entry.
    async fn parse_ingredient(&self, ingredient: &str) -> Result<Option<NutritionFacts>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ParsedIngredient {
    #[serde(default)]
    nutrition: Option<WireNutrition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireNutrition {
    #[serde(default)]
    nutrients: Vec<WireNutrient>,
    #[serde(default)]
    caloric_breakdown: WireBreakdown,
}

#[derive(Debug, Deserialize)]
struct WireNutrient {
    name: String,
    amount: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBreakdown {
    #[serde(default)]
    percent_carbs: f64,
    #[serde(default)]
    percent_fat: f64,
    #[serde(default)]
    percent_protein: f64,
}

/// Pull calories and the caloric breakdown out of the first parsed entry.
fn facts_from(entries: Vec<ParsedIngredient>) -> Option<NutritionFacts> {
    let nutrition = entries.into_iter().next()?.nutrition?;
    let calories = nutrition
        .nutrients
        .iter()
        .find(|n| n.name.eq_ignore_ascii_case("calories"))?
        .amount;
    let b = nutrition.caloric_breakdown;
    Some(NutritionFacts {
        calories,
        breakdown: MacroBreakdown::new(b.percent_carbs, b.percent_fat, b.percent_protein),
    })
}

pub struct SpoonacularClient {
    http: HttpClient,
    base: String,
    key: String,
}

impl SpoonacularClient {
    pub fn new(http: HttpClient, base: &str, key: &str) -> Self {
        Self { http, base: trim_base(base), key: key.to_string() }
    }

    pub fn from_config(http: HttpClient, config: &ApiConfig) -> Self {
        Self::new(http, &config.nutrition_url, &config.nutrition_key)
    }
}

#[async_trait]
impl NutritionApi for SpoonacularClient {
    async fn parse_ingredient(&self, ingredient: &str) -> Result<Option<NutritionFacts>, ApiError> {
        let url = format!(
            "{}/parseIngredients?ingredientList={}&includeNutrition=true",
            self.base,
            urlencoding::encode(ingredient)
        );
        let value = self.http.post_form(&url, &[("x-api-key", self.key.as_str())]).await?;
        let entries: Vec<ParsedIngredient> = serde_json::from_value(value)?;
        let facts = facts_from(entries);
        debug!(ingredient, found = facts.is_some(), "nutrition parsed");
        Ok(facts)
    }
}
