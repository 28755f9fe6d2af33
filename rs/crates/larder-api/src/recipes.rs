//! Recipe API client (Forkify v2 wire format).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{trim_base, ApiConfig};
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::model::{Ingredient, NewRecipe, RecipeDetail, RecipeSummary};

/// Remote recipe catalogue.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Full recipe by id. `bookmarked` is always false; the store decides it.
    async fn fetch_recipe(&self, id: &str) -> Result<RecipeDetail, ApiError>;

    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, ApiError>;

    /// Create a recipe owned by our key and return it as stored.
    async fn upload(&self, recipe: &NewRecipe) -> Result<RecipeDetail, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct RecipeData {
    recipe: WireRecipe,
}

#[derive(Debug, Deserialize)]
struct RecipeList {
    #[serde(default)]
    recipes: Vec<WireSummary>,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRecipe {
    id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    image_url: String,
    servings: u32,
    #[serde(default)]
    cooking_time: u32,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    key: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireUpload<'a> {
    title: &'a str,
    source_url: &'a str,
    image_url: &'a str,
    publisher: &'a str,
    cooking_time: u32,
    servings: u32,
    ingredients: &'a [Ingredient],
}

impl From<WireSummary> for RecipeSummary {
    fn from(w: WireSummary) -> Self {
        RecipeSummary {
            id: w.id,
            title: w.title,
            publisher: w.publisher,
            image: w.image_url,
            key: w.key,
        }
    }
}

impl From<WireRecipe> for RecipeDetail {
    fn from(w: WireRecipe) -> Self {
        RecipeDetail {
            id: w.id,
            title: w.title,
            publisher: w.publisher,
            image: w.image_url,
            key: w.key,
            source_url: w.source_url,
            servings: w.servings,
            cooking_time: w.cooking_time,
            ingredients: w.ingredients,
            bookmarked: false,
        }
    }
}

/// `RecipeApi` over HTTP.
pub struct ForkifyClient {
    http: HttpClient,
    base: String,
    key: String,
}

impl ForkifyClient {
    pub fn new(http: HttpClient, base: &str, key: &str) -> Self {
        Self { http, base: trim_base(base), key: key.to_string() }
    }

    pub fn from_config(http: HttpClient, config: &ApiConfig) -> Self {
        Self::new(http, &config.recipe_url, &config.api_key)
    }

    fn recipe_url(&self, id: &str) -> String {
        format!("{}/{}?key={}", self.base, urlencoding::encode(id), self.key)
    }
}

#[async_trait]
impl RecipeApi for ForkifyClient {
    async fn fetch_recipe(&self, id: &str) -> Result<RecipeDetail, ApiError> {
        let value = self.http.request(&self.recipe_url(id), None).await?;
        let env: Envelope<RecipeData> = serde_json::from_value(value)?;
        Ok(env.data.recipe.into())
    }

    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, ApiError> {
        let url = format!("{}?search={}&key={}", self.base, urlencoding::encode(query), self.key);
        let value = self.http.request(&url, None).await?;
        let env: Envelope<RecipeList> = serde_json::from_value(value)?;
        Ok(env.data.recipes.into_iter().map(RecipeSummary::from).collect())
    }

    async fn upload(&self, recipe: &NewRecipe) -> Result<RecipeDetail, ApiError> {
        let body = serde_json::to_value(WireUpload {
            title: &recipe.title,
            source_url: &recipe.source_url,
            image_url: &recipe.image,
            publisher: &recipe.publisher,
            cooking_time: recipe.cooking_time,
            servings: recipe.servings,
            ingredients: &recipe.ingredients,
        })?;
        let url = format!("{}?key={}", self.base, self.key);
        let value = self.http.request(&url, Some(&body)).await?;
        let env: Envelope<RecipeData> = serde_json::from_value(value)?;
        info!(title = %recipe.title, "recipe uploaded");
        Ok(env.data.recipe.into())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(&self.recipe_url(id)).await
    }
}
