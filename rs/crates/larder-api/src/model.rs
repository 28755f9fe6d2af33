//! Data contracts shared by the APIs, the state store and the screens.

use serde::{Deserialize, Serialize};

/// Minimal recipe record shown in result lists and bookmarks. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image: String,
    /// Present on recipes uploaded with our API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// One ingredient line. `quantity` scales linearly with servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    pub description: String,
}

/// Full recipe record shown on the main panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub source_url: String,
    pub servings: u32,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub bookmarked: bool,
}

impl RecipeDetail {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            publisher: self.publisher.clone(),
            image: self.image.clone(),
            key: self.key.clone(),
        }
    }

    /// True for recipes uploaded by this user.
    pub fn is_owned(&self) -> bool {
        self.key.is_some()
    }
}

/// Share of calories from each macro, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub carb: f64,
    pub fat: f64,
    pub protein: f64,
}

impl MacroBreakdown {
    pub fn new(carb: f64, fat: f64, protein: f64) -> Self {
        Self { carb, fat, protein }
    }

    pub fn total(&self) -> f64 {
        self.carb + self.fat + self.protein
    }
}

/// Nutrition parsed for a single ingredient line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: f64,
    pub breakdown: MacroBreakdown,
}

/// Payload for creating a recipe through the recipe API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub source_url: String,
    pub image: String,
    pub publisher: String,
    pub cooking_time: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}
