//! larder-api: data contracts and remote collaborators
//!
//! The recipe API and the nutrition API are reached through [`HttpClient`],
//! which races every request against a fixed timer. Both APIs sit behind
//! traits so the state store can be driven by in-memory doubles.

pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod nutrition;
pub mod recipes;

pub use config::ApiConfig;
pub use error::ApiError;
pub use http::{with_timeout, HttpClient};
pub use model::{Ingredient, MacroBreakdown, NewRecipe, NutritionFacts, RecipeDetail, RecipeSummary};
pub use nutrition::{NutritionApi, SpoonacularClient};
pub use recipes::{ForkifyClient, RecipeApi};
