//! larder-core: application state, actions and persistence
//!
//! [`Store`] is the only thing that mutates [`AppState`]. The controller
//! drives it with [`Action`]s and reads the state back to render.

pub mod action;
pub mod error;
pub mod state;
pub mod storage;
pub mod store;
pub mod upload;

pub use action::{parse_action, Action};
pub use error::StoreError;
pub use state::{AppState, NutritionAccumulator, SearchState, ShopItem, ShopItemId, DEFAULT_PAGE_SIZE};
pub use storage::{FileStore, KeyValueStore, MemoryStore, BOOKMARKS_KEY, SHOP_ITEMS_KEY};
pub use store::{nutrition_query, SortOutcome, Store};
pub use upload::parse_new_recipe;

pub use larder_api::{Ingredient, MacroBreakdown, NewRecipe, NutritionFacts, RecipeDetail, RecipeSummary};
