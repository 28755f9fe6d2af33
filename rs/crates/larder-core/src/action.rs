use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::state::ShopItemId;

/// Supported user intents.
///
/// Wire format: `{"action":"name","payload":{...}}`; unit actions may omit the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// The location hash changed to `#id`.
    LoadRecipe { id: String },
    Search { query: String },
    GotoPage { page: usize },
    UpdateServings { servings: NonZeroU32 },
    ToggleBookmark,
    ShowBookmarks,
    ToggleAddRecipe,
    AddIngredientRow,
    RemoveIngredientRow { index: usize },
    UploadRecipe { entries: Vec<(String, String)> },
    AddShopItem { item: String },
    RemoveShopItem { id: ShopItemId },
    ShowShopList,
    ToggleNutrition,
    SortResults,
    DeleteRecipe,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadRecipe { .. } => "load_recipe",
            Action::Search { .. } => "search",
            Action::GotoPage { .. } => "goto_page",
            Action::UpdateServings { .. } => "update_servings",
            Action::ToggleBookmark => "toggle_bookmark",
            Action::ShowBookmarks => "show_bookmarks",
            Action::ToggleAddRecipe => "toggle_add_recipe",
            Action::AddIngredientRow => "add_ingredient_row",
            Action::RemoveIngredientRow { .. } => "remove_ingredient_row",
            Action::UploadRecipe { .. } => "upload_recipe",
            Action::AddShopItem { .. } => "add_shop_item",
            Action::RemoveShopItem { .. } => "remove_shop_item",
            Action::ShowShopList => "show_shop_list",
            Action::ToggleNutrition => "toggle_nutrition",
            Action::SortResults => "sort_results",
            Action::DeleteRecipe => "delete_recipe",
        }
    }
}

/// Parse one action from its JSON form.
pub fn parse_action(input: &str) -> Result<Action, serde_json::Error> {
    serde_json::from_str(input)
}
