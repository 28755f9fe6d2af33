//! Turning resolved UI events into actions.

use std::num::NonZeroU32;
use std::str::FromStr;

use larder_core::{Action, ShopItemId};
use thiserror::Error;

use crate::region::UiEvent;

#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("missing data-{0}")]
    Missing(&'static str),

    #[error("invalid data-{name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

fn data<'a>(event: &'a UiEvent, name: &'static str) -> Result<&'a str, EventError> {
    event.data.get(name).map(String::as_str).ok_or(EventError::Missing(name))
}

fn parsed<T: FromStr>(event: &UiEvent, name: &'static str) -> Result<T, EventError> {
    let raw = data(event, name)?;
    raw.parse().map_err(|_| EventError::Invalid { name, value: raw.to_string() })
}

fn form_value<'a>(event: &'a UiEvent, name: &str) -> &'a str {
    event
        .form
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

/// Build the action an event asks for from the handling element's data.
pub fn to_action(event: &UiEvent) -> Result<Action, EventError> {
    let action = match event.action.as_str() {
        "load_recipe" => Action::LoadRecipe { id: data(event, "id")?.to_string() },
        "search" => Action::Search { query: form_value(event, "query").trim().to_string() },
        "goto_page" => Action::GotoPage { page: parsed(event, "goto")? },
        "update_servings" => Action::UpdateServings { servings: parsed::<NonZeroU32>(event, "update-to")? },
        "toggle_bookmark" => Action::ToggleBookmark,
        "show_bookmarks" => Action::ShowBookmarks,
        "toggle_add_recipe" => Action::ToggleAddRecipe,
        "add_ingredient_row" => Action::AddIngredientRow,
        "remove_ingredient_row" => Action::RemoveIngredientRow { index: parsed(event, "row")? },
        "upload_recipe" => Action::UploadRecipe { entries: event.form.clone() },
        "add_shop_item" => Action::AddShopItem { item: data(event, "item")?.to_string() },
        "remove_shop_item" => Action::RemoveShopItem { id: parsed::<ShopItemId>(event, "id")? },
        "show_shop_list" => Action::ShowShopList,
        "toggle_nutrition" => Action::ToggleNutrition,
        "sort_results" => Action::SortResults,
        "delete_recipe" => Action::DeleteRecipe,
        other => return Err(EventError::UnknownAction(other.to_string())),
    };
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: &str, data: &[(&str, &str)]) -> UiEvent {
        UiEvent {
            action: action.to_string(),
            data: data.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            form: Vec::new(),
        }
    }

    #[test]
    fn test_reads_data_attributes() {
        assert_eq!(
            to_action(&event("goto_page", &[("goto", "3")])).unwrap(),
            Action::GotoPage { page: 3 }
        );
        assert_eq!(
            to_action(&event("update_servings", &[("update-to", "5")])).unwrap(),
            Action::UpdateServings { servings: NonZeroU32::new(5).unwrap() }
        );
        assert_eq!(to_action(&event("delete_recipe", &[])).unwrap(), Action::DeleteRecipe);
    }

    #[test]
    fn test_zero_servings_is_not_actionable() {
        let err = to_action(&event("update_servings", &[("update-to", "0")])).unwrap_err();
        assert_eq!(err, EventError::Invalid { name: "update-to", value: "0".into() });
    }

    #[test]
    fn test_search_trims_query_from_form() {
        let mut e = event("search", &[]);
        e.form.push(("query".into(), "  pizza ".into()));
        assert_eq!(to_action(&e).unwrap(), Action::Search { query: "pizza".into() });
    }

    #[test]
    fn test_missing_and_unknown() {
        assert_eq!(to_action(&event("load_recipe", &[])), Err(EventError::Missing("id")));
        assert!(matches!(
            to_action(&event("remove_shop_item", &[("id", "nope")])),
            Err(EventError::Invalid { name: "id", .. })
        ));
        assert_eq!(
            to_action(&event("dance", &[])),
            Err(EventError::UnknownAction("dance".into()))
        );
    }
}
