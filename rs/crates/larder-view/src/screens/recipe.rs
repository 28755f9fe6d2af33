use larder_core::{Ingredient, RecipeDetail};
use larder_dom::DomNode;

use super::{hidden_unless, RECIPE};
use crate::fraction::format_quantity;
use crate::view::{icon, Template};

/// The main recipe panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeView;

/// Shopping-list text for an ingredient, using the displayed quantity.
fn shop_text(ing: &Ingredient) -> String {
    let quantity = format_quantity(ing.quantity);
    [quantity.as_str(), ing.unit.as_str(), ing.description.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn ingredient(ing: &Ingredient) -> DomNode {
    DomNode::new("li")
        .with_class("recipe__ingredient")
        .with_child(
            DomNode::new("button")
                .with_class("btn--tiny btn--add-shop")
                .with_attr("title", "Add To Shop List")
                .with_attr("data-item", shop_text(ing))
                .with_event("click", "add_shop_item")
                .with_child(icon("plus-circle")),
        )
        .with_child(DomNode::text("div", &format_quantity(ing.quantity)).with_class("recipe__quantity"))
        .with_child(
            DomNode::new("div")
                .with_class("recipe__description")
                .with_child(DomNode::text("span", &ing.unit).with_class("recipe__unit"))
                .with_child(DomNode::text("span", &ing.description)),
        )
}

fn servings_button(target: u32, icon_name: &str) -> DomNode {
    DomNode::new("button")
        .with_class("btn--tiny btn--update-servings")
        .with_attr("data-update-to", target.to_string())
        .with_event("click", "update_servings")
        .with_child(icon(icon_name))
}

impl Template for RecipeView {
    type Data = RecipeDetail;

    fn region(&self) -> &'static str {
        RECIPE
    }

    fn markup(&self, r: &RecipeDetail) -> Vec<DomNode> {
        let owned = r.is_owned();
        let bookmark_icon = if r.bookmarked { "bookmark-fill" } else { "bookmark" };

        let figure = DomNode::new("figure")
            .with_class("recipe__fig")
            .with_child(
                DomNode::new("img")
                    .with_class("recipe__img")
                    .with_attr("src", r.image.as_str())
                    .with_attr("alt", r.title.as_str()),
            )
            .with_child(DomNode::new("h1").with_class("recipe__title").with_child(DomNode::text("span", &r.title)));

        let minutes = DomNode::new("div")
            .with_class("recipe__info")
            .with_child(icon("clock"))
            .with_child(
                DomNode::text("span", &r.cooking_time.to_string())
                    .with_class("recipe__info-data recipe__info-data--minutes"),
            )
            .with_child(DomNode::text("span", "minutes").with_class("recipe__info-text"));

        let servings = DomNode::new("div")
            .with_class("recipe__info")
            .with_child(icon("users"))
            .with_child(
                DomNode::text("span", &r.servings.to_string())
                    .with_class("recipe__info-data recipe__info-data--people"),
            )
            .with_child(DomNode::text("span", "servings").with_class("recipe__info-text"))
            .with_child(
                DomNode::new("div")
                    .with_class("recipe__info-buttons")
                    .with_child(servings_button(r.servings.saturating_sub(1), "minus-circle"))
                    .with_child(servings_button(r.servings.saturating_add(1), "plus-circle")),
            );

        let nutrition = DomNode::new("div")
            .with_class("recipe__info")
            .with_attr("title", "Total Recipe Calories")
            .with_child(
                DomNode::new("button")
                    .with_class("btn--tiny btn--nutri")
                    .with_event("click", "toggle_nutrition")
                    .with_child(icon("search")),
            );

        let user = DomNode::new("div")
            .with_class(&hidden_unless("recipe__user-generated", owned))
            .with_child(icon("user"))
            .with_child(
                DomNode::new("button")
                    .with_class(&hidden_unless("btn--tiny user_delete", owned))
                    .with_attr("title", "Delete Recipe")
                    .with_event("click", "delete_recipe")
                    .with_child(icon("delete")),
            );

        let bookmark = DomNode::new("button")
            .with_class("btn--round btn--bookmark")
            .with_event("click", "toggle_bookmark")
            .with_child(
                DomNode::new("svg")
                    .with_child(DomNode::new("use").with_attr("href", format!("img/icons.svg#icon-{}", bookmark_icon))),
            );

        let details = DomNode::new("div")
            .with_class("recipe__details")
            .with_child(minutes)
            .with_child(servings)
            .with_child(nutrition)
            .with_child(user)
            .with_child(bookmark);

        let ingredients = DomNode::new("div")
            .with_class("recipe__ingredients")
            .with_child(DomNode::text("h2", "Recipe ingredients").with_class("heading--2"))
            .with_child(
                DomNode::new("ul")
                    .with_class("recipe__ingredient-list")
                    .with_children(r.ingredients.iter().map(ingredient)),
            );

        let directions = DomNode::new("div")
            .with_class("recipe__directions")
            .with_child(DomNode::text("h2", "How to cook it").with_class("heading--2"))
            .with_child(
                DomNode::new("p")
                    .with_class("recipe__directions-text")
                    .with_child(DomNode::text("span", "This recipe was carefully designed and tested by "))
                    .with_child(DomNode::text("span", &r.publisher).with_class("recipe__publisher"))
                    .with_child(DomNode::text("span", ". Please check out directions at their website.")),
            )
            .with_child(
                DomNode::new("a")
                    .with_class("btn--small recipe__btn")
                    .with_attr("href", r.source_url.as_str())
                    .with_attr("target", "_blank")
                    .with_child(DomNode::text("span", "Directions"))
                    .with_child(icon("arrow-right")),
            );

        vec![figure, details, ingredients, directions]
    }

    fn error_message(&self) -> &'static str {
        "Recipe could not be found. Try another one!"
    }

    fn message(&self) -> &'static str {
        "Start by searching for a recipe or an ingredient. Have fun!"
    }
}
