use larder_core::RecipeSummary;
use larder_dom::DomNode;

use super::hidden_unless;
use crate::view::icon;

/// One list entry linking to a recipe. Shared by results and bookmarks.
pub fn preview(summary: &RecipeSummary, active_id: Option<&str>) -> DomNode {
    let link_class = if active_id == Some(summary.id.as_str()) {
        "preview__link preview__link--active"
    } else {
        "preview__link"
    };

    DomNode::new("li").with_class("preview").with_key(summary.id.as_str()).with_child(
        DomNode::new("a")
            .with_class(link_class)
            .with_attr("href", format!("#{}", summary.id))
            .with_attr("data-id", summary.id.as_str())
            .with_event("click", "load_recipe")
            .with_child(
                DomNode::new("figure").with_class("preview__fig").with_child(
                    DomNode::new("img")
                        .with_attr("src", summary.image.as_str())
                        .with_attr("alt", summary.title.as_str()),
                ),
            )
            .with_child(
                DomNode::new("div")
                    .with_class("preview__data")
                    .with_child(DomNode::text("h4", &summary.title).with_class("preview__title"))
                    .with_child(DomNode::text("p", &summary.publisher).with_class("preview__publisher"))
                    .with_child(
                        DomNode::new("div")
                            .with_class(&hidden_unless("preview__user-generated", summary.key.is_some()))
                            .with_child(icon("user")),
                    ),
            ),
    )
}
