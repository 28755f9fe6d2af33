use larder_dom::DomNode;

use super::HEADER;
use crate::view::{icon, Template};

/// Logo, search form and the navigation buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderView;

fn nav_button(class: &str, action: &str, label: &str) -> DomNode {
    DomNode::new("li").with_class("nav__item").with_child(
        DomNode::new("button")
            .with_class(&format!("nav__btn {}", class))
            .with_event("click", action)
            .with_child(DomNode::text("span", label)),
    )
}

impl Template for HeaderView {
    /// The query to prefill.
    type Data = str;

    fn region(&self) -> &'static str {
        HEADER
    }

    fn markup(&self, query: &str) -> Vec<DomNode> {
        vec![DomNode::new("header")
            .with_class("header")
            .with_child(DomNode::new("img").with_class("header__logo").with_attr("src", "img/logo.png").with_attr("alt", "Logo"))
            .with_child(
                DomNode::new("form")
                    .with_class("search")
                    .with_event("submit", "search")
                    .with_child(
                        DomNode::new("input")
                            .with_class("search__field")
                            .with_attr("name", "query")
                            .with_attr("type", "text")
                            .with_attr("value", query)
                            .with_attr("placeholder", "Search over 1,000,000 recipes..."),
                    )
                    .with_child(
                        DomNode::new("button")
                            .with_class("btn search__btn")
                            .with_child(icon("search"))
                            .with_child(DomNode::text("span", "Search")),
                    ),
            )
            .with_child(
                DomNode::new("nav").with_class("nav").with_child(
                    DomNode::new("ul")
                        .with_class("nav__list")
                        .with_child(nav_button("nav__btn--add-recipe", "toggle_add_recipe", "Add recipe"))
                        .with_child(nav_button("nav__btn--bookmarks", "show_bookmarks", "Bookmarks"))
                        .with_child(nav_button("nav__btn--shopping", "show_shop_list", "Shopping list")),
                ),
            )]
    }
}
