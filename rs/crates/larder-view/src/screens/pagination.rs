use larder_core::SearchState;
use larder_dom::DomNode;

use super::PAGINATION;
use crate::view::{icon, Template};

#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationView;

fn page_button(direction: &str, target: usize) -> DomNode {
    let label = DomNode::text("span", &format!("Page {}", target));
    let (first, second) = if direction == "prev" {
        (icon("arrow-left"), label)
    } else {
        (label, icon("arrow-right"))
    };
    DomNode::new("button")
        .with_class(&format!("btn--inline pagination__btn--{}", direction))
        .with_attr("data-goto", target.to_string())
        .with_event("click", "goto_page")
        .with_child(first)
        .with_child(second)
}

fn spacer() -> DomNode {
    DomNode::new("div").with_class("noPage")
}

impl Template for PaginationView {
    type Data = SearchState;

    fn region(&self) -> &'static str {
        PAGINATION
    }

    fn markup(&self, search: &SearchState) -> Vec<DomNode> {
        let pages = search.page_count();
        let cur = search.page;
        if pages <= 1 || cur == 0 || cur > pages {
            return Vec::new();
        }

        let current = DomNode::text("div", &format!("{} / {}", cur, pages)).with_class("pagination--curPage");
        let prev = if cur > 1 { page_button("prev", cur - 1) } else { spacer() };
        let next = if cur < pages { page_button("next", cur + 1) } else { spacer() };
        vec![prev, current, next]
    }
}
