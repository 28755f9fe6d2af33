use larder_core::RecipeSummary;
use larder_dom::DomNode;

use super::{preview, BOOKMARKS};
use crate::view::Template;

#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarksView<'a> {
    pub active: Option<&'a str>,
}

impl Template for BookmarksView<'_> {
    type Data = [RecipeSummary];

    fn region(&self) -> &'static str {
        BOOKMARKS
    }

    fn markup(&self, data: &[RecipeSummary]) -> Vec<DomNode> {
        vec![DomNode::new("ul")
            .with_class("bookmarks__list")
            .with_children(data.iter().map(|b| preview(b, self.active)))]
    }

    fn is_empty(&self, data: &[RecipeSummary]) -> bool {
        data.is_empty()
    }

    fn error_message(&self) -> &'static str {
        "No bookmarks yet. Find a nice recipe and bookmark it."
    }
}
