use larder_core::{RecipeSummary, SearchState};
use larder_dom::DomNode;

use super::{hidden_unless, preview, RESULTS, RESULTS_META};
use crate::view::Template;

pub const SORT_LABEL: &str = "sort A ➜ Z";
pub const SORT_ALREADY_SORTED: &str = "already sorted";

/// The current page of search results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultsView<'a> {
    pub active: Option<&'a str>,
}

impl Template for ResultsView<'_> {
    type Data = [RecipeSummary];

    fn region(&self) -> &'static str {
        RESULTS
    }

    fn markup(&self, data: &[RecipeSummary]) -> Vec<DomNode> {
        vec![DomNode::new("ul")
            .with_class("results")
            .with_children(data.iter().map(|r| preview(r, self.active)))]
    }

    fn is_empty(&self, data: &[RecipeSummary]) -> bool {
        data.is_empty()
    }

    fn error_message(&self) -> &'static str {
        "Recipe could not be found. Try another one!"
    }
}

/// Result count line and the sort button above the results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultsMetaView;

impl Template for ResultsMetaView {
    type Data = SearchState;

    fn region(&self) -> &'static str {
        RESULTS_META
    }

    fn markup(&self, search: &SearchState) -> Vec<DomNode> {
        let label = if search.sorted { SORT_ALREADY_SORTED } else { SORT_LABEL };
        let has_results = !search.results.is_empty();
        vec![DomNode::new("div")
            .with_class("search-results__meta")
            .with_child(
                DomNode::text(
                    "p",
                    &format!("found {} recipes for '{}'", search.results.len(), search.query),
                )
                .with_class("resAmount"),
            )
            .with_child(
                DomNode::text("button", label)
                    .with_class(&hidden_unless("btn--tiny abc", has_results))
                    .with_event("click", "sort_results"),
            )]
    }
}
