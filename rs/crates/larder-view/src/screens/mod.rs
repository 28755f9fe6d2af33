//! Screen renderers, one per page region.
//!
//! Screens read the data they are given and nothing else. Anything a user can
//! act on carries an `events` binding plus the `data-*` attributes the action
//! needs; see [`crate::event::to_action`].

mod bookmarks;
mod header;
mod nutrition;
mod pagination;
mod preview;
mod recipe;
mod results;
mod shopping;
mod upload;

pub use bookmarks::BookmarksView;
pub use header::HeaderView;
pub use nutrition::NutritionView;
pub use pagination::PaginationView;
pub use preview::preview;
pub use recipe::RecipeView;
pub use results::{ResultsMetaView, ResultsView, SORT_ALREADY_SORTED, SORT_LABEL};
pub use shopping::ShoppingListView;
pub use upload::{UploadForm, UploadView, DEFAULT_INGREDIENT_ROWS};

pub const HEADER: &str = "header";
pub const RESULTS_META: &str = "results-meta";
pub const RESULTS: &str = "results";
pub const PAGINATION: &str = "pagination";
pub const RECIPE: &str = "recipe";
pub const NUTRITION: &str = "nutrition";
pub const BOOKMARKS: &str = "bookmarks";
pub const SHOPPING: &str = "shopping";
pub const UPLOAD: &str = "upload";

/// Every region in page order.
pub const REGIONS: &[&str] = &[
    HEADER,
    RESULTS_META,
    RESULTS,
    PAGINATION,
    RECIPE,
    NUTRITION,
    BOOKMARKS,
    SHOPPING,
    UPLOAD,
];

pub(crate) fn hidden_unless(class: &str, visible: bool) -> String {
    if visible {
        class.to_string()
    } else {
        format!("{} hidden", class)
    }
}
