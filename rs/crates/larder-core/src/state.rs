use std::fmt;
use std::str::FromStr;

use larder_api::{MacroBreakdown, NutritionFacts, RecipeDetail, RecipeSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current query, its results and the pagination cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<RecipeSummary>,
    pub page: usize,
    pub page_size: usize,
    /// Set once the results have been sorted by title; cleared by a new search.
    pub sorted: bool,
}

impl SearchState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            sorted: false,
        }
    }

    /// Number of pages the results span; zero when there are none.
    pub fn page_count(&self) -> usize {
        self.results.len().div_ceil(self.page_size)
    }
}

/// Stable identity of a shopping-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopItemId(Uuid);

impl ShopItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShopItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShopItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ShopItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: ShopItemId,
    pub text: String,
}

impl ShopItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: ShopItemId::new(), text: text.into() }
    }
}

/// Shopping-list entries as found in storage. Older blobs hold bare strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredShopItem {
    Item(ShopItem),
    Legacy(String),
}

impl From<StoredShopItem> for ShopItem {
    fn from(s: StoredShopItem) -> Self {
        match s {
            StoredShopItem::Item(item) => item,
            StoredShopItem::Legacy(text) => ShopItem::new(text),
        }
    }
}

/// Running nutrition totals for the current recipe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NutritionAccumulator {
    pub calories: u32,
    pub breakdowns: Vec<MacroBreakdown>,
    pub aggregate: MacroBreakdown,
}

impl NutritionAccumulator {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True once at least one ingredient contributed.
    pub fn is_known(&self) -> bool {
        !self.breakdowns.is_empty()
    }

    /// Fold one ingredient's facts into the totals and refresh the aggregate.
    pub fn absorb(&mut self, facts: NutritionFacts) {
        self.calories = self.calories.saturating_add(facts.calories.round() as u32);
        self.breakdowns.push(facts.breakdown);
        self.recompute();
    }

    /// Each macro's summed share over the grand total of all three, rounded.
    fn recompute(&mut self) {
        let sum = self.breakdowns.iter().fold(MacroBreakdown::default(), |acc, b| {
            MacroBreakdown::new(acc.carb + b.carb, acc.fat + b.fat, acc.protein + b.protein)
        });
        let total = sum.total();
        self.aggregate = if total == 0.0 {
            MacroBreakdown::default()
        } else {
            MacroBreakdown::new(
                (sum.carb * 100.0 / total).round(),
                (sum.fat * 100.0 / total).round(),
                (sum.protein * 100.0 / total).round(),
            )
        };
    }

    /// Rescale the calorie total from `from` servings to `to` servings.
    pub(crate) fn scaled_calories(&self, from: u32, to: u32) -> u32 {
        (f64::from(self.calories) * f64::from(to) / f64::from(from)).round() as u32
    }
}

/// Everything the page shows, owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub recipe: Option<RecipeDetail>,
    pub search: SearchState,
    pub bookmarks: Vec<RecipeSummary>,
    pub shop_items: Vec<ShopItem>,
    pub nutrition: NutritionAccumulator,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            recipe: None,
            search: SearchState::new(page_size),
            bookmarks: Vec::new(),
            shop_items: Vec::new(),
            nutrition: NutritionAccumulator::default(),
        }
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
