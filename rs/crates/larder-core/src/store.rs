//! The application state store.
//!
//! [`Store`] owns the [`AppState`] together with its collaborators: the recipe
//! API, the nutrition API and the key-value store that bookmarks and the
//! shopping list are mirrored to. Remote operations leave the state untouched
//! when they fail.

use std::num::NonZeroU32;

use futures_util::future::join_all;
use larder_api::{Ingredient, NutritionApi, RecipeApi, RecipeDetail, RecipeSummary};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::state::{AppState, ShopItem, ShopItemId, StoredShopItem};
use crate::storage::{KeyValueStore, BOOKMARKS_KEY, SHOP_ITEMS_KEY};
use crate::upload::parse_new_recipe;

/// Result of asking for the results to be sorted by title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    Sorted,
    AlreadySorted,
}

/// Mirror `items` under `key`. An empty list drops the key.
fn persist_list<S, T>(storage: &mut S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    S: KeyValueStore,
    T: Serialize,
{
    if items.is_empty() {
        return storage.remove(key);
    }
    let json = serde_json::to_string(items)?;
    storage.set(key, &json)
}

/// Free-text line sent to the nutrition API for one ingredient.
pub fn nutrition_query(ingredient: &Ingredient) -> String {
    let quantity = ingredient.quantity.map(|q| q.to_string()).unwrap_or_default();
    format!("{} {} {}", quantity, ingredient.unit, ingredient.description)
}

pub struct Store<R, N, S> {
    state: AppState,
    recipes: R,
    nutrition: N,
    storage: S,
}

impl<R, N, S> Store<R, N, S>
where
    R: RecipeApi,
    N: NutritionApi,
    S: KeyValueStore,
{
    /// Create the store and rehydrate bookmarks and the shopping list.
    pub fn open(recipes: R, nutrition: N, storage: S, page_size: usize) -> Self {
        let mut store = Self { state: AppState::new(page_size), recipes, nutrition, storage };
        store.rehydrate();
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn rehydrate(&mut self) {
        self.state.bookmarks = self.read_list::<RecipeSummary>(BOOKMARKS_KEY);
        self.state.shop_items = self
            .read_list::<StoredShopItem>(SHOP_ITEMS_KEY)
            .into_iter()
            .map(ShopItem::from)
            .collect();
        debug!(
            bookmarks = self.state.bookmarks.len(),
            shop_items = self.state.shop_items.len(),
            "state rehydrated"
        );
    }

    /// A missing or unreadable blob counts as an empty list.
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "storage read failed");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "discarding corrupt storage blob");
            Vec::new()
        })
    }

    fn persist_bookmarks(&mut self) -> Result<(), StoreError> {
        persist_list(&mut self.storage, BOOKMARKS_KEY, &self.state.bookmarks)
    }

    fn persist_shop_items(&mut self) -> Result<(), StoreError> {
        persist_list(&mut self.storage, SHOP_ITEMS_KEY, &self.state.shop_items)
    }

    fn mark_bookmarked(&mut self, id: &str, bookmarked: bool) {
        if let Some(recipe) = self.state.recipe.as_mut().filter(|r| r.id == id) {
            recipe.bookmarked = bookmarked;
        }
    }

    pub async fn load_recipe(&mut self, id: &str) -> Result<&RecipeDetail, StoreError> {
        let mut recipe = self.recipes.fetch_recipe(id).await?;
        recipe.bookmarked = self.state.is_bookmarked(&recipe.id);
        info!(id = %recipe.id, title = %recipe.title, "recipe loaded");
        Ok(&*self.state.recipe.insert(recipe))
    }

    /// Run a search and rewind to the first page. Returns the number of results.
    pub async fn search(&mut self, query: &str) -> Result<usize, StoreError> {
        let results = self.recipes.search(query).await?;
        let search = &mut self.state.search;
        search.query = query.to_string();
        search.results = results;
        search.page = 1;
        search.sorted = false;
        info!(query, results = search.results.len(), "search completed");
        Ok(search.results.len())
    }

    /// Select page `n` (1-based) and return its slice of the results.
    pub fn page(&mut self, n: usize) -> &[RecipeSummary] {
        self.state.search.page = n;
        self.current_page()
    }

    pub fn current_page(&self) -> &[RecipeSummary] {
        let search = &self.state.search;
        let len = search.results.len();
        let start = search.page.saturating_sub(1).saturating_mul(search.page_size).min(len);
        let end = search.page.saturating_mul(search.page_size).min(len);
        &search.results[start..end]
    }

    /// Rescale every quantity and the calorie total to `servings`.
    pub fn update_servings(&mut self, servings: NonZeroU32) -> Result<(), StoreError> {
        let recipe = self.state.recipe.as_mut().ok_or(StoreError::NoRecipe)?;
        let old = recipe.servings.max(1);
        let new = servings.get();
        let ratio = f64::from(new) / f64::from(old);

        let ingredients: Vec<Ingredient> = recipe
            .ingredients
            .iter()
            .map(|ing| Ingredient {
                quantity: ing.quantity.map(|q| q * ratio).filter(|q| *q != 0.0),
                ..ing.clone()
            })
            .collect();
        let calories = self.state.nutrition.scaled_calories(old, new);

        recipe.ingredients = ingredients;
        recipe.servings = new;
        self.state.nutrition.calories = calories;
        debug!(from = old, to = new, "servings updated");
        Ok(())
    }

    /// Bookmark `summary`. Nothing changes if the list cannot be persisted.
    pub fn add_bookmark(&mut self, summary: RecipeSummary) -> Result<(), StoreError> {
        let id = summary.id.clone();
        self.state.bookmarks.push(summary);
        if let Err(e) = self.persist_bookmarks() {
            self.state.bookmarks.pop();
            return Err(e);
        }
        self.mark_bookmarked(&id, true);
        info!(id = %id, "bookmark added");
        Ok(())
    }

    /// Remove the bookmark with `id`. Unknown ids are ignored.
    pub fn remove_bookmark(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(index) = self.state.bookmarks.iter().position(|b| b.id == id) else {
            return Ok(());
        };
        let removed = self.state.bookmarks.remove(index);
        if let Err(e) = self.persist_bookmarks() {
            self.state.bookmarks.insert(index, removed);
            return Err(e);
        }
        self.mark_bookmarked(id, false);
        info!(id, "bookmark removed");
        Ok(())
    }

    pub fn add_shop_item(&mut self, text: &str) -> Result<ShopItemId, StoreError> {
        let item = ShopItem::new(text.trim());
        let id = item.id;
        self.state.shop_items.push(item);
        if let Err(e) = self.persist_shop_items() {
            self.state.shop_items.pop();
            return Err(e);
        }
        Ok(id)
    }

    pub fn remove_shop_item(&mut self, id: ShopItemId) -> Result<(), StoreError> {
        let index = self
            .state
            .shop_items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.state.shop_items.remove(index);
        if let Err(e) = self.persist_shop_items() {
            self.state.shop_items.insert(index, removed);
            return Err(e);
        }
        Ok(())
    }

    pub fn reset_nutrition(&mut self) {
        self.state.nutrition.reset();
    }

    /// Look up one ingredient and fold it into the running totals.
    /// Returns whether the API knew its calories.
    pub async fn accumulate_nutrition(
        &mut self,
        quantity: Option<f64>,
        unit: &str,
        description: &str,
    ) -> Result<bool, StoreError> {
        let query = nutrition_query(&Ingredient {
            quantity,
            unit: unit.to_string(),
            description: description.to_string(),
        });
        match self.nutrition.parse_ingredient(&query).await? {
            Some(facts) => {
                self.state.nutrition.absorb(facts);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Recompute nutrition for the current recipe from scratch.
    ///
    /// All lookups run concurrently and are folded once, in ingredient order.
    /// A failed lookup is logged and skipped. Returns how many ingredients counted.
    pub async fn accumulate_recipe_nutrition(&mut self) -> Result<usize, StoreError> {
        let recipe = self.state.recipe.as_ref().ok_or(StoreError::NoRecipe)?;
        let queries: Vec<String> = recipe.ingredients.iter().map(nutrition_query).collect();
        self.state.nutrition.reset();

        let nutrition = &self.nutrition;
        let outcomes = join_all(queries.iter().map(|q| nutrition.parse_ingredient(q))).await;

        let mut counted = 0;
        for (query, outcome) in queries.iter().zip(outcomes) {
            match outcome {
                Ok(Some(facts)) => {
                    self.state.nutrition.absorb(facts);
                    counted += 1;
                }
                Ok(None) => debug!(query = %query, "no calories for ingredient"),
                Err(e) => warn!(query = %query, error = %e, "nutrition lookup failed"),
            }
        }
        debug!(counted, total = queries.len(), calories = self.state.nutrition.calories, "nutrition folded");
        Ok(counted)
    }

    /// Delete a recipe remotely, then forget it locally.
    pub async fn delete_recipe(&mut self, id: &str) -> Result<(), StoreError> {
        self.recipes.delete(id).await?;
        info!(id, "recipe deleted");
        if self.state.recipe.as_ref().is_some_and(|r| r.id == id) {
            self.state.recipe = None;
            self.state.nutrition.reset();
        }
        self.remove_bookmark(id)
    }

    /// Validate the add-recipe form, upload it and make the result current and bookmarked.
    pub async fn upload_recipe(&mut self, entries: &[(String, String)]) -> Result<&RecipeDetail, StoreError> {
        let new_recipe = parse_new_recipe(entries)?;
        let created = self.recipes.upload(&new_recipe).await?;
        let summary = created.summary();
        self.state.recipe = Some(created);
        self.state.nutrition.reset();
        self.add_bookmark(summary)?;
        self.state.recipe.as_ref().ok_or(StoreError::NoRecipe)
    }

    /// Sort the results by title, once per search.
    pub fn sort_results(&mut self) -> SortOutcome {
        let search = &mut self.state.search;
        if search.sorted {
            return SortOutcome::AlreadySorted;
        }
        search.results.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        });
        search.sorted = true;
        search.page = 1;
        SortOutcome::Sorted
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use larder_api::{ApiError, MacroBreakdown, NewRecipe, NutritionFacts};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    pub(crate) fn summary(id: &str, title: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.into(),
            title: title.into(),
            publisher: "pub".into(),
            image: format!("http://img/{}.jpg", id),
            key: None,
        }
    }

    pub(crate) fn detail(id: &str, servings: u32, quantities: &[Option<f64>]) -> RecipeDetail {
        RecipeDetail {
            id: id.into(),
            title: format!("Recipe {}", id),
            publisher: "pub".into(),
            image: String::new(),
            key: None,
            source_url: "http://src".into(),
            servings,
            cooking_time: 30,
            ingredients: quantities
                .iter()
                .enumerate()
                .map(|(i, q)| Ingredient { quantity: *q, unit: "g".into(), description: format!("item{}", i) })
                .collect(),
            bookmarked: false,
        }
    }

    #[derive(Default)]
    struct MockRecipes {
        recipes: HashMap<String, RecipeDetail>,
        results: Vec<RecipeSummary>,
        fail_delete: bool,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RecipeApi for MockRecipes {
        async fn fetch_recipe(&self, id: &str) -> Result<RecipeDetail, ApiError> {
            self.recipes.get(id).cloned().ok_or_else(|| ApiError::Http {
                status: 400,
                message: format!("Invalid _id: {}", id),
            })
        }

        async fn search(&self, _query: &str) -> Result<Vec<RecipeSummary>, ApiError> {
            Ok(self.results.clone())
        }

        async fn upload(&self, recipe: &NewRecipe) -> Result<RecipeDetail, ApiError> {
            Ok(RecipeDetail {
                id: "up1".into(),
                title: recipe.title.clone(),
                publisher: recipe.publisher.clone(),
                image: recipe.image.clone(),
                key: Some("k3y".into()),
                source_url: recipe.source_url.clone(),
                servings: recipe.servings,
                cooking_time: recipe.cooking_time,
                ingredients: recipe.ingredients.clone(),
                bookmarked: false,
            })
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            if self.fail_delete {
                return Err(ApiError::Http { status: 500, message: "Error: Internal Server Error".into() });
            }
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    enum Lookup {
        Facts(f64, f64, f64, f64),
        Nothing,
        Fail,
    }

    /// Answers keyed by ingredient description, each after its own delay.
    #[derive(Default)]
    struct MockNutrition {
        answers: HashMap<String, (u64, Lookup)>,
    }

    impl MockNutrition {
        fn with(mut self, description: &str, delay_ms: u64, lookup: Lookup) -> Self {
            self.answers.insert(description.to_string(), (delay_ms, lookup));
            self
        }
    }

    #[async_trait]
    impl NutritionApi for MockNutrition {
        async fn parse_ingredient(&self, ingredient: &str) -> Result<Option<NutritionFacts>, ApiError> {
            let description = ingredient.rsplit(' ').next().unwrap_or_default();
            let Some((delay, lookup)) = self.answers.get(description) else {
                return Ok(None);
            };
            tokio::time::sleep(Duration::from_millis(*delay)).await;
            match lookup {
                Lookup::Facts(calories, carb, fat, protein) => Ok(Some(NutritionFacts {
                    calories: *calories,
                    breakdown: MacroBreakdown::new(*carb, *fat, *protein),
                })),
                Lookup::Nothing => Ok(None),
                Lookup::Fail => Err(ApiError::Timeout(Duration::from_millis(50))),
            }
        }
    }

    type TestStore = Store<MockRecipes, MockNutrition, MemoryStore>;

    fn store_with(recipes: MockRecipes, nutrition: MockNutrition) -> TestStore {
        Store::open(recipes, nutrition, MemoryStore::new(), 10)
    }

    fn recipes_with(details: &[RecipeDetail]) -> MockRecipes {
        MockRecipes {
            recipes: details.iter().map(|d| (d.id.clone(), d.clone())).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_pizza_search_first_page() {
        let recipes = MockRecipes {
            results: vec![summary("1", "Cheese Pizza"), summary("2", "Veg Pizza")],
            ..Default::default()
        };
        let mut store = store_with(recipes, MockNutrition::default());
        assert_eq!(store.search("pizza").await.unwrap(), 2);

        let page: Vec<&str> = store.page(1).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(page, ["1", "2"]);
        assert_eq!(store.state().search.page, 1);
        assert_eq!(store.state().search.query, "pizza");
    }

    #[test]
    fn test_page_sizes_follow_min_rule() {
        let mut store = store_with(MockRecipes::default(), MockNutrition::default());
        for (len, size) in [(0usize, 10usize), (1, 10), (10, 10), (23, 10), (23, 7), (5, 1)] {
            store.state.search.page_size = size;
            store.state.search.results = (0..len).map(|i| summary(&i.to_string(), "t")).collect();
            let pages = store.state.search.page_count();
            for n in 1..=pages {
                let expected = size.min(len - (n - 1) * size);
                let page = store.page(n);
                assert_eq!(page.len(), expected, "len={} size={} n={}", len, size, n);
                assert_eq!(page[0].id, ((n - 1) * size).to_string());
            }
            assert!(store.page(pages + 1).is_empty());
            assert!(store.page(0).is_empty());
        }
    }

    #[tokio::test]
    async fn test_failed_load_leaves_state() {
        let recipes = MockRecipes { results: vec![summary("1", "a")], ..Default::default() };
        let mut store = store_with(recipes, MockNutrition::default());
        store.search("pasta").await.unwrap();
        assert!(store.load_recipe("missing").await.is_err());
        assert!(store.state().recipe.is_none());
        assert_eq!(store.state().search.query, "pasta");
    }

    #[tokio::test]
    async fn test_servings_round_trip() {
        let original = detail("r1", 4, &[Some(1.5), None, Some(0.333), Some(250.0)]);
        let mut store = store_with(recipes_with(&[original.clone()]), MockNutrition::default());
        store.load_recipe("r1").await.unwrap();
        store.state.nutrition.calories = 800;

        for n in [1u32, 3, 7, 12] {
            store.update_servings(NonZeroU32::new(n).unwrap()).unwrap();
            assert_eq!(store.state().recipe.as_ref().unwrap().servings, n);
            store.update_servings(NonZeroU32::new(4).unwrap()).unwrap();
            let restored = store.state().recipe.as_ref().unwrap();
            for (a, b) in restored.ingredients.iter().zip(&original.ingredients) {
                match (a.quantity, b.quantity) {
                    (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9, "{} vs {}", x, y),
                    (None, None) => {}
                    other => panic!("quantity changed nullness: {:?}", other),
                }
            }
        }
        store.update_servings(NonZeroU32::new(2).unwrap()).unwrap();
        assert_eq!(store.state().nutrition.calories, 400);
    }

    #[test]
    fn test_update_servings_without_recipe() {
        let mut store = store_with(MockRecipes::default(), MockNutrition::default());
        let err = store.update_servings(NonZeroU32::new(2).unwrap()).unwrap_err();
        assert!(matches!(err, StoreError::NoRecipe));
    }

    #[tokio::test]
    async fn test_bookmark_round_trip_persists() {
        let mut store = store_with(recipes_with(&[detail("r2", 2, &[])]), MockNutrition::default());
        store.add_bookmark(summary("a", "A")).unwrap();
        store.add_bookmark(summary("b", "B")).unwrap();
        let before = store.state().bookmarks.clone();

        store.load_recipe("r2").await.unwrap();
        let current = store.state().recipe.as_ref().unwrap().summary();
        store.add_bookmark(current).unwrap();
        assert!(store.state().recipe.as_ref().unwrap().bookmarked);

        store.remove_bookmark("r2").unwrap();
        assert!(!store.state().recipe.as_ref().unwrap().bookmarked);
        assert_eq!(store.state().bookmarks, before);

        let persisted: Vec<RecipeSummary> =
            serde_json::from_str(&store.storage().get(BOOKMARKS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, before);
    }

    #[tokio::test]
    async fn test_loaded_recipe_knows_it_is_bookmarked() {
        let mut store = store_with(recipes_with(&[detail("r3", 2, &[])]), MockNutrition::default());
        store.add_bookmark(summary("r3", "Recipe r3")).unwrap();
        assert!(store.load_recipe("r3").await.unwrap().bookmarked);
    }

    #[test]
    fn test_rehydrates_and_tolerates_corrupt_blobs() {
        let mut storage = MemoryStore::new();
        storage
            .set(BOOKMARKS_KEY, &serde_json::to_string(&vec![summary("x", "X")]).unwrap())
            .unwrap();
        storage.set(SHOP_ITEMS_KEY, "[\"1 cup milk\"").unwrap();
        let store = Store::open(MockRecipes::default(), MockNutrition::default(), storage, 10);
        assert_eq!(store.state().bookmarks.len(), 1);
        assert!(store.state().shop_items.is_empty());
    }

    #[test]
    fn test_shop_items_remove_by_id() {
        let mut store = store_with(MockRecipes::default(), MockNutrition::default());
        let a = store.add_shop_item("1 kg flour").unwrap();
        let b = store.add_shop_item("2 eggs").unwrap();
        let c = store.add_shop_item("salt").unwrap();

        store.remove_shop_item(a).unwrap();
        store.remove_shop_item(c).unwrap();
        let texts: Vec<&str> = store.state().shop_items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["2 eggs"]);
        assert_eq!(store.state().shop_items[0].id, b);
        assert!(matches!(store.remove_shop_item(a), Err(StoreError::NotFound(_))));

        let persisted = store.storage().get(SHOP_ITEMS_KEY).unwrap().unwrap();
        assert!(persisted.contains(&b.to_string()));
        assert!(!persisted.contains(&a.to_string()));
    }

    /// Serves whatever was seeded but refuses every write.
    struct FullDisk(MemoryStore);

    impl KeyValueStore for FullDisk {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Storage("disk full".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Storage("disk full".into()))
        }
    }

    #[tokio::test]
    async fn test_failed_persist_rolls_back() {
        let mut seeded = MemoryStore::new();
        seeded.set(BOOKMARKS_KEY, &serde_json::to_string(&vec![summary("r4", "Recipe r4")]).unwrap()).unwrap();
        seeded.set(SHOP_ITEMS_KEY, r#"["2 eggs"]"#).unwrap();
        let mut store = Store::open(
            recipes_with(&[detail("r4", 2, &[]), detail("r5", 2, &[])]),
            MockNutrition::default(),
            FullDisk(seeded),
            10,
        );

        store.load_recipe("r5").await.unwrap();
        let current = store.state().recipe.as_ref().unwrap().summary();
        let err = store.add_bookmark(current).unwrap_err();
        assert_eq!(err.to_string(), "storage: disk full");
        assert_eq!(store.state().bookmarks, [summary("r4", "Recipe r4")]);
        assert!(!store.state().recipe.as_ref().unwrap().bookmarked);

        store.load_recipe("r4").await.unwrap();
        assert!(store.remove_bookmark("r4").is_err());
        assert_eq!(store.state().bookmarks.len(), 1);
        assert!(store.state().recipe.as_ref().unwrap().bookmarked);

        assert!(store.add_shop_item("salt").is_err());
        let eggs = store.state().shop_items[0].id;
        assert!(store.remove_shop_item(eggs).is_err());
        let texts: Vec<&str> = store.state().shop_items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["2 eggs"]);
    }

    #[test]
    fn test_emptied_list_drops_its_key() {
        let mut store = store_with(MockRecipes::default(), MockNutrition::default());
        let id = store.add_shop_item("2 eggs").unwrap();
        assert!(store.storage().get(SHOP_ITEMS_KEY).unwrap().is_some());
        store.remove_shop_item(id).unwrap();
        assert_eq!(store.storage().get(SHOP_ITEMS_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_accumulate_single_ingredient() {
        let nutrition = MockNutrition::default()
            .with("butter", 0, Lookup::Facts(100.4, 40.0, 30.0, 30.0))
            .with("water", 0, Lookup::Nothing);
        let mut store = store_with(MockRecipes::default(), nutrition);
        assert!(store.accumulate_nutrition(Some(2.0), "tbsp", "butter").await.unwrap());
        assert!(!store.accumulate_nutrition(None, "", "water").await.unwrap());
        assert_eq!(store.state().nutrition.calories, 100);
        store.reset_nutrition();
        assert_eq!(store.state().nutrition.calories, 0);
    }

    #[tokio::test]
    async fn test_fan_out_folds_in_ingredient_order_and_skips_failures() {
        let mut recipe = detail("r4", 2, &[Some(1.0), Some(2.0), Some(3.0)]);
        recipe.ingredients[0].description = "slow".into();
        recipe.ingredients[1].description = "broken".into();
        recipe.ingredients[2].description = "fast".into();
        let nutrition = MockNutrition::default()
            .with("slow", 40, Lookup::Facts(120.0, 40.0, 30.0, 30.0))
            .with("broken", 0, Lookup::Fail)
            .with("fast", 1, Lookup::Facts(80.0, 20.0, 60.0, 20.0));
        let mut store = store_with(recipes_with(&[recipe]), nutrition);
        store.load_recipe("r4").await.unwrap();
        store.state.nutrition.calories = 9999;

        assert_eq!(store.accumulate_recipe_nutrition().await.unwrap(), 2);
        let acc = &store.state().nutrition;
        assert_eq!(acc.calories, 200);
        assert_eq!(acc.breakdowns[0], MacroBreakdown::new(40.0, 30.0, 30.0));
        assert_eq!(acc.aggregate, MacroBreakdown::new(30.0, 45.0, 25.0));
    }

    #[tokio::test]
    async fn test_delete_removes_bookmark_after_remote_success() {
        let mut owned = detail("mine", 2, &[]);
        owned.key = Some("k3y".into());
        let mut store = store_with(recipes_with(&[owned]), MockNutrition::default());
        store.load_recipe("mine").await.unwrap();
        let current = store.state().recipe.as_ref().unwrap().summary();
        store.add_bookmark(current).unwrap();

        store.delete_recipe("mine").await.unwrap();
        assert!(store.state().bookmarks.is_empty());
        assert!(store.state().recipe.is_none());
        assert_eq!(*store.recipes.deleted.lock().unwrap(), ["mine"]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_local_state() {
        let mut recipes = recipes_with(&[detail("mine", 2, &[])]);
        recipes.fail_delete = true;
        let mut store = store_with(recipes, MockNutrition::default());
        store.load_recipe("mine").await.unwrap();
        let current = store.state().recipe.as_ref().unwrap().summary();
        store.add_bookmark(current).unwrap();

        let err = store.delete_recipe("mine").await.unwrap_err();
        assert_eq!(err.to_string(), "Error: Internal Server Error (500)");
        assert_eq!(store.state().bookmarks.len(), 1);
        assert!(store.state().recipe.is_some());
    }

    #[tokio::test]
    async fn test_upload_makes_recipe_current_and_bookmarked() {
        let mut store = store_with(MockRecipes::default(), MockNutrition::default());
        let entries: Vec<(String, String)> = [
            ("title", "Soup"),
            ("sourceUrl", "http://s"),
            ("image", "http://i"),
            ("publisher", "me"),
            ("cookingTime", "20"),
            ("servings", "2"),
            ("ingr-description", "water"),
            ("ingr-quantity", "1"),
            ("ingr-unit", "l"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let created = store.upload_recipe(&entries).await.unwrap();
        assert_eq!(created.id, "up1");
        assert!(created.bookmarked);
        assert_eq!(store.state().bookmarks[0].key.as_deref(), Some("k3y"));

        let bad = vec![("title".to_string(), String::new())];
        assert!(matches!(store.upload_recipe(&bad).await, Err(StoreError::Validation(_))));
        assert_eq!(store.state().recipe.as_ref().unwrap().id, "up1");
    }

    #[tokio::test]
    async fn test_sort_once_per_search() {
        let recipes = MockRecipes {
            results: vec![summary("1", "veg Pizza"), summary("2", "Apple pie"), summary("3", "banana bread")],
            ..Default::default()
        };
        let mut store = store_with(recipes, MockNutrition::default());
        store.search("x").await.unwrap();
        store.page(2);

        assert_eq!(store.sort_results(), SortOutcome::Sorted);
        let titles: Vec<&str> = store.state().search.results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Apple pie", "banana bread", "veg Pizza"]);
        assert_eq!(store.state().search.page, 1);
        assert_eq!(store.sort_results(), SortOutcome::AlreadySorted);

        store.search("y").await.unwrap();
        assert_eq!(store.sort_results(), SortOutcome::Sorted);
    }

    #[test]
    fn test_nutrition_query_format() {
        let ing = Ingredient { quantity: Some(1.5), unit: "cups".into(), description: "milk".into() };
        assert_eq!(nutrition_query(&ing), "1.5 cups milk");
        let bare = Ingredient { quantity: None, unit: String::new(), description: "salt".into() };
        assert_eq!(nutrition_query(&bare), "  salt");
    }
}
