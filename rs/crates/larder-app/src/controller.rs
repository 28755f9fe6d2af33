//! Wires actions to store operations and screen renders.
//!
//! Each handler runs its store operations in order and then renders or
//! patches the regions involved. Store faults end up as error blocks in the
//! region the user was looking at; nothing is retried.

use std::num::NonZeroU32;

use larder_api::{NutritionApi, RecipeApi};
use larder_core::{Action, KeyValueStore, ShopItemId, SortOutcome, Store, StoreError};
use larder_view::screens::{
    BookmarksView, HeaderView, NutritionView, PaginationView, RecipeView, ResultsMetaView, ResultsView,
    ShoppingListView, UploadForm, UploadView, BOOKMARKS, HEADER, NUTRITION, PAGINATION, RECIPE, RESULTS,
    RESULTS_META, SHOPPING, UPLOAD,
};
use larder_view::{render, render_error, render_message, render_spinner, to_action, update, EventError};
use tracing::{debug, error, info, warn};

use crate::page::Page;

pub const RECIPE_DELETED: &str = "Recipe deleted successfully.";

pub struct Controller<R, N, S> {
    store: Store<R, N, S>,
    page: Page,
    /// Id of the recipe the location points at.
    hash: Option<String>,
    nutrition_visible: bool,
    upload: UploadForm,
}

impl<R, N, S> Controller<R, N, S>
where
    R: RecipeApi,
    N: NutritionApi,
    S: KeyValueStore,
{
    /// Build the controller and paint the initial page.
    pub fn new(store: Store<R, N, S>) -> Self {
        let mut controller = Self {
            store,
            page: Page::new(),
            hash: None,
            nutrition_visible: false,
            upload: UploadForm::default(),
        };
        controller.init();
        controller
    }

    fn init(&mut self) {
        render(&HeaderView, self.page.region_mut(HEADER), "");
        render_message(&RecipeView, self.page.region_mut(RECIPE), None);
        self.render_bookmarks();
        self.render_shop_list();
        self.render_nutrition();
        render(&UploadView, self.page.region_mut(UPLOAD), &self.upload);
    }

    pub fn store(&self) -> &Store<R, N, S> {
        &self.store
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Resolve `event` on a region element and run the resulting action.
    ///
    /// `Ok(None)` when no element on the way up binds the event.
    pub async fn handle_event(
        &mut self,
        region: &str,
        index: usize,
        event: &str,
    ) -> Result<Option<Action>, EventError> {
        let Some(ui) = self.page.region(region).and_then(|r| r.fire(index, event)) else {
            return Ok(None);
        };
        let action = to_action(&ui)?;
        self.dispatch(action.clone()).await;
        Ok(Some(action))
    }

    pub async fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "dispatch");
        match action {
            Action::LoadRecipe { id } => self.control_recipe(&id).await,
            Action::Search { query } => self.control_search(&query).await,
            Action::GotoPage { page } => self.control_pagination(page),
            Action::UpdateServings { servings } => self.control_servings(servings),
            Action::ToggleBookmark => self.control_toggle_bookmark(),
            Action::ShowBookmarks => self.render_bookmarks(),
            Action::ToggleAddRecipe => self.control_toggle_upload(),
            Action::AddIngredientRow => self.control_ingredient_rows(None),
            Action::RemoveIngredientRow { index } => self.control_ingredient_rows(Some(index)),
            Action::UploadRecipe { entries } => self.control_upload(&entries).await,
            Action::AddShopItem { item } => self.control_add_shop_item(&item),
            Action::RemoveShopItem { id } => self.control_remove_shop_item(id),
            Action::ShowShopList => self.render_shop_list(),
            Action::ToggleNutrition => self.control_toggle_nutrition(),
            Action::SortResults => self.control_sort(),
            Action::DeleteRecipe => self.control_delete_recipe().await,
        }
    }

    fn render_results(&mut self) {
        let view = ResultsView { active: self.hash.as_deref() };
        render(&view, self.page.region_mut(RESULTS), self.store.current_page());
    }

    fn render_pagination(&mut self) {
        render(&PaginationView, self.page.region_mut(PAGINATION), &self.store.state().search);
    }

    fn render_bookmarks(&mut self) {
        let view = BookmarksView { active: self.hash.as_deref() };
        render(&view, self.page.region_mut(BOOKMARKS), &self.store.state().bookmarks);
    }

    fn render_shop_list(&mut self) {
        let items = &self.store.state().shop_items;
        let region = self.page.region_mut(SHOPPING);
        if items.is_empty() {
            render_message(&ShoppingListView, region, None);
        } else {
            render(&ShoppingListView, region, items);
        }
    }

    fn render_nutrition(&mut self) {
        let view = NutritionView { visible: self.nutrition_visible };
        render(&view, self.page.region_mut(NUTRITION), &self.store.state().nutrition);
    }

    fn update_nutrition(&mut self) {
        let view = NutritionView { visible: self.nutrition_visible };
        update(&view, self.page.region_mut(NUTRITION), &self.store.state().nutrition);
    }

    fn update_recipe(&mut self) {
        if let Some(recipe) = &self.store.state().recipe {
            update(&RecipeView, self.page.region_mut(RECIPE), recipe);
        }
    }

    async fn control_recipe(&mut self, id: &str) {
        let id = id.trim().trim_start_matches('#');
        if id.is_empty() {
            return;
        }
        self.hash = Some(id.to_string());
        render_spinner(self.page.region_mut(RECIPE));

        let active = ResultsView { active: self.hash.as_deref() };
        update(&active, self.page.region_mut(RESULTS), self.store.current_page());
        let active = BookmarksView { active: self.hash.as_deref() };
        update(&active, self.page.region_mut(BOOKMARKS), &self.store.state().bookmarks);

        match self.store.load_recipe(id).await {
            Ok(recipe) => {
                render(&RecipeView, self.page.region_mut(RECIPE), recipe);
            }
            Err(e) => {
                error!(id, error = %e, "failed to load recipe");
                render_error(&RecipeView, self.page.region_mut(RECIPE), None);
                return;
            }
        }

        match self.store.accumulate_recipe_nutrition().await {
            Ok(counted) => debug!(counted, "nutrition ready"),
            Err(e) => warn!(error = %e, "nutrition unavailable"),
        }
        self.update_nutrition();
    }

    async fn control_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        render_spinner(self.page.region_mut(RESULTS));

        if let Err(e) = self.store.search(query).await {
            error!(query, error = %e, "search failed");
            render_error(&ResultsView::default(), self.page.region_mut(RESULTS), Some(&e.to_string()));
            return;
        }
        self.store.page(1);
        self.render_results();
        render(&ResultsMetaView, self.page.region_mut(RESULTS_META), &self.store.state().search);
        self.render_pagination();
    }

    fn control_pagination(&mut self, page: usize) {
        self.store.page(page);
        self.render_results();
        self.render_pagination();
    }

    fn control_servings(&mut self, servings: NonZeroU32) {
        if let Err(e) = self.store.update_servings(servings) {
            warn!(error = %e, "cannot change servings");
            return;
        }
        self.update_recipe();
        self.update_nutrition();
    }

    fn control_toggle_bookmark(&mut self) {
        let Some(recipe) = &self.store.state().recipe else {
            debug!("no recipe to bookmark");
            return;
        };
        let result = if recipe.bookmarked {
            let id = recipe.id.clone();
            self.store.remove_bookmark(&id)
        } else {
            let summary = recipe.summary();
            self.store.add_bookmark(summary)
        };
        if let Err(e) = result {
            error!(error = %e, "failed to persist bookmarks");
            let view = BookmarksView { active: self.hash.as_deref() };
            render_error(&view, self.page.region_mut(BOOKMARKS), Some(&e.to_string()));
            return;
        }
        self.update_recipe();
        self.render_bookmarks();
    }

    /// Pull whatever has been typed into the modal back into `self.upload`.
    fn sync_upload_form(&mut self) -> bool {
        let Some(region) = self.page.region(UPLOAD) else {
            return false;
        };
        let Some(form) = region.position(|n| n.tag == "form") else {
            return false;
        };
        let entries = region.fire(form, "submit").map(|e| e.form).unwrap_or_default();
        self.upload = UploadForm::from_entries(self.upload.visible, &entries);
        true
    }

    fn control_toggle_upload(&mut self) {
        let has_form = self.sync_upload_form();
        let visible = !self.upload.visible;
        if has_form {
            self.upload.visible = visible;
            update(&UploadView, self.page.region_mut(UPLOAD), &self.upload);
        } else {
            self.upload = UploadForm { visible, ..UploadForm::default() };
            render(&UploadView, self.page.region_mut(UPLOAD), &self.upload);
        }
    }

    fn control_ingredient_rows(&mut self, remove: Option<usize>) {
        self.sync_upload_form();
        match remove {
            Some(index) => {
                if !self.upload.remove_row(index) {
                    return;
                }
            }
            None => self.upload.add_row(),
        }
        render(&UploadView, self.page.region_mut(UPLOAD), &self.upload);
    }

    async fn control_upload(&mut self, entries: &[(String, String)]) {
        render_spinner(self.page.region_mut(UPLOAD));

        let id = match self.store.upload_recipe(entries).await {
            Ok(recipe) => {
                render(&RecipeView, self.page.region_mut(RECIPE), recipe);
                recipe.id.clone()
            }
            Err(e) => {
                error!(error = %e, "upload failed");
                render_error(&UploadView, self.page.region_mut(UPLOAD), Some(&e.to_string()));
                return;
            }
        };
        info!(id = %id, "recipe uploaded");
        self.hash = Some(id);
        render_message(&UploadView, self.page.region_mut(UPLOAD), None);
        self.render_bookmarks();
        self.update_nutrition();
    }

    fn control_add_shop_item(&mut self, item: &str) {
        if item.trim().is_empty() {
            return;
        }
        if let Err(e) = self.store.add_shop_item(item) {
            self.shop_list_failed(&e);
            return;
        }
        self.render_shop_list();
    }

    fn control_remove_shop_item(&mut self, id: ShopItemId) {
        match self.store.remove_shop_item(id) {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => debug!(%id, "shopping item already gone"),
            Err(e) => {
                self.shop_list_failed(&e);
                return;
            }
        }
        self.render_shop_list();
    }

    fn shop_list_failed(&mut self, e: &StoreError) {
        error!(error = %e, "failed to persist shopping list");
        render_error(&ShoppingListView, self.page.region_mut(SHOPPING), Some(&e.to_string()));
    }

    fn control_toggle_nutrition(&mut self) {
        self.nutrition_visible = !self.nutrition_visible;
        self.update_nutrition();
    }

    fn control_sort(&mut self) {
        if self.store.sort_results() == SortOutcome::Sorted {
            self.render_results();
            self.render_pagination();
        }
        update(&ResultsMetaView, self.page.region_mut(RESULTS_META), &self.store.state().search);
    }

    async fn control_delete_recipe(&mut self) {
        let id = match (&self.hash, &self.store.state().recipe) {
            (Some(hash), _) => hash.clone(),
            (None, Some(recipe)) => recipe.id.clone(),
            (None, None) => return,
        };

        match self.store.delete_recipe(&id).await {
            Ok(()) => {
                self.hash = None;
                render_message(&RecipeView, self.page.region_mut(RECIPE), Some(RECIPE_DELETED));
                self.render_bookmarks();
                self.update_nutrition();
            }
            Err(e) => {
                error!(id = %id, error = %e, "failed to delete recipe");
                render_error(&RecipeView, self.page.region_mut(RECIPE), None);
            }
        }
    }
}
