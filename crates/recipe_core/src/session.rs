use std::{sync::Arc, time::Duration};

use shared::{
    domain::{Category, Difficulty, IngredientId, Recipe, RecipeId, StepId},
    error::CoreError,
    protocol::{CookEvent, StoreAction},
};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    board::StepBoard,
    driver::TimerDriver,
    filter::{
        compute_filtered_view, favorites_view, recent_view, FilterCriteria, FilterUpdate,
        DEFAULT_RECENT_LIMIT,
    },
    seed::SeedCatalog,
    store::StoreSnapshot,
    timer::{StepTimer, DEFAULT_TIMER_SECONDS},
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub default_timer_seconds: u32,
    pub tick: Duration,
    pub recent_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_timer_seconds: DEFAULT_TIMER_SECONDS,
            tick: Duration::from_secs(1),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// Application state for one browsing session.
///
/// Owns the store snapshot, the filter criteria and the derived view, plus
/// the cook-mode board for the active recipe. The view is recomputed after
/// every mutation that actually changed the snapshot or the criteria.
pub struct RecipeSession {
    config: SessionConfig,
    store: StoreSnapshot,
    criteria: FilterCriteria,
    filtered: Vec<Arc<Recipe>>,
    trending_tags: Vec<String>,
    active_recipe: Option<RecipeId>,
    board: Option<StepBoard>,
    events: broadcast::Sender<CookEvent>,
}

impl RecipeSession {
    pub fn new(catalog: SeedCatalog, config: SessionConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let store = StoreSnapshot::new(catalog.recipes);
        let criteria = FilterCriteria::default();
        let filtered = compute_filtered_view(store.recipes(), &criteria);
        info!(recipes = store.len(), "session: started");
        Self {
            config,
            store,
            criteria,
            filtered,
            trending_tags: catalog.trending_tags,
            active_recipe: None,
            board: None,
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CookEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &StoreSnapshot {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Arc<Recipe>] {
        &self.filtered
    }

    pub fn trending_tags(&self) -> &[String] {
        &self.trending_tags
    }

    pub fn favorites(&self) -> Vec<Arc<Recipe>> {
        favorites_view(&self.filtered)
    }

    pub fn recent(&self) -> Vec<Arc<Recipe>> {
        recent_view(&self.filtered, self.config.recent_limit)
    }

    /// Applies a store mutation. Returns false when it matched nothing.
    pub fn apply(&mut self, action: StoreAction) -> bool {
        let next = self.store.apply(&action);
        if next.ptr_eq(&self.store) {
            debug!(action = action.name(), "session: action left store unchanged");
            return false;
        }
        self.store = next;
        debug!(action = action.name(), "session: store updated");
        self.recompute();
        self.after_store_change(&action);
        true
    }

    pub fn toggle_favorite(&mut self, recipe_id: RecipeId) -> bool {
        self.apply(StoreAction::ToggleFavorite { recipe_id })
    }

    pub fn toggle_ingredient_check(
        &mut self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    ) -> bool {
        self.apply(StoreAction::ToggleIngredientCheck {
            recipe_id,
            ingredient_id,
        })
    }

    pub fn toggle_step_completed(&mut self, recipe_id: RecipeId, step_id: StepId) -> bool {
        self.apply(StoreAction::ToggleStepCompleted { recipe_id, step_id })
    }

    pub fn update_step_notes(
        &mut self,
        recipe_id: RecipeId,
        step_id: StepId,
        notes: impl Into<String>,
    ) -> bool {
        self.apply(StoreAction::UpdateStepNotes {
            recipe_id,
            step_id,
            notes: notes.into(),
        })
    }

    pub fn add_recipe(&mut self, recipe: Recipe) -> bool {
        self.apply(StoreAction::AddRecipe {
            recipe: Box::new(recipe),
        })
    }

    pub fn delete_recipe(&mut self, recipe_id: RecipeId) -> bool {
        self.apply(StoreAction::DeleteRecipe { recipe_id })
    }

    pub fn update_recipe(&mut self, recipe: Recipe) -> bool {
        self.apply(StoreAction::UpdateRecipe {
            recipe: Box::new(recipe),
        })
    }

    pub fn update_filter(&mut self, update: FilterUpdate) -> bool {
        let next = self.criteria.merged(update);
        self.set_criteria(next)
    }

    pub fn reset_filters(&mut self) -> bool {
        self.set_criteria(FilterCriteria::default())
    }

    pub fn toggle_category(&mut self, category: Category) -> bool {
        let next = self.criteria.with_category_toggled(category);
        self.set_criteria(next)
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let next = self.criteria.with_tag_toggled(tag);
        self.set_criteria(next)
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) -> bool {
        let next = self.criteria.with_difficulty_toggled(difficulty);
        self.set_criteria(next)
    }

    pub fn select_category(&mut self, category: Category) -> bool {
        let next = self.criteria.with_only_category(category);
        self.set_criteria(next)
    }

    pub fn select_tag(&mut self, tag: &str) -> bool {
        let next = self.criteria.with_only_tag(tag);
        self.set_criteria(next)
    }

    fn set_criteria(&mut self, criteria: FilterCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.filtered = compute_filtered_view(self.store.recipes(), &self.criteria);
        debug!(
            total = self.store.len(),
            visible = self.filtered.len(),
            active_filters = self.criteria.active_filter_count(),
            "session: filtered view recomputed"
        );
    }

    fn after_store_change(&mut self, action: &StoreAction) {
        match action {
            StoreAction::ToggleFavorite { recipe_id } => {
                if let Some(recipe) = self.store.get(*recipe_id) {
                    self.emit(CookEvent::FavoriteToggled {
                        recipe_id: *recipe_id,
                        is_favorite: recipe.is_favorite,
                    });
                }
            }
            StoreAction::ToggleIngredientCheck {
                recipe_id,
                ingredient_id,
            } => {
                let checked = self
                    .store
                    .get(*recipe_id)
                    .and_then(|recipe| {
                        recipe
                            .ingredients
                            .iter()
                            .find(|ingredient| ingredient.id == *ingredient_id)
                    })
                    .map(|ingredient| ingredient.checked);
                if let Some(checked) = checked {
                    self.emit(CookEvent::IngredientChecked {
                        recipe_id: *recipe_id,
                        ingredient_id: *ingredient_id,
                        checked,
                    });
                }
            }
            StoreAction::ToggleStepCompleted { recipe_id, step_id } => {
                let completed = self
                    .store
                    .get(*recipe_id)
                    .and_then(|recipe| recipe.steps.iter().find(|step| step.id == *step_id))
                    .map(|step| step.completed);
                if let Some(completed) = completed {
                    self.emit(CookEvent::StepCompleted {
                        recipe_id: *recipe_id,
                        step_id: *step_id,
                        completed,
                    });
                }
            }
            StoreAction::UpdateStepNotes {
                recipe_id, step_id, ..
            } => self.emit(CookEvent::StepNotesSaved {
                recipe_id: *recipe_id,
                step_id: *step_id,
            }),
            StoreAction::DeleteRecipe { recipe_id } => {
                if self.active_recipe == Some(*recipe_id) {
                    self.close_recipe();
                }
            }
            StoreAction::AddRecipe { .. } | StoreAction::UpdateRecipe { .. } => {}
        }
        self.sync_board();
    }

    fn sync_board(&mut self) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let Some(recipe) = self.store.get(board.recipe_id()) else {
            return;
        };
        board.sync_from(recipe);
        if board.check_completion() {
            let recipe_id = board.recipe_id();
            info!(recipe_id = recipe_id.0, "session: every step completed");
            self.emit(CookEvent::AllStepsCompleted { recipe_id });
        }
    }

    fn emit(&self, event: CookEvent) {
        let _ = self.events.send(event);
    }

    pub fn active_recipe(&self) -> Option<&Arc<Recipe>> {
        self.active_recipe.and_then(|recipe_id| self.store.get(recipe_id))
    }

    /// Opens a recipe in cook mode with a fresh step board. Returns false
    /// when the id is unknown.
    pub fn open_recipe(&mut self, recipe_id: RecipeId) -> bool {
        let Some(recipe) = self.store.get(recipe_id) else {
            debug!(recipe_id = recipe_id.0, "session: open matched no recipe");
            return false;
        };
        self.active_recipe = Some(recipe_id);
        self.board = Some(StepBoard::new(recipe));
        info!(recipe_id = recipe_id.0, "session: cook mode opened");
        self.sync_board();
        true
    }

    /// Leaves cook mode, discarding the board's local order.
    pub fn close_recipe(&mut self) {
        if let Some(board) = self.board.take() {
            debug!(
                recipe_id = board.recipe_id().0,
                "session: cook mode closed, local order discarded"
            );
        }
        self.active_recipe = None;
    }

    pub fn board(&self) -> Option<&StepBoard> {
        self.board.as_ref()
    }

    pub fn begin_step_drag(&mut self, step_id: StepId) -> bool {
        self.board
            .as_mut()
            .is_some_and(|board| board.begin_drag(step_id))
    }

    pub fn drop_step(&mut self, over: Option<StepId>) -> bool {
        let moved = self
            .board
            .as_mut()
            .is_some_and(|board| board.drop_over(over));
        if moved {
            self.emit_reordered();
        }
        moved
    }

    pub fn cancel_step_drag(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.cancel_drag();
        }
    }

    pub fn move_step_up(&mut self, step_id: StepId) -> bool {
        let moved = self
            .board
            .as_mut()
            .is_some_and(|board| board.move_up(step_id));
        if moved {
            self.emit_reordered();
        }
        moved
    }

    pub fn move_step_down(&mut self, step_id: StepId) -> bool {
        let moved = self
            .board
            .as_mut()
            .is_some_and(|board| board.move_down(step_id));
        if moved {
            self.emit_reordered();
        }
        moved
    }

    fn emit_reordered(&self) {
        if let Some(board) = self.board.as_ref() {
            self.emit(CookEvent::StepsReordered {
                recipe_id: board.recipe_id(),
                order: board.order(),
            });
        }
    }

    pub fn toggle_step_expanded(&mut self, step_id: StepId) -> Option<StepId> {
        self.board
            .as_mut()
            .and_then(|board| board.toggle_expanded(step_id))
    }

    pub fn stop_celebration(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.stop_celebration();
        }
    }

    /// Writes the board's local step order into the store.
    pub fn commit_step_order(&mut self) -> bool {
        let action = self.board.as_ref().and_then(|board| {
            self.store
                .get(board.recipe_id())
                .and_then(|recipe| board.commit_order(recipe))
        });
        match action {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Builds a countdown for a step of the active recipe. `Ok(None)` when
    /// nothing is open or the step is unknown.
    pub fn timer_for_step(&self, step_id: StepId) -> Result<Option<TimerDriver>, CoreError> {
        let Some(recipe) = self.active_recipe() else {
            return Ok(None);
        };
        let Some(step) = recipe.steps.iter().find(|step| step.id == step_id) else {
            return Ok(None);
        };
        let timer = StepTimer::for_step(step, self.config.default_timer_seconds)?;
        Ok(Some(TimerDriver::new(
            recipe.id,
            step_id,
            timer,
            self.config.tick,
            self.events.clone(),
        )))
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
