use shared::{
    domain::{Recipe, RecipeId, Step, StepId},
    protocol::StoreAction,
};
use tracing::debug;

use crate::{
    celebration::Celebration,
    reorder::{move_item, DragGesture, DragOutcome},
};

/// Cook-mode working copy of one recipe's steps.
///
/// The local order lives only as long as the board. Completion and notes
/// are pulled from the store with [`StepBoard::sync_from`]; the order goes
/// back to the store only through [`StepBoard::commit_order`].
#[derive(Debug, Clone)]
pub struct StepBoard {
    recipe_id: RecipeId,
    steps: Vec<Step>,
    drag: DragGesture,
    celebration: Celebration,
    expanded: Option<StepId>,
}

impl StepBoard {
    pub fn new(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.id,
            steps: recipe.steps.clone(),
            drag: DragGesture::default(),
            celebration: Celebration::default(),
            expanded: None,
        }
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn order(&self) -> Vec<StepId> {
        self.steps.iter().map(|step| step.id).collect()
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }

    pub fn all_completed(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|step| step.completed)
    }

    pub fn index_of(&self, step_id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == step_id)
    }

    pub fn drag(&self) -> &DragGesture {
        &self.drag
    }

    pub fn begin_drag(&mut self, step_id: StepId) -> bool {
        match self.index_of(step_id) {
            Some(index) => {
                self.drag.begin(index);
                true
            }
            None => false,
        }
    }

    /// Ends the current drag over `over`, or outside any step when `None`.
    /// Returns whether the order changed.
    pub fn drop_over(&mut self, over: Option<StepId>) -> bool {
        let destination = over.and_then(|step_id| self.index_of(step_id));
        match self.drag.finish(destination) {
            Some(DragOutcome::Dropped {
                source,
                destination,
            }) => self.relocate(source, destination),
            Some(DragOutcome::Cancelled { source }) => {
                debug!(
                    recipe_id = self.recipe_id.0,
                    source, "board: drag cancelled without target"
                );
                false
            }
            None => false,
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn move_up(&mut self, step_id: StepId) -> bool {
        match self.index_of(step_id) {
            Some(index) if index > 0 => self.relocate(index, index - 1),
            _ => false,
        }
    }

    pub fn move_down(&mut self, step_id: StepId) -> bool {
        match self.index_of(step_id) {
            Some(index) => self.relocate(index, index + 1),
            None => false,
        }
    }

    fn relocate(&mut self, source: usize, destination: usize) -> bool {
        let before = self.order();
        self.steps = move_item(&self.steps, source, Some(destination));
        let changed = self.order() != before;
        if changed {
            debug!(
                recipe_id = self.recipe_id.0,
                source, destination, "board: step moved"
            );
        }
        changed
    }

    pub fn expanded(&self) -> Option<StepId> {
        self.expanded
    }

    /// Opens `step_id`, or closes it when it is already the open one.
    pub fn toggle_expanded(&mut self, step_id: StepId) -> Option<StepId> {
        self.expanded = if self.expanded == Some(step_id) {
            None
        } else {
            self.index_of(step_id).map(|_| step_id)
        };
        self.expanded
    }

    /// Refreshes step contents from the canonical recipe, keeping the local
    /// order. New steps are appended; steps gone from the recipe are dropped.
    pub fn sync_from(&mut self, recipe: &Recipe) {
        if recipe.id != self.recipe_id {
            return;
        }
        self.steps = self.in_local_order(recipe);
        if self
            .expanded
            .is_some_and(|step_id| self.index_of(step_id).is_none())
        {
            self.expanded = None;
        }
    }

    /// Feeds the current completion state into the celebration latch.
    /// Returns true exactly when a celebration should start.
    pub fn check_completion(&mut self) -> bool {
        let complete = self.all_completed();
        self.celebration.observe(complete)
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_active()
    }

    pub fn stop_celebration(&mut self) {
        self.celebration.stop();
    }

    /// Builds the store update that persists the local order into `recipe`.
    pub fn commit_order(&self, recipe: &Recipe) -> Option<StoreAction> {
        if recipe.id != self.recipe_id {
            return None;
        }
        let ordered = self.in_local_order(recipe);
        if ordered == recipe.steps {
            return None;
        }
        let mut updated = recipe.clone();
        updated.steps = ordered;
        Some(StoreAction::UpdateRecipe {
            recipe: Box::new(updated),
        })
    }

    fn in_local_order(&self, recipe: &Recipe) -> Vec<Step> {
        let mut ordered: Vec<Step> = self
            .steps
            .iter()
            .filter_map(|local| recipe.steps.iter().find(|step| step.id == local.id))
            .cloned()
            .collect();
        for step in &recipe.steps {
            if !ordered.iter().any(|existing| existing.id == step.id) {
                ordered.push(step.clone());
            }
        }
        ordered
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
