use std::sync::Arc;

use super::*;
use crate::test_support::{pasta_and_curry, recipe};

fn store() -> StoreSnapshot {
    StoreSnapshot::new(pasta_and_curry())
}

#[test]
fn toggle_favorite_flips_only_the_target_and_shares_the_rest() {
    let before = store();
    let after = before.toggle_favorite(RecipeId(1));

    assert!(!after.ptr_eq(&before));
    assert!(after.get(RecipeId(1)).expect("pasta").is_favorite);
    assert!(!before.get(RecipeId(1)).expect("pasta").is_favorite);
    assert!(Arc::ptr_eq(
        before.get(RecipeId(2)).expect("curry"),
        after.get(RecipeId(2)).expect("curry"),
    ));

    let back = after.toggle_favorite(RecipeId(1));
    assert!(!back.get(RecipeId(1)).expect("pasta").is_favorite);
}

#[test]
fn unknown_ids_return_the_same_snapshot() {
    let before = store();
    assert!(before.toggle_favorite(RecipeId(99)).ptr_eq(&before));
    assert!(before
        .toggle_ingredient_check(RecipeId(1), IngredientId(99))
        .ptr_eq(&before));
    assert!(before
        .toggle_step_completed(RecipeId(99), StepId(1))
        .ptr_eq(&before));
    assert!(before
        .update_step_notes(RecipeId(1), StepId(42), "ignored")
        .ptr_eq(&before));
    assert!(before.delete_recipe(RecipeId(99)).ptr_eq(&before));
    assert!(before.update_recipe(recipe(99, "Ghost")).ptr_eq(&before));
}

#[test]
fn nested_toggles_flip_ingredients_and_steps() {
    let after = store()
        .toggle_ingredient_check(RecipeId(2), IngredientId(1))
        .toggle_step_completed(RecipeId(2), StepId(3));

    let curry = after.get(RecipeId(2)).expect("curry");
    assert!(curry.ingredients[0].checked);
    assert!(!curry.ingredients[1].checked);
    assert!(curry.steps[2].completed);
    assert_eq!(curry.completed_steps(), 1);
    assert_eq!(curry.checked_ingredients(), 1);
}

#[test]
fn step_notes_are_stored_verbatim() {
    let text = "  let it rest 5 min\n(don't skip!)  ";
    let after = store().update_step_notes(RecipeId(1), StepId(2), text);
    assert_eq!(
        after.get(RecipeId(1)).expect("pasta").steps[1].notes.as_deref(),
        Some(text)
    );
}

#[test]
fn add_appends_and_rejects_duplicate_ids() {
    let before = store();
    let added = before.add_recipe(recipe(3, "Soup"));
    assert_eq!(added.len(), 3);
    assert_eq!(added.recipes()[2].title, "Soup");

    let duplicate = added.add_recipe(recipe(3, "Other soup"));
    assert!(duplicate.ptr_eq(&added));
}

#[test]
fn add_and_update_reject_records_that_fail_validation() {
    let before = store();

    let mut no_servings = recipe(3, "Soup");
    no_servings.servings = 0;
    assert!(before.add_recipe(no_servings).ptr_eq(&before));

    let mut overrated = recipe(3, "Soup");
    overrated.rating = Some(9.0);
    assert!(before.add_recipe(overrated).ptr_eq(&before));

    let mut emptied = recipe(2, "Curry");
    emptied.servings = 0;
    let after = before.update_recipe(emptied);
    assert!(after.ptr_eq(&before));
    assert_eq!(after.get(RecipeId(2)).expect("curry").servings, 2);

    let mut rated = recipe(2, "Curry");
    rated.rating = Some(5.0);
    assert!(!before.update_recipe(rated).ptr_eq(&before));
}

#[test]
fn delete_and_update_by_id() {
    let deleted = store().delete_recipe(RecipeId(1));
    assert_eq!(deleted.len(), 1);
    assert!(deleted.get(RecipeId(1)).is_none());

    let mut renamed = recipe(2, "Green curry");
    renamed.servings = 6;
    let updated = store().update_recipe(renamed);
    let curry = updated.get(RecipeId(2)).expect("curry");
    assert_eq!(curry.title, "Green curry");
    assert_eq!(curry.servings, 6);
    assert_eq!(updated.recipes()[0].id, RecipeId(1));
}

#[test]
fn apply_dispatches_actions() {
    let after = store().apply(&StoreAction::ToggleStepCompleted {
        recipe_id: RecipeId(1),
        step_id: StepId(1),
    });
    assert!(after.get(RecipeId(1)).expect("pasta").steps[0].completed);

    let after = after.apply(&StoreAction::AddRecipe {
        recipe: Box::new(recipe(5, "Tart")),
    });
    assert!(after.get(RecipeId(5)).is_some());
}

#[test]
fn readers_of_an_old_snapshot_never_see_later_mutations() {
    let reader = store();
    let writer = reader.toggle_step_completed(RecipeId(1), StepId(1));
    let writer = writer.update_step_notes(RecipeId(1), StepId(1), "done");

    let old = reader.get(RecipeId(1)).expect("pasta");
    assert!(!old.steps[0].completed);
    assert!(old.steps[0].notes.is_none());
    assert!(writer.get(RecipeId(1)).expect("pasta").steps[0].completed);
}
