use tokio::sync::broadcast::error::TryRecvError;

use super::*;
use crate::test_support::{pasta_and_curry, recipe};

fn session() -> RecipeSession {
    let catalog = SeedCatalog {
        trending_tags: vec!["italian".to_string(), "spicy".to_string()],
        recipes: pasta_and_curry(),
    };
    RecipeSession::new(catalog, SessionConfig::default())
}

fn visible(session: &RecipeSession) -> Vec<i64> {
    session.filtered().iter().map(|recipe| recipe.id.0).collect()
}

fn drain(rx: &mut broadcast::Receiver<CookEvent>) -> Vec<CookEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return events,
            Err(TryRecvError::Lagged(_)) => continue,
        }
    }
}

#[test]
fn starts_with_unfiltered_view() {
    let session = session();
    assert_eq!(visible(&session), vec![1, 2]);
    assert_eq!(session.trending_tags(), ["italian", "spicy"]);
}

#[test]
fn filter_updates_recompute_view() {
    let mut session = session();
    assert!(session.update_filter(FilterUpdate {
        difficulty: Some(Some(Difficulty::Easy)),
        ..FilterUpdate::default()
    }));
    assert_eq!(visible(&session), vec![1]);

    assert!(!session.update_filter(FilterUpdate {
        difficulty: Some(Some(Difficulty::Easy)),
        ..FilterUpdate::default()
    }));

    assert!(session.toggle_difficulty(Difficulty::Easy));
    assert_eq!(visible(&session), vec![1, 2]);

    session.select_tag("spicy");
    assert_eq!(visible(&session), vec![2]);
    session.toggle_tag("italian");
    assert_eq!(visible(&session), vec![1, 2]);

    session.toggle_category(Category::Dessert);
    assert!(visible(&session).is_empty());
    session.select_category(Category::Dinner);
    assert_eq!(visible(&session), vec![1, 2]);

    assert!(session.reset_filters());
    assert!(session.criteria().is_identity());
    assert!(!session.reset_filters());
}

#[test]
fn store_mutations_flow_into_favorites_only_view() {
    let mut session = session();
    let mut rx = session.subscribe_events();
    session.update_filter(FilterUpdate {
        favorites_only: Some(true),
        ..FilterUpdate::default()
    });
    assert!(visible(&session).is_empty());

    assert!(session.toggle_favorite(RecipeId(2)));
    assert_eq!(visible(&session), vec![2]);
    assert_eq!(session.favorites().len(), 1);
    assert_eq!(
        drain(&mut rx),
        vec![CookEvent::FavoriteToggled {
            recipe_id: RecipeId(2),
            is_favorite: true,
        }]
    );

    assert!(!session.toggle_favorite(RecipeId(77)));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn add_update_and_delete_recipes() {
    let mut session = session();
    let mut soup = recipe(3, "Soup");
    soup.tags = vec!["spicy".to_string()];
    assert!(session.add_recipe(soup.clone()));
    assert!(!session.add_recipe(soup));
    assert_eq!(visible(&session), vec![1, 2, 3]);
    assert_eq!(session.recent()[0].id, RecipeId(3));

    session.select_tag("spicy");
    let mut renamed = recipe(3, "Mild soup");
    renamed.tags = vec!["mild".to_string()];
    assert!(session.update_recipe(renamed));
    assert_eq!(visible(&session), vec![2]);

    assert!(session.delete_recipe(RecipeId(2)));
    assert!(visible(&session).is_empty());
    assert_eq!(session.store().len(), 2);
}

#[test]
fn cook_mode_tracks_completion_and_celebrates_once() {
    let mut session = session();
    let mut rx = session.subscribe_events();
    assert!(!session.open_recipe(RecipeId(9)));
    assert!(session.open_recipe(RecipeId(1)));

    session.toggle_ingredient_check(RecipeId(1), IngredientId(2));
    for step in 1..=3 {
        assert!(session.toggle_step_completed(RecipeId(1), StepId(step)));
    }

    let events = drain(&mut rx);
    assert_eq!(
        events[0],
        CookEvent::IngredientChecked {
            recipe_id: RecipeId(1),
            ingredient_id: IngredientId(2),
            checked: true,
        }
    );
    let celebrations = events
        .iter()
        .filter(|event| matches!(event, CookEvent::AllStepsCompleted { .. }))
        .count();
    assert_eq!(celebrations, 1);
    assert_eq!(
        events.last(),
        Some(&CookEvent::AllStepsCompleted {
            recipe_id: RecipeId(1)
        })
    );

    let board = session.board().expect("board");
    assert_eq!(board.completed_count(), 3);
    assert!(board.is_celebrating());

    session.update_step_notes(RecipeId(1), StepId(1), "extra salt");
    assert!(drain(&mut rx)
        .iter()
        .all(|event| !matches!(event, CookEvent::AllStepsCompleted { .. })));

    session.stop_celebration();
    session.toggle_step_completed(RecipeId(1), StepId(2));
    session.toggle_step_completed(RecipeId(1), StepId(2));
    let again = drain(&mut rx);
    assert!(again.contains(&CookEvent::AllStepsCompleted {
        recipe_id: RecipeId(1)
    }));
}

#[test]
fn local_order_is_session_only_until_committed() {
    let mut session = session();
    let mut rx = session.subscribe_events();
    session.open_recipe(RecipeId(2));

    assert!(session.begin_step_drag(StepId(3)));
    assert!(session.drop_step(Some(StepId(1))));
    assert_eq!(
        drain(&mut rx),
        vec![CookEvent::StepsReordered {
            recipe_id: RecipeId(2),
            order: vec![StepId(3), StepId(1), StepId(2)],
        }]
    );

    session.begin_step_drag(StepId(1));
    session.cancel_step_drag();
    assert!(!session.drop_step(Some(StepId(2))));

    let canonical: Vec<StepId> = session
        .store()
        .get(RecipeId(2))
        .expect("curry")
        .steps
        .iter()
        .map(|step| step.id)
        .collect();
    assert_eq!(canonical, vec![StepId(1), StepId(2), StepId(3)]);

    session.toggle_step_completed(RecipeId(2), StepId(1));
    assert_eq!(
        session.board().expect("board").order(),
        vec![StepId(3), StepId(1), StepId(2)]
    );

    assert!(session.commit_step_order());
    let committed = session.active_recipe().expect("active");
    assert_eq!(committed.steps[0].id, StepId(3));
    assert!(committed.steps[1].completed);
    assert!(!session.commit_step_order());

    session.close_recipe();
    assert!(session.board().is_none());
    assert!(session.active_recipe().is_none());
}

#[test]
fn keyboard_moves_and_expansion_go_through_the_board() {
    let mut session = session();
    assert!(!session.move_step_down(StepId(1)));
    session.open_recipe(RecipeId(1));

    assert!(session.move_step_down(StepId(1)));
    assert!(session.move_step_up(StepId(3)));
    assert_eq!(
        session.board().expect("board").order(),
        vec![StepId(2), StepId(3), StepId(1)]
    );
    assert_eq!(session.toggle_step_expanded(StepId(2)), Some(StepId(2)));
    assert_eq!(session.toggle_step_expanded(StepId(2)), None);
}

#[test]
fn deleting_the_active_recipe_closes_cook_mode() {
    let mut session = session();
    session.open_recipe(RecipeId(1));
    session.delete_recipe(RecipeId(1));
    assert!(session.active_recipe().is_none());
    assert!(session.board().is_none());
}

#[test]
fn timers_are_built_for_steps_of_the_active_recipe() {
    let mut session = session();
    assert!(session.timer_for_step(StepId(1)).expect("timer").is_none());

    session.open_recipe(RecipeId(1));
    let driver = session
        .timer_for_step(StepId(1))
        .expect("timer")
        .expect("driver for known step");
    assert_eq!(driver.recipe_id(), RecipeId(1));
    assert!(session.timer_for_step(StepId(99)).expect("timer").is_none());

    let config = SessionConfig {
        default_timer_seconds: 0,
        ..SessionConfig::default()
    };
    let mut broken = RecipeSession::new(
        SeedCatalog {
            trending_tags: Vec::new(),
            recipes: pasta_and_curry(),
        },
        config,
    );
    broken.open_recipe(RecipeId(1));
    assert!(matches!(
        broken.timer_for_step(StepId(1)),
        Err(CoreError::ZeroDuration)
    ));
}
