//! Plain-text rendering for the terminal front end.

use std::sync::Arc;

use recipe_core::{FilterCriteria, StepBoard, TimerSnapshot};
use shared::domain::Recipe;

pub fn recipe_row(recipe: &Recipe) -> String {
    let favorite = if recipe.is_favorite { "*" } else { " " };
    let rating = recipe
        .rating
        .map(|rating| format!("{rating:.1}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{favorite} #{:<3} {:<30} {:<9} {:<6} {:>4} min  {:>3}  [{}]",
        recipe.id.0,
        recipe.title,
        recipe.category.as_str(),
        recipe.difficulty.as_str(),
        recipe.total_time(),
        rating,
        recipe.tags.join(", ")
    )
}

pub fn recipe_list(title: &str, recipes: &[Arc<Recipe>]) -> String {
    let mut out = format!("{title} ({})\n", recipes.len());
    if recipes.is_empty() {
        out.push_str("  No recipes found with the current filters.\n");
    }
    for recipe in recipes {
        out.push_str(&recipe_row(recipe));
        out.push('\n');
    }
    out
}

pub fn criteria_summary(criteria: &FilterCriteria) -> Option<String> {
    if criteria.is_identity() {
        return None;
    }
    let mut parts = Vec::new();
    if !criteria.query.is_empty() {
        parts.push(format!("query={:?}", criteria.query));
    }
    if !criteria.categories.is_empty() {
        let categories: Vec<&str> = criteria.categories.iter().map(|c| c.as_str()).collect();
        parts.push(format!("categories={}", categories.join("|")));
    }
    if !criteria.tags.is_empty() {
        let tags: Vec<&str> = criteria.tags.iter().map(String::as_str).collect();
        parts.push(format!("tags={}", tags.join("|")));
    }
    if let Some(difficulty) = criteria.difficulty {
        parts.push(format!("difficulty={difficulty}"));
    }
    if let Some(max_time) = criteria.time_bound() {
        parts.push(format!("max_time={max_time}"));
    }
    if criteria.favorites_only {
        parts.push("favorites_only".to_string());
    }
    Some(format!(
        "Filters ({} active): {}",
        criteria.active_filter_count(),
        parts.join(", ")
    ))
}

pub fn recipe_detail(recipe: &Recipe) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n{}\n\n", recipe.title, recipe.description));
    out.push_str(&format!(
        "{} | {} min total ({} prep, {} cook) | serves {}\n",
        recipe.difficulty,
        recipe.total_time(),
        recipe.prep_time,
        recipe.cook_time,
        recipe.servings
    ));
    if !recipe.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", recipe.tags.join(", ")));
    }

    out.push_str(&format!(
        "\nIngredients {}/{}\n",
        recipe.checked_ingredients(),
        recipe.ingredients.len()
    ));
    for ingredient in &recipe.ingredients {
        let mark = if ingredient.checked { "x" } else { " " };
        out.push_str(&format!(
            "  [{mark}] {} - {} {}\n",
            ingredient.name, ingredient.amount, ingredient.unit
        ));
    }

    out.push_str("\nNotes: ");
    out.push_str(
        recipe
            .notes
            .as_deref()
            .unwrap_or("No notes have been added to this recipe."),
    );
    out.push('\n');
    out
}

pub fn board(board: &StepBoard) -> String {
    let mut out = format!(
        "Steps {}/{} completed\n",
        board.completed_count(),
        board.steps().len()
    );
    for (index, step) in board.steps().iter().enumerate() {
        let mark = if step.completed { "x" } else { " " };
        out.push_str(&format!("  [{mark}] {}. {}", index + 1, step.description));
        if let Some(minutes) = step.estimated_time {
            out.push_str(&format!(" (est. {minutes} min)"));
        }
        if step.has_timer {
            out.push_str(" [timer]");
        }
        out.push('\n');
        if let Some(notes) = step.notes.as_deref().filter(|notes| !notes.is_empty()) {
            out.push_str(&format!("        note: {notes}\n"));
        }
    }
    out
}

pub fn timer_line(snapshot: &TimerSnapshot) -> String {
    let filled = (snapshot.percent_complete / 5.0).round() as usize;
    format!(
        "  {:>6} [{:<20}] {:>3.0}%",
        snapshot.formatted,
        "#".repeat(filled.min(20)),
        snapshot.percent_complete
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
