use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand};
use recipe_core::{FilterUpdate, RecipeSession, SeedCatalog, TimerState};
use shared::{
    domain::{Category, Difficulty, IngredientId, RecipeId, StepId},
    protocol::CookEvent,
};
use tokio::{sync::broadcast, time::sleep};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "recipeflow", about = "Browse recipes and cook step by step")]
struct Cli {
    /// Settings file; defaults to ./recipeflow.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Recipe catalog JSON overriding the built-in one.
    #[arg(long)]
    seed: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long, short)]
    query: Option<String>,
    #[arg(long = "category")]
    categories: Vec<Category>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Maximum prep plus cook time in minutes.
    #[arg(long)]
    max_time: Option<u32>,
    #[arg(long)]
    favorites: bool,
}

impl FilterArgs {
    fn into_update(self) -> FilterUpdate {
        FilterUpdate {
            query: self.query,
            categories: (!self.categories.is_empty())
                .then(|| self.categories.into_iter().collect()),
            tags: (!self.tags.is_empty()).then(|| self.tags.into_iter().collect()),
            difficulty: self.difficulty.map(Some),
            max_time: self.max_time.map(Some),
            favorites_only: self.favorites.then_some(true),
        }
    }
}

#[derive(Args, Debug)]
struct CookArgs {
    id: i64,
    /// Desired step order, e.g. `--order 3,1,2`.
    #[arg(long, value_delimiter = ',')]
    order: Vec<i64>,
    /// Ingredient ids to check off.
    #[arg(long, value_delimiter = ',')]
    check: Vec<i64>,
    /// Step ids to mark complete.
    #[arg(long, value_delimiter = ',')]
    complete: Vec<i64>,
    /// Step notes as `STEP_ID:TEXT`; may be repeated.
    #[arg(long = "note")]
    notes: Vec<String>,
    /// Run the countdown for this step id.
    #[arg(long)]
    timer: Option<i64>,
    /// Persist the rearranged step order into the recipe.
    #[arg(long)]
    commit: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Categories and trending tags.
    Browse,
    List(FilterArgs),
    Favorites(FilterArgs),
    Recent(FilterArgs),
    Show {
        id: i64,
    },
    Cook(CookArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(seed) = cli.seed {
        settings.seed_path = Some(seed);
    }
    let catalog = SeedCatalog::load_or_builtin(settings.seed_path.as_deref())?;
    let mut session = RecipeSession::new(catalog, settings.session_config());

    match cli.command {
        Command::Browse => browse(&session),
        Command::List(filters) => {
            session.update_filter(filters.into_update());
            print_criteria(&session);
            print!("{}", render::recipe_list("All Recipes", session.filtered()));
        }
        Command::Favorites(filters) => {
            session.update_filter(filters.into_update());
            print_criteria(&session);
            print!(
                "{}",
                render::recipe_list("Your Favorite Recipes", &session.favorites())
            );
        }
        Command::Recent(filters) => {
            session.update_filter(filters.into_update());
            print_criteria(&session);
            print!("{}", render::recipe_list("Recently Added", &session.recent()));
        }
        Command::Show { id } => {
            if !session.open_recipe(RecipeId(id)) {
                bail!("no recipe with id {id}");
            }
            if let Some(recipe) = session.active_recipe() {
                println!("{}", render::recipe_detail(recipe));
            }
            if let Some(board) = session.board() {
                print!("{}", render::board(board));
            }
        }
        Command::Cook(args) => cook(&mut session, &settings, args).await?,
    }

    Ok(())
}

fn browse(session: &RecipeSession) {
    println!("Categories");
    for category in Category::ALL {
        let count = session
            .store()
            .iter()
            .filter(|recipe| recipe.category == category)
            .count();
        println!("  {:<10} {count}", category.label());
    }
    println!("\nTrending tags: {}", session.trending_tags().join(", "));
}

fn print_criteria(session: &RecipeSession) {
    if let Some(summary) = render::criteria_summary(session.criteria()) {
        println!("{summary}");
    }
}

async fn cook(session: &mut RecipeSession, settings: &Settings, args: CookArgs) -> Result<()> {
    let recipe_id = RecipeId(args.id);
    let mut events = session.subscribe_events();
    if !session.open_recipe(recipe_id) {
        bail!("no recipe with id {}", args.id);
    }

    for (target, step_id) in args.order.iter().enumerate() {
        let over = session
            .board()
            .and_then(|board| board.steps().get(target))
            .map(|step| step.id);
        if session.begin_step_drag(StepId(*step_id)) {
            session.drop_step(over);
        }
    }

    for ingredient_id in args.check {
        session.toggle_ingredient_check(recipe_id, IngredientId(ingredient_id));
    }

    for note in &args.notes {
        let (step_id, text) = note
            .split_once(':')
            .ok_or_else(|| anyhow!("note must look like STEP_ID:TEXT, got {note:?}"))?;
        let step_id: i64 = step_id.trim().parse()?;
        session.update_step_notes(recipe_id, StepId(step_id), text.trim());
    }

    for step_id in args.complete {
        session.toggle_step_completed(recipe_id, StepId(step_id));
    }
    log_events(&mut events);

    if let Some(step_id) = args.timer {
        let mut driver = session
            .timer_for_step(StepId(step_id))?
            .ok_or_else(|| anyhow!("recipe {} has no step {step_id}", args.id))?;
        driver.start().await;
        println!("Timer for step {step_id}");
        loop {
            sleep(session.config().tick).await;
            let snapshot = driver.snapshot().await;
            println!("{}", render::timer_line(&snapshot));
            if snapshot.state == TimerState::Completed {
                break;
            }
        }
        log_events(&mut events);
    }

    if args.commit && session.commit_step_order() {
        println!("Step order saved to the recipe.");
    }

    if let Some(board) = session.board() {
        print!("{}", render::board(board));
        if board.is_celebrating() {
            println!("All steps complete. Enjoy your meal!");
            sleep(settings.celebration()).await;
            session.stop_celebration();
        }
    }
    session.close_recipe();
    Ok(())
}

fn log_events(events: &mut broadcast::Receiver<CookEvent>) {
    while let Ok(event) = events.try_recv() {
        info!(cue = ?event.sound_cue(), "event: {event:?}");
    }
}
