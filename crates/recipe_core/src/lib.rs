//! Recipe browsing and cook-mode state engine.

pub mod board;
pub mod celebration;
pub mod driver;
pub mod filter;
pub mod reorder;
pub mod seed;
pub mod session;
pub mod store;
pub mod timer;

pub use board::StepBoard;
pub use driver::TimerDriver;
pub use filter::{compute_filtered_view, FilterCriteria, FilterUpdate};
pub use reorder::move_item;
pub use seed::SeedCatalog;
pub use session::{RecipeSession, SessionConfig};
pub use store::StoreSnapshot;
pub use timer::{format_seconds, StepTimer, TimerSnapshot, TimerState};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
