use std::{sync::Arc, time::Duration};

use shared::{
    domain::{RecipeId, StepId},
    protocol::CookEvent,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::timer::{StepTimer, TickOutcome, TimerSnapshot};

struct TickState {
    timer: StepTimer,
    // Bumped on every start, pause and reset. A ticker only applies ticks
    // while the generation it was spawned with is still current.
    generation: u64,
}

/// Runs a [`StepTimer`] against the tokio clock.
///
/// Pausing, resetting or dropping the driver aborts the tick task.
pub struct TimerDriver {
    recipe_id: RecipeId,
    step_id: StepId,
    tick: Duration,
    state: Arc<Mutex<TickState>>,
    task: Option<JoinHandle<()>>,
    events: broadcast::Sender<CookEvent>,
}

impl TimerDriver {
    pub fn new(
        recipe_id: RecipeId,
        step_id: StepId,
        timer: StepTimer,
        tick: Duration,
        events: broadcast::Sender<CookEvent>,
    ) -> Self {
        Self {
            recipe_id,
            step_id,
            tick,
            state: Arc::new(Mutex::new(TickState {
                timer,
                generation: 0,
            })),
            task: None,
            events,
        }
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    pub fn step_id(&self) -> StepId {
        self.step_id
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        self.state.lock().await.timer.snapshot()
    }

    pub async fn start(&mut self) -> bool {
        let generation = {
            let mut state = self.state.lock().await;
            if !state.timer.start() {
                return false;
            }
            state.generation += 1;
            state.generation
        };
        self.abort_task();
        self.task = Some(self.spawn_ticker(generation));
        debug!(
            recipe_id = self.recipe_id.0,
            step_id = self.step_id.0,
            generation,
            "timer: started"
        );
        true
    }

    pub async fn pause(&mut self) -> bool {
        let paused = {
            let mut state = self.state.lock().await;
            let paused = state.timer.pause();
            if paused {
                state.generation += 1;
            }
            paused
        };
        if paused {
            self.abort_task();
        }
        paused
    }

    pub async fn reset(&mut self) {
        {
            let mut state = self.state.lock().await;
            state.timer.reset();
            state.generation += 1;
        }
        self.abort_task();
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn spawn_ticker(&self, generation: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let tick = self.tick;
        let recipe_id = self.recipe_id;
        let step_id = self.step_id;

        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + tick, tick);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let outcome = {
                    let mut state = state.lock().await;
                    if state.generation != generation {
                        debug!(
                            recipe_id = recipe_id.0,
                            step_id = step_id.0,
                            generation,
                            "timer: superseded ticker stopping"
                        );
                        return;
                    }
                    state.timer.tick()
                };
                match outcome {
                    TickOutcome::Counting { .. } => {}
                    TickOutcome::Completed => {
                        info!(
                            recipe_id = recipe_id.0,
                            step_id = step_id.0,
                            "timer: countdown complete"
                        );
                        let _ = events.send(CookEvent::TimerCompleted { recipe_id, step_id });
                        return;
                    }
                    TickOutcome::Ignored => return,
                }
            }
        })
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.abort_task();
    }
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
