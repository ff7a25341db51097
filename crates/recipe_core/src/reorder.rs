/// Relocates the item at `source` to `destination`, keeping every other
/// item in relative order. A missing or out-of-range index leaves the
/// sequence unchanged.
pub fn move_item<T: Clone>(items: &[T], source: usize, destination: Option<usize>) -> Vec<T> {
    let mut moved = items.to_vec();
    let Some(destination) = destination else {
        return moved;
    };
    if source >= moved.len() || destination >= moved.len() || source == destination {
        return moved;
    }
    let item = moved.remove(source);
    moved.insert(destination, item);
    moved
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Dropped { source: usize, destination: usize },
    Cancelled { source: usize },
}

/// Pointer or keyboard drag in progress over a list.
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    state: DragState,
}

impl DragGesture {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starting a new drag while one is active replaces the old source.
    pub fn begin(&mut self, source: usize) {
        self.state = DragState::Dragging { source };
    }

    pub fn finish(&mut self, destination: Option<usize>) -> Option<DragOutcome> {
        let DragState::Dragging { source } = std::mem::take(&mut self.state) else {
            return None;
        };
        Some(match destination {
            Some(destination) => DragOutcome::Dropped {
                source,
                destination,
            },
            None => DragOutcome::Cancelled { source },
        })
    }

    pub fn cancel(&mut self) -> Option<DragOutcome> {
        self.finish(None)
    }
}

#[cfg(test)]
#[path = "tests/reorder_tests.rs"]
mod tests;
