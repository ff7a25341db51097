/// Edge-triggered latch for the "everything is done" celebration.
///
/// Fires on the transition into the complete condition and only while no
/// celebration is showing. Re-arms once the condition goes false again.
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    was_complete: bool,
    active: bool,
}

impl Celebration {
    pub fn observe(&mut self, complete: bool) -> bool {
        let fire = complete && !self.was_complete && !self.active;
        self.was_complete = complete;
        if fire {
            self.active = true;
        }
        fire
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stop(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
#[path = "tests/celebration_tests.rs"]
mod tests;
