//! Replay cursor over a finished trace.
//!
//! A trace is fully computed before replay begins, so stepping forward and
//! backward, pausing, and resuming are plain index movements over an
//! immutable sequence. Pausing is simply not calling; abandoning mid-sequence
//! is dropping the cursor. Nothing here re-enters the algorithm that produced
//! the steps.

use crate::step::Step;

/// Steppable cursor over an immutable step sequence.
///
/// The cursor sits *between* steps: position `n` means `n` steps have been
/// played and `steps[n]` is pending.
#[derive(Debug, Clone)]
pub struct TraceReplay {
    steps: Vec<Step>,
    cursor: usize,
}

impl TraceReplay {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps already played.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == self.steps.len()
    }

    /// The pending step, if any.
    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    /// Play the pending step and advance past it.
    pub fn step_forward(&mut self) -> Option<&Step> {
        let step = self.steps.get(self.cursor)?;
        self.cursor += 1;
        Some(step)
    }

    /// Un-play the most recently played step, returning it; it becomes
    /// pending again.
    pub fn step_back(&mut self) -> Option<&Step> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.steps[self.cursor])
    }

    /// Jump to an absolute position (clamped to the sequence length).
    /// Returns the position actually reached.
    pub fn seek(&mut self, position: usize) -> usize {
        self.cursor = position.min(self.steps.len());
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Steps already played, in play order.
    pub fn played(&self) -> &[Step] {
        &self.steps[..self.cursor]
    }

    /// Steps not yet played.
    pub fn remaining(&self) -> &[Step] {
        &self.steps[self.cursor..]
    }

    /// Sum of the suggested durations of every step in the trace.
    pub fn total_duration_ms(&self) -> u64 {
        self.steps
            .iter()
            .filter_map(|s| s.suggested_duration_ms)
            .map(u64::from)
            .sum()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}
