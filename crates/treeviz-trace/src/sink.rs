//! Append-only sink capability for step collection.
//!
//! Algorithms are written once against [`StepSink`] and never branch on an
//! instrumentation flag. [`StepRecorder`] keeps every step; [`NoopSink`]
//! drops them, and because steps are built lazily by a closure, an untraced
//! run never formats a message or clones a path.

use crate::step::Step;

/// Capability to append steps to a trace.
pub trait StepSink {
    /// Record one step. `make` is evaluated only by sinks that keep steps.
    fn record<F: FnOnce() -> Step>(&mut self, make: F);
}

/// Sink that keeps every recorded step, in order.
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Consume the recorder, returning the finished flat trace.
    pub fn finish(self) -> Vec<Step> {
        self.steps
    }
}

impl StepSink for StepRecorder {
    fn record<F: FnOnce() -> Step>(&mut self, make: F) {
        self.steps.push(make());
    }
}

/// Sink that drops everything without evaluating it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StepSink for NoopSink {
    fn record<F: FnOnce() -> Step>(&mut self, _make: F) {}
}
