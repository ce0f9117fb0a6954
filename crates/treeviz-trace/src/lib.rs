//! Step-trace protocol for instrumented tree algorithms.
//!
//! A tree engine that mutates its structure can, on request, describe every
//! comparison, rotation, recolor, and structural update it performs as a flat,
//! ordered sequence of [`Step`] records. The sequence is fully computed before
//! anyone looks at it, so a consumer can step through it forward or backward,
//! pause, or abandon it at any index without ever re-entering the algorithm.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`step`] | [`Step`], [`StepKind`], [`RotationKind`] — the record types |
//! | [`sink`] | [`StepSink`] capability, [`StepRecorder`], [`NoopSink`] |
//! | [`replay`] | [`TraceReplay`] — index cursor over a finished trace |

pub mod replay;
pub mod sink;
pub mod step;

pub use replay::TraceReplay;
pub use sink::{NoopSink, StepRecorder, StepSink};
pub use step::{RotationKind, Step, StepKind};
