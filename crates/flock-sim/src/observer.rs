//! Simulation observer trait for progress reporting and event collection.

use flock_collision::FrameStats;
use flock_core::{AgentId, EntityId, FrameClock};

/// Callbacks invoked by [`Sim::frame`][crate::Sim::frame] at key points in
/// the frame loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Skipped frames (invalid `dt`) invoke no
/// callbacks at all.
///
/// # Example — capture counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct CaptureCounter { herded: usize }
///
/// impl SimObserver for CaptureCounter {
///     fn on_capture(&mut self, agent: AgentId, _entity: EntityId) {
///         self.herded += 1;
///         println!("{agent} is in the pen ({} so far)", self.herded);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each accepted frame, before any agent moves.
    fn on_frame_start(&mut self, _clock: &FrameClock) {}

    /// Called at the end of each accepted frame with that frame's collision
    /// stats.  The clock still reads the frame the stats belong to; it
    /// advances right after this hook returns.
    fn on_frame_end(&mut self, _clock: &FrameClock, _stats: FrameStats) {}

    /// An agent entered the pen and its capture latch flipped on.
    ///
    /// `entity` is the agent's own entity id.  Fires once per continuous
    /// stay, not once per frame.
    fn on_capture(&mut self, _agent: AgentId, _entity: EntityId) {}

    /// A captured agent left the pen region and was released.
    fn on_release(&mut self, _agent: AgentId, _entity: EntityId) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `frame`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
