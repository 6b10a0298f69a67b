//! Frame-time model.
//!
//! # Design
//!
//! The simulation is frame-driven: a host loop supplies a variable `dt` in
//! seconds every frame, and the whole per-agent update is **skipped** when
//! `dt` falls outside `(0, DT_MAX]`.  Large steps (tab backgrounding, debug
//! pauses) would otherwise blow up the launch/gravity integration, and zero
//! or negative steps would stall timers without moving anything.
//!
//! [`FrameClock`] accumulates elapsed seconds and counts frames; it holds no
//! heap data and is cheap to copy.

use crate::rect::RectXz;

// ── dt guard ──────────────────────────────────────────────────────────────────

/// Largest timestep the simulation will integrate, in seconds.
///
/// Anything above this is treated as a stall (window hidden, breakpoint) and
/// the frame is dropped rather than integrated.
pub const DT_MAX: f32 = 0.1;

/// `true` iff `dt` is a usable timestep: strictly positive, finite, and at
/// most [`DT_MAX`].  NaN fails the first comparison and is rejected.
#[inline]
pub fn dt_valid(dt: f32) -> bool {
    dt > 0.0 && dt <= DT_MAX
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Accumulated simulation time, advanced once per accepted host frame.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Seconds of simulated time since the run started.  `f64` so precision
    /// holds over hours of play (f32 loses milliseconds after ~4.6 h).
    pub now_secs: f64,
    /// Number of frames accepted so far.
    pub frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one accepted frame of `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.now_secs += dt as f64;
        self.frame += 1;
    }
}

impl std::fmt::Display for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{} ({:.3}s)", self.frame, self.now_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically constructed in code by the host application and handed to
/// `SimBuilder`; all geometry lives on the ground plane (X, Z).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Map bounds rectangle.  Agent positions are clamped into this region
    /// every frame; directions bounce inward at its edges.
    pub bounds: RectXz,

    /// Capture-zone (pen) footprint.  Agents whose bounding box overlaps it
    /// near ground height are marked captured.
    pub pen: RectXz,

    /// Timestep used by `Sim::run_frames`, in seconds.  Must itself satisfy
    /// [`dt_valid`].  Default: 1/60.
    pub fixed_dt: f32,
}

impl SimConfig {
    /// A config with the given seed over a symmetric `half_extent` map and a
    /// small pen in the north-east corner.  Demos and tests start here.
    pub fn sized(seed: u64, half_extent: f32) -> Self {
        let e = half_extent;
        Self {
            seed,
            bounds: RectXz::new(-e, -e, e, e),
            pen: RectXz::new(e * 0.55, e * 0.55, e * 0.9, e * 0.9),
            fixed_dt: 1.0 / 60.0,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::sized(0, 20.0)
    }
}
