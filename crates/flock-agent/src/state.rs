//! Mutable behavior state for one agent.
//!
//! The state machine is encoded as a handful of flags and timers rather than
//! a single enum because several conditions overlap in time: a launched agent
//! keeps its wander heading for when it lands, a fleeing agent keeps its
//! pause timer frozen, and invulnerability ticks down across every mode.
//! [`AgentState::mode`] collapses the flags into the single highest-priority
//! [`Mode`] for observers and displays.

use glam::Vec3;

/// Seconds of collision immunity granted when an agent is thrown.
pub const INVULNERABLE_SECS: f32 = 0.3;

/// Minimum airborne time before a launched agent may land, so a throw from
/// ground level does not terminate on its first frame.
pub const MIN_AIRBORNE_SECS: f32 = 0.2;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Highest-priority condition an agent is currently in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Captured,
    Launched,
    Panicked,
    Fleeing,
    Paused,
    Wandering,
}

impl Mode {
    /// `true` for the modes where the agent is not reacting to a threat.
    #[inline]
    pub fn is_calm(self) -> bool {
        matches!(self, Mode::Captured | Mode::Paused | Mode::Wandering)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Captured => "captured",
            Mode::Launched => "launched",
            Mode::Panicked => "panicked",
            Mode::Fleeing => "fleeing",
            Mode::Paused => "paused",
            Mode::Wandering => "wandering",
        };
        f.write_str(s)
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// Per-agent mutable state.  All timers are in seconds and tick down (or age
/// up) inside the behavior update; transitions that touch several fields at
/// once live here so no caller can leave the flags half-switched.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    // ── Wandering ─────────────────────────────────────────────────────────
    /// Current wander heading (unit, ground plane).  Zero until the first
    /// update picks one.
    pub direction: Vec3,
    /// Seconds since the heading was last picked.
    pub direction_age: f32,
    /// Grazing pause in progress.
    pub paused: bool,
    /// Seconds of pause remaining.
    pub pause_left: f32,

    // ── Fleeing ───────────────────────────────────────────────────────────
    pub fleeing: bool,
    /// Current flee heading (unit, ground plane).
    pub flee_dir: Vec3,
    /// Seconds since the flee heading was last refreshed.
    pub flee_refresh_age: f32,
    /// Position at the last flee refresh, for stuck detection.
    pub refresh_anchor: Vec3,
    /// Consecutive refreshes with almost no ground covered.
    pub stuck_refreshes: u8,
    /// Seconds before the agent may start fleeing again after calming down.
    pub flee_cooldown: f32,

    // ── Panicking ─────────────────────────────────────────────────────────
    pub panicked: bool,
    /// Seconds of panic remaining.
    pub panic_left: f32,
    /// Seconds since the erratic panic heading was last re-picked.
    pub panic_direction_age: f32,

    // ── Launched ──────────────────────────────────────────────────────────
    pub launched: bool,
    /// Ballistic velocity while launched.
    pub launch_vel: Vec3,
    /// Seconds spent airborne in the current launch.
    pub airborne_secs: f32,
    /// Seconds of collision immunity remaining.
    pub invulnerable_left: f32,
    /// Landing from the current launch triggers a panic.
    pub panic_on_land: bool,

    // ── Ground and presentation ───────────────────────────────────────────
    /// Resting height of the agent's origin above the field.
    pub ground_height: f32,
    /// Walk-bob phase accumulator, radians.
    pub walk_phase: f32,

    // ── Capture ───────────────────────────────────────────────────────────
    /// Inside the pen; roaming is confined there and threats are ignored.
    pub captured: bool,
}

impl AgentState {
    /// Collapse the flags into the single highest-priority mode.
    pub fn mode(&self) -> Mode {
        if self.captured {
            Mode::Captured
        } else if self.launched {
            Mode::Launched
        } else if self.panicked {
            Mode::Panicked
        } else if self.fleeing {
            Mode::Fleeing
        } else if self.paused {
            Mode::Paused
        } else {
            Mode::Wandering
        }
    }

    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.invulnerable_left > 0.0
    }

    /// Throw the agent with ballistic velocity `vel`.
    ///
    /// Overrides every other condition: the walk heading is dropped, timers
    /// for pausing and fleeing are cancelled, a capture is undone (the
    /// landing may re-capture), and the agent is immune to collisions for
    /// [`INVULNERABLE_SECS`].
    pub fn launch(&mut self, vel: Vec3) {
        self.launched = true;
        self.launch_vel = vel;
        self.airborne_secs = 0.0;
        self.invulnerable_left = INVULNERABLE_SECS;
        self.panic_on_land = true;
        self.direction = Vec3::ZERO;
        self.paused = false;
        self.pause_left = 0.0;
        self.fleeing = false;
        self.panicked = false;
        self.captured = false;
    }

    /// End the current launch.  The caller decides what happens next via
    /// `panic_on_land`, which stays set until a panic actually starts.
    pub fn land(&mut self) {
        self.launched = false;
        self.launch_vel = Vec3::ZERO;
        self.airborne_secs = 0.0;
    }

    /// Start a panic lasting `secs`.  The heading age is saturated so the
    /// next behavior update picks a fresh erratic heading immediately.
    pub fn enter_panic(&mut self, secs: f32) {
        self.panicked = true;
        self.panic_left = secs;
        self.panic_direction_age = f32::MAX;
        self.fleeing = false;
        self.paused = false;
        self.pause_left = 0.0;
        self.panic_on_land = false;
    }

    /// Mark the agent captured.  Returns `false` if it already was, so the
    /// capture event fires once per continuous stay in the pen.
    pub fn capture(&mut self) -> bool {
        if self.captured {
            return false;
        }
        self.captured = true;
        self.launched = false;
        self.launch_vel = Vec3::ZERO;
        self.panicked = false;
        self.fleeing = false;
        self.paused = false;
        self.pause_left = 0.0;
        self.panic_on_land = false;
        true
    }

    /// Undo a capture; the next stay in the pen fires a fresh capture event.
    pub fn release(&mut self) {
        self.captured = false;
    }
}
