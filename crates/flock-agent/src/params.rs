//! Immutable per-agent tuning values.

use flock_core::{FlockError, FlockResult, RectXz};

/// Tunables for one agent, fixed at spawn.
///
/// Speeds are units per second, intervals and durations in seconds.  The
/// defaults give a calm grazing herd that scatters convincingly when chased.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentParams {
    // ── Wandering ─────────────────────────────────────────────────────────
    /// Walking speed while wandering.
    pub base_speed: f32,
    /// Seconds between wander heading re-picks.
    pub direction_interval: f32,
    /// Probability that a heading re-pick becomes a grazing pause instead.
    pub pause_chance: f64,
    /// Length of a grazing pause.
    pub pause_secs: f32,

    // ── Presentation ──────────────────────────────────────────────────────
    /// Peak height of the walk bob above ground level.
    pub bob_height: f32,
    /// Walk-bob frequency scale (radians of phase per second at full speed).
    pub bob_speed: f32,
    /// Turning rate toward the current heading, radians per second.
    pub turn_rate: f32,

    // ── Fleeing ───────────────────────────────────────────────────────────
    /// Player distance at which the agent starts fleeing.
    pub flee_radius: f32,
    /// Player distance the agent must regain before it calms down.  Must be
    /// strictly greater than `flee_radius` so the transition has hysteresis.
    pub safe_radius: f32,
    /// Multiplier on `base_speed` while fleeing.
    pub flee_speed_factor: f32,

    // ── Panicking ─────────────────────────────────────────────────────────
    /// How long a panic lasts.
    pub panic_secs: f32,
    /// Multiplier on `base_speed` while panicking.
    pub panic_speed_factor: f32,
    /// Seconds between erratic heading re-picks during a panic.
    pub panic_direction_interval: f32,

    // ── Region geometry (stamped by the builder) ──────────────────────────
    /// Map bounds the agent roams and is clamped into.
    pub bounds: RectXz,
    /// Pen footprint; the roam region once captured.
    pub pen: RectXz,
}

impl AgentParams {
    /// The rectangle this agent is allowed to roam: the whole map normally,
    /// the pen once captured.
    #[inline]
    pub fn roam(&self, captured: bool) -> &RectXz {
        if captured { &self.pen } else { &self.bounds }
    }

    /// Check every invariant the behavior engine relies on.
    pub fn validate(&self) -> FlockResult<()> {
        if !(self.base_speed > 0.0) {
            return Err(FlockError::Config("base_speed must be positive".into()));
        }
        if !(self.direction_interval > 0.0) {
            return Err(FlockError::Config(
                "direction_interval must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.pause_chance) {
            return Err(FlockError::Config("pause_chance must be in [0, 1]".into()));
        }
        if !(self.flee_radius > 0.0) {
            return Err(FlockError::Config("flee_radius must be positive".into()));
        }
        if self.safe_radius <= self.flee_radius {
            return Err(FlockError::Config(
                "safe_radius must exceed flee_radius (flee hysteresis)".into(),
            ));
        }
        if !(self.flee_speed_factor >= 1.0) || !(self.panic_speed_factor >= 1.0) {
            return Err(FlockError::Config(
                "flee and panic speed factors must be at least 1".into(),
            ));
        }
        if !(self.panic_secs > 0.0) || !(self.panic_direction_interval > 0.0) {
            return Err(FlockError::Config(
                "panic timers must be positive".into(),
            ));
        }
        if !self.bounds.is_valid() {
            return Err(FlockError::Config("bounds rectangle is degenerate".into()));
        }
        if !self.pen.is_valid() {
            return Err(FlockError::Config("pen rectangle is degenerate".into()));
        }
        Ok(())
    }
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            base_speed: 1.6,
            direction_interval: 2.5,
            pause_chance: 0.35,
            pause_secs: 1.8,

            bob_height: 0.08,
            bob_speed: 9.0,
            turn_rate: 6.0,

            flee_radius: 5.0,
            safe_radius: 8.0,
            flee_speed_factor: 2.4,

            panic_secs: 3.0,
            panic_speed_factor: 3.0,
            panic_direction_interval: 0.4,

            bounds: RectXz::new(-20.0, -20.0, 20.0, 20.0),
            pen: RectXz::new(11.0, 11.0, 18.0, 18.0),
        }
    }
}
