//! meadow — smallest example for the flock herd simulation.
//!
//! A shepherd patrols a fenced 40×40 m meadow with 12 sheep and hurls the
//! stray nearest the pen towards it every few seconds.  Sheep flee the
//! patrol, panic after every landing, and latch as captured once they settle
//! inside the pen.  Headless: the run prints capture events and a final herd
//! table instead of rendering.

use std::time::Instant;

use anyhow::Result;

use flock_agent::Mode;
use flock_collision::FrameStats;
use flock_core::{AgentId, EntityId, FrameClock, SimConfig};
use flock_sim::{SimBuilder, SimObserver};
use glam::Vec3;

// ── Constants ─────────────────────────────────────────────────────────────────

const SHEEP_COUNT:      usize = 12;
const SEED:             u64   = 42;
const HALF_EXTENT:      f32   = 20.0;  // meadow spans ±20 m
const SESSION_SECS:     f32   = 90.0;  // simulated session length
const THROW_EVERY_SECS: f32   = 6.0;   // one throw attempt per interval
const PATROL_RADIUS:    f32   = 12.0;
const PATROL_SPEED:     f32   = 3.0;   // shepherd walking speed, m/s

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints pen events as they happen and accumulates session totals.
#[derive(Default)]
struct HerdLog {
    clock:      FrameClock,
    captures:   usize,
    releases:   usize,
    collisions: u32,
}

impl SimObserver for HerdLog {
    fn on_frame_start(&mut self, clock: &FrameClock) {
        self.clock = *clock;
    }

    fn on_frame_end(&mut self, _clock: &FrameClock, stats: FrameStats) {
        self.collisions += stats.collisions;
    }

    fn on_capture(&mut self, agent: AgentId, _entity: EntityId) {
        self.captures += 1;
        println!("  [{}] {agent} penned ({} capture events)", self.clock, self.captures);
    }

    fn on_release(&mut self, agent: AgentId, _entity: EntityId) {
        self.releases += 1;
        println!("  [{}] {agent} slipped back out", self.clock);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== meadow — flock herd simulation ===");
    println!("Sheep: {SHEEP_COUNT}  |  Session: {SESSION_SECS} s  |  Seed: {SEED}");
    println!();

    // 1. Build the world: fenced bounds, NE pen, two boulders, one shepherd.
    let config = SimConfig::sized(SEED, HALF_EXTENT);
    let pen_center = config.pen.center();
    let mut sim = SimBuilder::new(config)
        .scatter_sheep(SHEEP_COUNT)
        .player_at(Vec3::new(0.0, 0.0, -PATROL_RADIUS))
        .scenery_at(Vec3::new(-6.0, 0.0, 4.0), Vec3::new(1.2, 0.8, 1.2))
        .scenery_at(Vec3::new(5.0, 0.0, -7.0), Vec3::new(0.9, 0.6, 0.9))
        .build()?;
    println!(
        "World: {} entities ({} sheep), pen at ({:.1}, {:.1})",
        sim.world.live_count(),
        sim.agents.count,
        pen_center.x,
        pen_center.z,
    );
    println!();

    // 2. Run the session frame by frame, driving the shepherd each frame.
    let dt = sim.config.fixed_dt;
    let frames = (SESSION_SECS / dt) as u64;
    let throw_every = (THROW_EVERY_SECS / dt) as u64;
    let mut log = HerdLog::default();
    let mut throws = 0usize;

    let t0 = Instant::now();
    for frame in 0..frames {
        // shepherd walks a circle around the meadow center
        let theta = (frame as f32 * dt) * (PATROL_SPEED / PATROL_RADIUS);
        sim.set_player_pos(Vec3::new(
            PATROL_RADIUS * theta.cos(),
            0.0,
            PATROL_RADIUS * theta.sin(),
        ))?;

        // periodically hurl the stray nearest the pen towards it
        if frame > 0 && frame % throw_every == 0 {
            if let Some((agent, pos)) = nearest_stray(&sim, pen_center) {
                let to_pen = pen_center - pos;
                let dist = to_pen.length().max(1.0);
                // ~45° lob sized so the arc comes down around the pen
                let dir = to_pen.normalize() + Vec3::Y * 0.5;
                let speed = (30.0 * dist).sqrt().clamp(6.0, 28.0);
                sim.launch(agent, dir, speed)?;
                throws += 1;
                println!("  [{}] {agent} hurled penward from ({:.1}, {:.1})", sim.clock, pos.x, pos.z);
            }
        }

        sim.frame(dt, &mut log);
        if sim.captured_count() == sim.agents.count {
            println!("  [{}] the whole herd is penned", sim.clock);
            break;
        }
    }
    let elapsed = t0.elapsed();
    println!();

    // 3. Session summary.
    println!(
        "Session complete in {:.3} s wall time ({} frames simulated)",
        elapsed.as_secs_f64(),
        sim.clock.frame,
    );
    println!(
        "  throws: {throws}  |  capture events: {}  |  releases: {}  |  collisions: {}",
        log.captures, log.releases, log.collisions,
    );
    println!("  penned at end: {}/{}", sim.captured_count(), sim.agents.count);
    println!();

    // 4. Final herd table.
    println!("{:<10} {:<11} {:<14} {}", "Sheep", "Mode", "Position", "Penned");
    println!("{}", "-".repeat(44));
    for agent in sim.agents.agent_ids() {
        let state = &sim.agents.state[agent.index()];
        let pos = sim.agent_pos(agent).unwrap_or(Vec3::ZERO);
        println!(
            "{:<10} {:<11} ({:>5.1}, {:>5.1}) {}",
            agent.0,
            format!("{}", state.mode()),
            pos.x,
            pos.z,
            if state.captured { "yes" } else { "no" },
        );
    }

    Ok(())
}

/// The free-roaming sheep closest to the pen, with its position.  Captured
/// and airborne sheep are left alone.
fn nearest_stray(sim: &flock_sim::Sim, pen_center: Vec3) -> Option<(AgentId, Vec3)> {
    let mut best: Option<(AgentId, Vec3, f32)> = None;
    for agent in sim.agents.agent_ids() {
        let state = &sim.agents.state[agent.index()];
        if state.captured || state.mode() == Mode::Launched {
            continue;
        }
        let Some(pos) = sim.agent_pos(agent) else { continue };
        let d = (pen_center - pos).length_squared();
        if best.is_none_or(|(_, _, b)| d < b) {
            best = Some((agent, pos, d));
        }
    }
    best.map(|(agent, pos, _)| (agent, pos))
}
