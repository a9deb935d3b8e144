/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the config, the river and, where needed, an RNG handle)
/// and returns a brand-new `GameState`.  Side effects are limited to the
/// injected RNG and log output.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::entities::{
    GameOverCause, GameState, GameStatus, Input, Missile, Plane, Target, TargetKind,
};
use crate::river::{world_y, NoiseSource, River};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state: plane centred near the bottom, full tank.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        plane: Plane {
            x: config.screen_width / 2.0,
            y: config.plane_y(),
            speed: config.plane_speed,
        },
        missiles: Vec::new(),
        targets: Vec::new(),
        scroll: 0.0,
        fuel: config.max_fuel,
        score: 0,
        last_shot_tick: 0,
        tick_count: 0,
        status: GameStatus::Playing,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Screen edges are not enforced; only the riverbanks matter.
pub fn move_plane_left(state: &GameState) -> GameState {
    GameState {
        plane: Plane {
            x: state.plane.x - state.plane.speed,
            ..state.plane
        },
        ..state.clone()
    }
}

pub fn move_plane_right(state: &GameState) -> GameState {
    GameState {
        plane: Plane {
            x: state.plane.x + state.plane.speed,
            ..state.plane
        },
        ..state.clone()
    }
}

/// Both directions held apply both moves, which cancel.
pub fn steer(state: &GameState, input: &Input) -> GameState {
    let mut next = state.clone();
    if input.left {
        next = move_plane_left(&next);
    }
    if input.right {
        next = move_plane_right(&next);
    }
    next
}

/// Launch a missile from the plane unless the previous shot was fired within
/// `shot_interval` ticks.
pub fn fire(state: &GameState, config: &GameConfig) -> GameState {
    if state.tick_count.saturating_sub(state.last_shot_tick) <= config.shot_interval {
        return state.clone();
    }
    let mut missiles = state.missiles.clone();
    missiles.push(Missile {
        x: state.plane.x,
        screen_y: state.plane.y,
    });
    GameState {
        missiles,
        last_shot_tick: state.tick_count,
        ..state.clone()
    }
}

// ── Collision predicates ─────────────────────────────────────────────────────

pub fn missile_hits(missile: &Missile, target: &Target, radius: f64) -> bool {
    (missile.screen_y - target.screen_y).abs() < radius && (missile.x - target.x).abs() < radius
}

pub fn can_refuel(target: &Target, plane: &Plane, radius: f64) -> bool {
    target.kind == TargetKind::FuelDepot
        && (target.screen_y - plane.y).abs() < radius
        && (target.x - plane.x).abs() < radius
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// A finished game is returned unchanged.
pub fn tick<N: NoiseSource>(
    state: &GameState,
    input: &Input,
    config: &GameConfig,
    river: &River<N>,
    rng: &mut impl Rng,
) -> GameState {
    if state.is_over() {
        return state.clone();
    }

    // ── 1. Scroll ────────────────────────────────────────────────────────────
    let scroll = state.scroll - config.scroll_speed;

    // ── 2. Steer ─────────────────────────────────────────────────────────────
    let mut next = steer(state, input);
    next.scroll = scroll;

    // ── 3. Bank collision ────────────────────────────────────────────────────
    if !river.contains(next.plane.x, world_y(next.plane.y, scroll)) {
        return end_game(next, GameOverCause::BankCollision);
    }

    // ── 4. Missiles ↔ targets ────────────────────────────────────────────────
    let (missiles, mut targets, gained) = resolve_missiles(&next.missiles, &next.targets, config);
    next.missiles = missiles;
    next.score += gained;

    // ── 5. Spawn ─────────────────────────────────────────────────────────────
    if rng.gen::<f64>() < config.spawn_probability {
        targets.push(spawn_target(scroll, config, river, rng));
    }

    // ── 6. Targets ───────────────────────────────────────────────────────────
    let (targets, fuel) = advance_targets(targets, &next.plane, next.fuel, scroll, config, river);
    next.targets = targets;
    next.fuel = fuel;

    // ── 7. Fire ──────────────────────────────────────────────────────────────
    if input.fire {
        next = fire(&next, config);
    }

    // ── 8. Fuel ──────────────────────────────────────────────────────────────
    next.fuel -= config.fuel_decrease_rate;
    if next.fuel <= 0.0 {
        next.fuel = 0.0;
        return end_game(next, GameOverCause::OutOfFuel);
    }

    // ── 9. Clock ─────────────────────────────────────────────────────────────
    next.tick_count += 1;
    next
}

fn end_game(mut state: GameState, cause: GameOverCause) -> GameState {
    state.status = GameStatus::GameOver(cause);
    info!(
        ?cause,
        tick = state.tick_count,
        score = state.score,
        fuel = state.fuel,
        "game over"
    );
    state
}

/// Move every missile up and let each destroy at most one target.  Missiles
/// and targets are checked newest first.  Returns the surviving missiles,
/// the surviving targets and the points earned.
fn resolve_missiles(
    missiles: &[Missile],
    targets: &[Target],
    config: &GameConfig,
) -> (Vec<Missile>, Vec<Target>, u32) {
    let mut targets = targets.to_vec();
    let mut kept: Vec<Missile> = Vec::with_capacity(missiles.len());
    let mut gained = 0;

    for missile in missiles.iter().rev() {
        let moved = Missile {
            screen_y: missile.screen_y - config.missile_speed,
            ..*missile
        };
        if moved.screen_y < 0.0 {
            continue;
        }
        match targets
            .iter()
            .rposition(|t| missile_hits(&moved, t, config.hit_radius))
        {
            Some(i) => {
                let target = targets.remove(i);
                let points = config.points.for_kind(target.kind);
                debug!(kind = ?target.kind, points, "target destroyed");
                gained += points;
            }
            None => kept.push(moved),
        }
    }

    kept.reverse();
    (kept, targets, gained)
}

/// New target just above the screen.  Its bounds come from the river at
/// world-Y = `scroll`, not at the spawn row itself.
fn spawn_target<N: NoiseSource>(
    scroll: f64,
    config: &GameConfig,
    river: &River<N>,
    rng: &mut impl Rng,
) -> Target {
    let kind = TargetKind::ALL[rng.gen_range(0..TargetKind::ALL.len())];
    let (lo, hi) = river.inset_bounds(scroll, config.bank_inset);
    let x = if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        (lo + hi) / 2.0
    };
    let drift = if kind.drifts() {
        rng.gen_range(-config.max_drift..=config.max_drift)
    } else {
        0.0
    };
    debug!(?kind, x, drift, "target spawned");
    Target {
        kind,
        x,
        screen_y: config.spawn_y,
        drift,
    }
}

/// Scroll targets down, apply drift, drop those past the bottom and refuel
/// from any depot under the plane.  Returns the surviving targets and the
/// new fuel level.
fn advance_targets<N: NoiseSource>(
    targets: Vec<Target>,
    plane: &Plane,
    fuel: f64,
    scroll: f64,
    config: &GameConfig,
    river: &River<N>,
) -> (Vec<Target>, f64) {
    let mut fuel = fuel;
    let mut kept = Vec::with_capacity(targets.len());

    for mut target in targets {
        target.screen_y += config.scroll_speed;
        if target.drift != 0.0 {
            let (lo, hi) = river.inset_bounds(world_y(target.screen_y, scroll), config.bank_inset);
            target.x = (target.x + target.drift).max(lo).min(hi);
        }
        if target.screen_y > config.screen_height {
            continue;
        }
        if can_refuel(&target, plane, config.hit_radius) {
            fuel = (fuel + config.refuel_amount).min(config.max_fuel);
            trace!(fuel, "refuelled");
        }
        kept.push(target);
    }

    (kept, fuel)
}
