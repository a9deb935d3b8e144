use river_raid::compute::*;
use river_raid::config::GameConfig;
use river_raid::entities::*;
use river_raid::river::{FlatNoise, River};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default tunables with spawning switched off.
fn quiet_config() -> GameConfig {
    GameConfig {
        spawn_probability: 0.0,
        ..GameConfig::default()
    }
}

/// Straight river: banks at x = 100 and x = 300 on every row.
fn flat_river() -> River<FlatNoise> {
    River::new(FlatNoise(0.5), 400.0)
}

fn make_state() -> GameState {
    init_state(&quiet_config())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> Input {
    Input::default()
}

fn target(kind: TargetKind, x: f64, screen_y: f64) -> Target {
    Target {
        kind,
        x,
        screen_y,
        drift: 0.0,
    }
}

fn step(state: &GameState, input: Input, config: &GameConfig) -> GameState {
    tick(state, &input, config, &flat_river(), &mut seeded_rng())
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_plane_position() {
    let s = make_state();
    assert_eq!(s.plane.x, 200.0); // width / 2
    assert_eq!(s.plane.y, 550.0); // height - 50
    assert_eq!(s.plane.speed, 5.0);
}

#[test]
fn init_state_full_tank_and_empty_collections() {
    let s = make_state();
    assert!(s.missiles.is_empty());
    assert!(s.targets.is_empty());
    assert_eq!(s.fuel, 100.0);
    assert_eq!(s.score, 0);
    assert_eq!(s.scroll, 0.0);
    assert_eq!(s.tick_count, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── Steering ──────────────────────────────────────────────────────────────────

#[test]
fn move_left_and_right_by_plane_speed() {
    let s = make_state();
    assert_eq!(move_plane_left(&s).plane.x, 195.0);
    assert_eq!(move_plane_right(&s).plane.x, 205.0);
}

#[test]
fn move_does_not_clamp_to_screen() {
    let mut s = make_state();
    s.plane.x = 2.0;
    assert_eq!(move_plane_left(&s).plane.x, -3.0);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _s2 = move_plane_left(&s);
    let _s3 = move_plane_right(&s);
    assert_eq!(s.plane.x, 200.0);
}

#[test]
fn left_and_right_together_cancel() {
    let s = make_state();
    let both = Input {
        left: true,
        right: true,
        fire: false,
    };
    assert_eq!(steer(&s, &both).plane.x, 200.0);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_missile_at_plane() {
    let mut s = make_state();
    s.tick_count = 11;
    let s2 = fire(&s, &quiet_config());
    assert_eq!(
        s2.missiles,
        vec![Missile {
            x: 200.0,
            screen_y: 550.0
        }]
    );
    assert_eq!(s2.last_shot_tick, 11);
}

#[test]
fn fire_is_rate_limited() {
    let config = quiet_config();
    let mut s = make_state();
    s.tick_count = 0; // 0 - 0 is not past the interval
    assert!(fire(&s, &config).missiles.is_empty());

    s.tick_count = 11;
    let mut s = fire(&s, &config);
    s.tick_count = 21; // exactly shot_interval later
    let s = fire(&s, &config);
    assert_eq!(s.missiles.len(), 1);

    let mut s = s;
    s.tick_count = 22;
    assert_eq!(fire(&s, &config).missiles.len(), 2);
}

#[test]
fn holding_fire_for_two_ticks_yields_one_missile() {
    let config = quiet_config();
    let mut s = make_state();
    s.tick_count = 20;
    let shoot = Input {
        fire: true,
        ..idle()
    };
    let s = step(&s, shoot, &config);
    let s = step(&s, shoot, &config);
    assert_eq!(s.missiles.len(), 1);
}

// ── Missiles ↔ targets ────────────────────────────────────────────────────────

#[test]
fn hit_box_is_strict() {
    let m = Missile {
        x: 100.0,
        screen_y: 50.0,
    };
    assert!(missile_hits(&m, &target(TargetKind::Tanker, 102.0, 55.0), 10.0));
    assert!(!missile_hits(&m, &target(TargetKind::Tanker, 100.0, 60.0), 10.0));
    assert!(!missile_hits(&m, &target(TargetKind::Tanker, 110.0, 50.0), 10.0));
}

#[test]
fn missile_destroys_target_and_scores() {
    let config = quiet_config();
    let mut s = make_state();
    // After moving up 5 the missile sits at (100, 50), the target at (102, 55).
    s.missiles.push(Missile {
        x: 100.0,
        screen_y: 55.0,
    });
    s.targets.push(target(TargetKind::Bridge, 102.0, 55.0));

    let s2 = step(&s, idle(), &config);
    assert!(s2.missiles.is_empty());
    assert!(s2.targets.is_empty());
    assert_eq!(s2.score, 50);
}

#[test]
fn points_follow_target_kind() {
    let config = quiet_config();
    for (kind, points) in [
        (TargetKind::Tanker, 10),
        (TargetKind::Helicopter, 20),
        (TargetKind::FuelDepot, 0),
        (TargetKind::Bridge, 50),
    ] {
        let mut s = make_state();
        s.missiles.push(Missile {
            x: 150.0,
            screen_y: 200.0,
        });
        s.targets.push(target(kind, 150.0, 195.0));
        let s2 = step(&s, idle(), &config);
        assert!(s2.targets.is_empty(), "{kind:?} survived");
        assert_eq!(s2.score, points);
    }
}

#[test]
fn missile_destroys_at_most_one_target() {
    let config = quiet_config();
    let mut s = make_state();
    s.missiles.push(Missile {
        x: 200.0,
        screen_y: 105.0,
    });
    s.targets.push(target(TargetKind::Tanker, 200.0, 100.0));
    s.targets.push(target(TargetKind::Helicopter, 201.0, 100.0));

    let s2 = step(&s, idle(), &config);
    assert!(s2.missiles.is_empty());
    assert_eq!(s2.targets.len(), 1);
    // Newest target is checked first.
    assert_eq!(s2.targets[0].kind, TargetKind::Tanker);
    assert_eq!(s2.score, 20);
}

#[test]
fn second_missile_survives_when_target_already_gone() {
    let config = quiet_config();
    let mut s = make_state();
    s.missiles.push(Missile {
        x: 200.0,
        screen_y: 305.0,
    });
    s.missiles.push(Missile {
        x: 201.0,
        screen_y: 306.0,
    });
    s.targets.push(target(TargetKind::Tanker, 200.0, 300.0));

    let s2 = step(&s, idle(), &config);
    assert_eq!(s2.missiles.len(), 1);
    assert!(s2.targets.is_empty());
    assert_eq!(s2.score, 10);
}

#[test]
fn missile_leaving_top_is_removed() {
    let config = quiet_config();
    let mut s = make_state();
    s.missiles.push(Missile {
        x: 200.0,
        screen_y: 3.0,
    });
    s.missiles.push(Missile {
        x: 200.0,
        screen_y: 5.0,
    });
    let s2 = step(&s, idle(), &config);
    assert_eq!(
        s2.missiles,
        vec![Missile {
            x: 200.0,
            screen_y: 0.0
        }]
    );
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[test]
fn targets_scroll_down_and_leave_bottom() {
    let config = quiet_config();
    let mut s = make_state();
    s.targets.push(target(TargetKind::Bridge, 150.0, 598.0));
    s.targets.push(target(TargetKind::Bridge, 150.0, 599.0));

    let s2 = step(&s, idle(), &config);
    assert_eq!(s2.targets.len(), 1);
    assert_eq!(s2.targets[0].screen_y, 600.0);
}

#[test]
fn drifting_target_is_clamped_inside_banks() {
    let config = quiet_config();
    let mut s = make_state();
    s.targets.push(Target {
        kind: TargetKind::Tanker,
        x: 289.0,
        screen_y: 100.0,
        drift: 2.0,
    });
    s.targets.push(Target {
        kind: TargetKind::Helicopter,
        x: 150.0,
        screen_y: 100.0,
        drift: -1.5,
    });

    let s2 = step(&s, idle(), &config);
    assert_eq!(s2.targets[0].x, 290.0); // right bank 300, inset 10
    assert_eq!(s2.targets[1].x, 148.5);
}

#[test]
fn spawned_target_lies_inside_river() {
    let config = GameConfig {
        spawn_probability: 1.0,
        ..quiet_config()
    };
    let river = flat_river();
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..50 {
        let before = s.targets.len();
        s = tick(&s, &idle(), &config, &river, &mut rng);
        assert_eq!(s.targets.len(), before + 1);
        let t = s.targets.last().copied().unwrap();
        assert_eq!(t.screen_y, -18.0); // spawn row, then one scroll step
        assert!((110.0..=290.0).contains(&t.x), "x = {}", t.x);
        if t.kind.drifts() {
            assert!((-2.0..=2.0).contains(&t.drift));
        } else {
            assert_eq!(t.drift, 0.0);
        }
    }
}

#[test]
fn spawning_draws_every_kind() {
    let config = GameConfig {
        spawn_probability: 1.0,
        ..quiet_config()
    };
    let river = flat_river();
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..200 {
        s = tick(&s, &idle(), &config, &river, &mut rng);
    }
    for kind in TargetKind::ALL {
        assert!(s.targets.iter().any(|t| t.kind == kind), "no {kind:?}");
    }
}

// ── Fuel ──────────────────────────────────────────────────────────────────────

#[test]
fn fuel_decreases_each_tick() {
    let config = quiet_config();
    let s = make_state();
    let s2 = step(&s, idle(), &config);
    assert!((s.fuel - s2.fuel - 0.01).abs() < 1e-9);
}

#[test]
fn refuel_is_capped() {
    let config = GameConfig {
        fuel_decrease_rate: 0.0,
        ..quiet_config()
    };
    let mut s = make_state();
    s.fuel = 60.0;
    // Depot lands exactly on the plane after scrolling down 2.
    s.targets.push(target(TargetKind::FuelDepot, 200.0, 548.0));

    let s2 = step(&s, idle(), &config);
    assert_eq!(s2.fuel, 100.0);
    assert_eq!(s2.targets.len(), 1);
}

#[test]
fn refuel_then_decay_stays_below_max() {
    let config = quiet_config();
    let mut s = make_state();
    s.fuel = 30.0;
    s.targets.push(target(TargetKind::FuelDepot, 205.0, 545.0));

    let s2 = step(&s, idle(), &config);
    assert!((s2.fuel - 79.99).abs() < 1e-9);
}

#[test]
fn only_depots_refuel() {
    let config = quiet_config();
    let mut s = make_state();
    s.fuel = 50.0;
    s.targets.push(target(TargetKind::Tanker, 200.0, 548.0));
    let s2 = step(&s, idle(), &config);
    assert!(s2.fuel < 50.0);
}

#[test]
fn empty_tank_ends_game() {
    let config = quiet_config();
    let mut s = make_state();
    s.fuel = 0.005;
    s.tick_count = 77;

    let s2 = step(&s, idle(), &config);
    assert_eq!(s2.status, GameStatus::GameOver(GameOverCause::OutOfFuel));
    assert_eq!(s2.fuel, 0.0);
    assert_eq!(s2.tick_count, 77);
}

// ── Riverbanks ────────────────────────────────────────────────────────────────

#[test]
fn plane_left_of_bank_crashes() {
    let config = quiet_config();
    let mut s = make_state();
    s.plane.x = 99.0; // left edge - 1
    let s2 = step(&s, idle(), &config);
    assert_eq!(s2.status, GameStatus::GameOver(GameOverCause::BankCollision));
    // Nothing after the collision check runs.
    assert_eq!(s2.fuel, 100.0);
    assert_eq!(s2.tick_count, 0);
}

#[test]
fn steering_into_bank_crashes() {
    let config = quiet_config();
    let mut s = make_state();
    s.plane.x = 297.0;
    let right = Input {
        right: true,
        ..idle()
    };
    let s2 = step(&s, right, &config);
    assert_eq!(s2.plane.x, 302.0);
    assert!(s2.is_over());
}

#[test]
fn plane_on_bank_line_survives() {
    let config = quiet_config();
    let mut s = make_state();
    s.plane.x = 100.0;
    assert!(!step(&s, idle(), &config).is_over());
}

#[test]
fn finished_game_is_frozen() {
    let config = quiet_config();
    let mut s = make_state();
    s.status = GameStatus::GameOver(GameOverCause::OutOfFuel);
    let s2 = step(&s, idle(), &config);
    assert_eq!(s2, s);
}

// ── Whole-run properties ──────────────────────────────────────────────────────

#[test]
fn long_run_keeps_invariants() {
    let config = GameConfig {
        spawn_probability: 0.2,
        ..quiet_config()
    };
    let river = flat_river();
    let mut rng = seeded_rng();
    let mut s = make_state();
    let shoot = Input {
        fire: true,
        ..idle()
    };

    for _ in 0..3_000 {
        let next = tick(&s, &shoot, &config, &river, &mut rng);
        assert!(next.score >= s.score);
        assert_eq!((next.score - s.score) % 10, 0);
        assert!(next.fuel <= 100.0 && next.fuel >= 0.0);
        assert!(next.missiles.iter().all(|m| m.screen_y >= 0.0));
        assert!(next.targets.iter().all(|t| t.screen_y <= 600.0));
        assert!(next
            .targets
            .iter()
            .filter(|t| t.drift != 0.0)
            .all(|t| (110.0..=290.0).contains(&t.x)));
        assert_eq!(next.scroll, s.scroll - 2.0);
        s = next;
        if s.is_over() {
            break;
        }
    }
    assert!(s.score > 0);
}
