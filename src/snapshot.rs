/// Read-only view of one frame, handed to whatever draws the game.

use crate::config::GameConfig;
use crate::entities::{GameOverCause, GameState, GameStatus, Missile, Plane, Rgb, TargetKind};
use crate::river::{world_y, NoiseSource, River};

/// River banks on one screen row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BankRow {
    pub screen_y: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetView {
    pub kind: TargetKind,
    pub x: f64,
    pub screen_y: f64,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub screen_width: f64,
    pub screen_height: f64,
    /// One entry per screen row, top (row 0) to bottom (row = screen height).
    pub banks: Vec<BankRow>,
    pub plane: Plane,
    pub missiles: Vec<Missile>,
    pub targets: Vec<TargetView>,
    pub fuel: f64,
    pub max_fuel: f64,
    pub score: u32,
    pub tick: u64,
    pub status: GameStatus,
}

impl RenderState {
    pub fn capture<N: NoiseSource>(
        state: &GameState,
        river: &River<N>,
        config: &GameConfig,
    ) -> Self {
        let rows = config.screen_height.max(0.0) as usize;
        let banks = (0..=rows)
            .map(|row| {
                let screen_y = row as f64;
                let profile = river.profile(world_y(screen_y, state.scroll));
                BankRow {
                    screen_y,
                    left: profile.left,
                    right: profile.right,
                }
            })
            .collect();

        let targets = state
            .targets
            .iter()
            .map(|t| TargetView {
                kind: t.kind,
                x: t.x,
                screen_y: t.screen_y,
                color: config.colors.for_kind(t.kind),
            })
            .collect();

        Self {
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            banks,
            plane: state.plane,
            missiles: state.missiles.clone(),
            targets,
            fuel: state.fuel,
            max_fuel: config.max_fuel,
            score: state.score,
            tick: state.tick_count,
            status: state.status,
        }
    }

    pub fn game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    pub fn cause(&self) -> Option<GameOverCause> {
        match self.status {
            GameStatus::GameOver(cause) => Some(cause),
            GameStatus::Playing => None,
        }
    }
}
