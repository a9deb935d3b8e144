/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Tanker,
    Helicopter,
    FuelDepot,
    Bridge,
}

impl TargetKind {
    /// Every kind, in the order the spawner draws from.
    pub const ALL: [TargetKind; 4] = [
        TargetKind::Tanker,
        TargetKind::Helicopter,
        TargetKind::FuelDepot,
        TargetKind::Bridge,
    ];

    /// Tankers and helicopters wander sideways; depots and bridges stay put.
    pub fn drifts(self) -> bool {
        matches!(self, TargetKind::Tanker | TargetKind::Helicopter)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    /// The plane left the water.
    BankCollision,
    OutOfFuel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver(GameOverCause),
}

/// Plain 8-bit colour handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Controls sampled once per tick.  Left and right held together cancel out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Plane & projectiles ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Horizontal position in screen units.
    pub x: f64,
    /// Fixed screen row; never changes during a run.
    pub y: f64,
    /// Horizontal distance covered per tick while a steer key is held.
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Missile {
    pub x: f64,
    pub screen_y: f64,
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub kind: TargetKind,
    pub x: f64,
    pub screen_y: f64,
    /// Horizontal velocity per tick.  Zero for kinds that do not drift.
    pub drift: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub plane: Plane,
    pub missiles: Vec<Missile>,
    pub targets: Vec<Target>,
    /// World-Y of screen row 0.  Decreases every tick.
    pub scroll: f64,
    /// Remaining fuel, 0 ..= max fuel.
    pub fuel: f64,
    pub score: u32,
    pub last_shot_tick: u64,
    pub tick_count: u64,
    pub status: GameStatus,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }
}
