/// Tunables for a run.  Everything is fixed at construction time; the
/// simulation never reads the environment.

use crate::entities::{Rgb, TargetKind};

/// Points awarded per target kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointTable {
    pub tanker: u32,
    pub helicopter: u32,
    pub fuel_depot: u32,
    pub bridge: u32,
}

impl PointTable {
    pub fn for_kind(&self, kind: TargetKind) -> u32 {
        match kind {
            TargetKind::Tanker => self.tanker,
            TargetKind::Helicopter => self.helicopter,
            TargetKind::FuelDepot => self.fuel_depot,
            TargetKind::Bridge => self.bridge,
        }
    }
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            tanker: 10,
            helicopter: 20,
            fuel_depot: 0, // no reward, depots are for refuelling
            bridge: 50,
        }
    }
}

/// Display colour per target kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTable {
    pub tanker: Rgb,
    pub helicopter: Rgb,
    pub fuel_depot: Rgb,
    pub bridge: Rgb,
}

impl ColorTable {
    pub fn for_kind(&self, kind: TargetKind) -> Rgb {
        match kind {
            TargetKind::Tanker => self.tanker,
            TargetKind::Helicopter => self.helicopter,
            TargetKind::FuelDepot => self.fuel_depot,
            TargetKind::Bridge => self.bridge,
        }
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            tanker: Rgb(255, 0, 0),
            helicopter: Rgb(255, 255, 0),
            fuel_depot: Rgb(0, 128, 0),
            bridge: Rgb(165, 42, 42),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Seed for the default noise field and RNG.
    pub seed: u64,
    pub screen_width: f64,
    pub screen_height: f64,
    /// Distance of the plane's row above the bottom of the screen.
    pub plane_offset: f64,
    pub scroll_speed: f64,
    pub plane_speed: f64,
    pub missile_speed: f64,
    pub max_fuel: f64,
    pub fuel_decrease_rate: f64,
    pub refuel_amount: f64,
    /// Minimum ticks between two shots, exclusive.
    pub shot_interval: u64,
    pub spawn_probability: f64,
    /// Screen row new targets appear on (above the visible area).
    pub spawn_y: f64,
    pub max_drift: f64,
    /// Half-extent of the square used for missile hits and refuelling.
    pub hit_radius: f64,
    /// Gap kept between a target and either riverbank.
    pub bank_inset: f64,
    pub points: PointTable,
    pub colors: ColorTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            screen_width: 400.0,
            screen_height: 600.0,
            plane_offset: 50.0,
            scroll_speed: 2.0,
            plane_speed: 5.0,
            missile_speed: 5.0,
            max_fuel: 100.0,
            fuel_decrease_rate: 0.01,
            refuel_amount: 50.0,
            shot_interval: 10,
            spawn_probability: 0.01,
            spawn_y: -20.0,
            max_drift: 2.0,
            hit_radius: 10.0,
            bank_inset: 10.0,
            points: PointTable::default(),
            colors: ColorTable::default(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("screen must have a positive size, got {width}x{height}")]
    ScreenSize { width: f64, height: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("spawn probability must lie in [0, 1], got {0}")]
    SpawnProbability(f64),
    #[error("max fuel must be positive, got {0}")]
    MaxFuel(f64),
}

impl GameConfig {
    /// The plane's fixed screen row.
    pub fn plane_y(&self) -> f64 {
        self.screen_height - self.plane_offset
    }

    /// Reject values the simulation cannot run with.  The simulation itself
    /// trusts its config; callers validate once before the first tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        let non_negative = [
            ("scroll_speed", self.scroll_speed),
            ("plane_speed", self.plane_speed),
            ("missile_speed", self.missile_speed),
            ("fuel_decrease_rate", self.fuel_decrease_rate),
            ("refuel_amount", self.refuel_amount),
            ("max_drift", self.max_drift),
            ("hit_radius", self.hit_radius),
            ("bank_inset", self.bank_inset),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::SpawnProbability(self.spawn_probability));
        }
        if self.max_fuel <= 0.0 {
            return Err(ConfigError::MaxFuel(self.max_fuel));
        }
        Ok(())
    }
}
