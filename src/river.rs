/// River terrain and the world/screen vertical mapping.
///
/// The river is a pure function of world-Y: the same noise source and the
/// same world-Y always give the same banks, so drawing and collision checks
/// within a tick agree.

use noise::{NoiseFn, Perlin};

/// Scale from world units to noise-space units.
const NOISE_SCALE: f64 = 100.0;
/// Offset that decorrelates the width signal from the center signal.
const WIDTH_OFFSET: f64 = 1000.0;
const MIN_WIDTH: f64 = 100.0;
const WIDTH_RANGE: f64 = 200.0;

// ── Coordinate mapping ────────────────────────────────────────────────────────

pub fn world_y(screen_y: f64, scroll: f64) -> f64 {
    screen_y + scroll
}

pub fn screen_y(world_y: f64, scroll: f64) -> f64 {
    world_y - scroll
}

// ── Noise ─────────────────────────────────────────────────────────────────────

/// Smooth, deterministic 1-D noise.  Implementations return values in [0, 1].
pub trait NoiseSource {
    fn sample(&self, t: f64) -> f64;
}

/// Seeded Perlin noise rescaled to [0, 1].
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, t: f64) -> f64 {
        // Sample off the lattice row so the signal is not pinned at zero.
        let n = self.perlin.get([t, 0.5]);
        ((n + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Noise that never changes: a straight river.  Handy for practice runs and
/// scripted scenarios.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatNoise(pub f64);

impl NoiseSource for FlatNoise {
    fn sample(&self, _t: f64) -> f64 {
        self.0.clamp(0.0, 1.0)
    }
}

// ── River ─────────────────────────────────────────────────────────────────────

/// Banks of the river at one world-Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiverProfile {
    pub center: f64,
    pub width: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Clone, Debug)]
pub struct River<N> {
    noise: N,
    screen_width: f64,
}

impl<N: NoiseSource> River<N> {
    pub fn new(noise: N, screen_width: f64) -> Self {
        Self {
            noise,
            screen_width,
        }
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Center wanders across half the screen around the midline.
    pub fn center_x(&self, world_y: f64) -> f64 {
        let n = self.noise.sample(world_y / NOISE_SCALE);
        self.screen_width / 2.0 + (n - 0.5) * self.screen_width * 0.5
    }

    /// Always within [100, 300].
    pub fn width(&self, world_y: f64) -> f64 {
        let n = self.noise.sample(world_y / NOISE_SCALE + WIDTH_OFFSET);
        MIN_WIDTH + n.clamp(0.0, 1.0) * WIDTH_RANGE
    }

    pub fn left_edge(&self, world_y: f64) -> f64 {
        self.profile(world_y).left
    }

    pub fn right_edge(&self, world_y: f64) -> f64 {
        self.profile(world_y).right
    }

    pub fn profile(&self, world_y: f64) -> RiverProfile {
        let center = self.center_x(world_y);
        let width = self.width(world_y);
        RiverProfile {
            center,
            width,
            left: center - width / 2.0,
            right: center + width / 2.0,
        }
    }

    /// Horizontal range a target may occupy at `world_y`, kept `inset` away
    /// from both banks.
    pub fn inset_bounds(&self, world_y: f64, inset: f64) -> (f64, f64) {
        let p = self.profile(world_y);
        (p.left + inset, p.right - inset)
    }

    /// True when `x` is on the water at `world_y`.  Touching a bank counts as
    /// water.
    pub fn contains(&self, x: f64, world_y: f64) -> bool {
        let p = self.profile(world_y);
        x >= p.left && x <= p.right
    }
}
