/// The game controller: sole owner of one run's state.
///
/// Independent `Game` values share nothing, so several can run side by side
/// and tests can script one without touching another.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::entities::{GameState, Input};
use crate::river::{NoiseSource, PerlinNoise, River};
use crate::snapshot::RenderState;

pub struct Game<N = PerlinNoise, R = ChaCha8Rng> {
    config: GameConfig,
    river: River<N>,
    rng: R,
    state: GameState,
}

impl Game {
    /// Perlin river and ChaCha RNG, both seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Self {
        // Perlin takes a 32-bit seed; fold the high half in.
        let noise_seed = (config.seed ^ (config.seed >> 32)) as u32;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_parts(config, PerlinNoise::new(noise_seed), rng)
    }
}

impl<N: NoiseSource, R: Rng> Game<N, R> {
    pub fn with_parts(config: GameConfig, noise: N, rng: R) -> Self {
        let river = River::new(noise, config.screen_width);
        let state = init_state(&config);
        Self {
            config,
            river,
            rng,
            state,
        }
    }

    /// Advance one tick.  After game over this only re-renders.
    pub fn step(&mut self, input: Input) -> RenderState {
        if !self.state.is_over() {
            self.state = tick(&self.state, &input, &self.config, &self.river, &mut self.rng);
        }
        self.render()
    }

    pub fn render(&self) -> RenderState {
        RenderState::capture(&self.state, &self.river, &self.config)
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted setups.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn river(&self) -> &River<N> {
        &self.river
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
