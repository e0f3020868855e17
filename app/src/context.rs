use rand::prelude::*;

use crate::backend::{AssetProvider, AudioSink, ScoreStore};
use crate::config::Config;

/// Top-level application context handed to every scene call. Holds the
/// configuration and the collaborator implementations; scenes never reach for
/// globals.
pub struct AppCtx {
    pub config: Config,
    pub assets: Box<dyn AssetProvider>,
    pub audio: Box<dyn AudioSink>,
    pub scores: Box<dyn ScoreStore>,
    /// Current window size, updated on resize events.
    pub width: i32,
    pub height: i32,
    /// Frame loop keeps running while this is set.
    pub running: bool,
    /// Wall-clock milliseconds for the current frame.
    pub now_ms: u64,
    seed_rng: SmallRng,
}

impl AppCtx {
    pub fn new(
        config: Config,
        assets: Box<dyn AssetProvider>,
        audio: Box<dyn AudioSink>,
        scores: Box<dyn ScoreStore>,
        seed: u64,
    ) -> Self {
        let width = config.width;
        let height = config.height;
        Self {
            config,
            assets,
            audio,
            scores,
            width,
            height,
            running: true,
            now_ms: 0,
            seed_rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fresh seed for a new board. All randomness flows from the seed the
    /// context was built with, so whole sessions replay deterministically.
    pub fn next_seed(&mut self) -> u64 {
        self.seed_rng.random()
    }
}
