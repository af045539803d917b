use std::time::Duration;

use clap::Parser;

use crate::game::SpawnPolicy;

pub const DEFAULT_TICK_MS: u64 = 500;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tetris", version, about = "Falling-block puzzle in the terminal")]
pub struct Config {
    /// Milliseconds between gravity ticks
    #[arg(
        long,
        env = "TETRIS_TICK_MS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Seed for the piece generator (random when omitted)
    #[arg(long, env = "TETRIS_SEED")]
    pub seed: Option<u64>,

    /// Keep playing when a new piece spawns on top of landed cells
    #[arg(long, env = "TETRIS_LEGACY_SPAWN")]
    pub legacy_spawn: bool,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn spawn_policy(&self) -> SpawnPolicy {
        if self.legacy_spawn {
            SpawnPolicy::Ignore
        } else {
            SpawnPolicy::EndGame
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
            legacy_spawn: false,
        }
    }
}
