//! A terminal-based "guess the color" game.
use std::path::PathBuf;
pub mod color;
pub mod game;
pub mod record;
pub mod ui;

#[derive(Debug, Clone, clap::Parser)]
#[clap(version, about)]
pub struct Options {
    /// Starting difficulty (easy: 3 colors, hard: 6 colors).
    #[clap(long, short = 'm', value_enum, default_value_t = game::Difficulty::Hard)]
    pub mode: game::Difficulty,

    /// Seed for the color generator.
    ///
    /// By default, palettes are seeded from OS entropy.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Append every reset and guess to this file as JSON lines.
    #[clap(long)]
    pub record: Option<PathBuf>,

    /// Write log messages to this file.
    ///
    /// The terminal is owned by the game, so nothing is logged unless this is set.
    #[clap(long)]
    pub logfile: Option<PathBuf>,

    #[clap(long, default_value = "info")]
    pub loglevel: simplelog::LevelFilter,
}

impl Options {
    pub fn new_game(&self) -> game::ColorGame {
        use rand::SeedableRng;

        if let Some(seed) = self.seed {
            game::ColorGame::with_rng(self.mode, rand::rngs::StdRng::seed_from_u64(seed))
        } else {
            game::ColorGame::new(self.mode)
        }
    }

    pub fn open_recorder(&self) -> anyhow::Result<Option<record::Recorder>> {
        self.record
            .as_ref()
            .map(record::Recorder::create)
            .transpose()
    }
}
