use crate::color::{self, Color};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Number of swatches on the board, regardless of difficulty.
pub const SURFACE_COUNT: usize = 6;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 2] = [Self::Easy, Self::Hard];

    pub fn palette_size(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Hard => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy Mode",
            Self::Hard => "Hard Mode",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Message {
    #[default]
    None,
    Retry,
    Success,
}

impl Message {
    pub fn text(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Retry => "Try Again",
            Self::Success => "Correct!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetLabel {
    #[default]
    NewColors,
    PlayAgain,
}

impl ResetLabel {
    pub fn text(self) -> &'static str {
        match self {
            Self::NewColors => "New Colors",
            Self::PlayAgain => "Play Again?",
        }
    }
}

/// Everything the player can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// `None` means the surface is hidden.
    pub surfaces: [Option<Color>; SURFACE_COUNT],
    pub header: String,
    pub header_accent: Color,
    pub message: Message,
    pub reset_label: ResetLabel,
    pub selected_mode: Difficulty,
}

impl Board {
    fn new(selected_mode: Difficulty) -> Self {
        Self {
            surfaces: [None; SURFACE_COUNT],
            header: String::new(),
            header_accent: color::HEADER_ACCENT,
            message: Message::None,
            reset_label: ResetLabel::NewColors,
            selected_mode,
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.surfaces
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub rounds: u64,
    pub wins: u64,
    pub misses: u64,
}

impl Score {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        [
            ("rounds", self.rounds),
            ("wins", self.wins),
            ("misses", self.misses),
        ]
        .into_iter()
    }
}

/// Input events delivered by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SurfaceClicked(usize),
    ModeClicked(Difficulty),
    ResetClicked,
}

#[derive(Debug)]
pub struct ColorGame<R = StdRng> {
    rng: R,
    difficulty: Difficulty,
    palette: Vec<Color>,
    target: Color,
    board: Board,
    score: Score,
}

impl ColorGame<StdRng> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }
}

impl<R: Rng> ColorGame<R> {
    /// Creates a session and starts its first round.
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        let mut this = Self {
            rng,
            difficulty,
            palette: Vec::new(),
            target: color::HEADER_ACCENT,
            board: Board::new(difficulty),
            score: Score::default(),
        };
        this.reset();
        this
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn state(&self) -> GameState {
        if self.board.message == Message::Success {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    pub fn handle(&mut self, event: Event) -> Option<Outcome> {
        match event {
            Event::SurfaceClicked(i) => self.guess(i),
            Event::ModeClicked(mode) => {
                self.set_difficulty(mode);
                None
            }
            Event::ResetClicked => {
                self.reset();
                None
            }
        }
    }

    pub fn set_difficulty(&mut self, mode: Difficulty) {
        self.difficulty = mode;
        self.board.selected_mode = mode;
        self.reset();
    }

    /// Starts a new round with a fresh palette and target.
    pub fn reset(&mut self) {
        self.palette = Color::random_palette(&mut self.rng, self.difficulty.palette_size());
        let i = self.rng.gen_range(0..self.palette.len());
        self.target = self.palette[i];

        self.board.header = self.target.to_string();
        self.board.header_accent = color::HEADER_ACCENT;
        self.board.message = Message::None;
        self.board.reset_label = ResetLabel::NewColors;
        for (i, surface) in self.board.surfaces.iter_mut().enumerate() {
            *surface = self.palette.get(i).copied();
        }
        self.score.rounds += 1;
        log::debug!(
            "new round: difficulty={}, target={}",
            self.difficulty,
            self.target
        );
    }

    /// Compares the color currently shown on `surface` with the target.
    ///
    /// Returns `None` if the surface is hidden or doesn't exist.
    pub fn guess(&mut self, surface: usize) -> Option<Outcome> {
        let selected = self.board.surfaces.get(surface).copied().flatten()?;
        if selected == self.target {
            if self.state() == GameState::Playing {
                self.score.wins += 1;
                log::info!("won round {} with {}", self.score.rounds, self.target);
            }
            self.board.message = Message::Success;
            self.board.reset_label = ResetLabel::PlayAgain;
            self.board.header_accent = self.target;
            for c in self.board.surfaces.iter_mut().flatten() {
                *c = self.target;
            }
            Some(Outcome::Hit)
        } else {
            log::debug!("miss: surface={surface}, color={selected}");
            self.score.misses += 1;
            self.board.surfaces[surface] = Some(color::MISS);
            self.board.message = Message::Retry;
            Some(Outcome::Miss)
        }
    }
}
