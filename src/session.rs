//! A single game: one live board, its move counter and undo history.
//!
//! A session is an explicit value owned by its caller. Every operation runs to
//! completion synchronously and either applies fully or leaves the session
//! untouched.

use serde::Serialize;
use tracing::{debug, info};

use crate::advisor::{self, Hint};
use crate::board;
use crate::capture::capture_enclosed;
use crate::config::GameConfig;
use crate::error::{ConfigError, MoveRejected, UndoError};
use crate::flood::{flood_recolor, infected_size};
use crate::rng::random_seed_label;
use crate::score::ConfigKey;
use crate::types::{Board, Strain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    Playing,
    Won,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub strain: Strain,
    pub moves: u32,
    pub infected: usize,
    /// Cells flipped by enclosure capture.
    pub captured: usize,
    pub state: PlayState,
}

/// State restored by undo.
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    current: Strain,
    moves: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    seed: String,
    board: Board,
    current: Strain,
    moves: u32,
    infected: usize,
    history: Vec<Snapshot>,
    state: PlayState,
}

impl Session {
    /// Start a game. A blank `seed` draws a random label, readable via [`Session::seed`].
    pub fn new(config: GameConfig, seed: Option<&str>) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = match seed.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_owned(),
            _ => random_seed_label(),
        };
        let board = board::generate_from_seed(&config, &seed);
        debug!(
            width = config.width,
            height = config.height,
            strains = config.strains,
            %seed,
            "new session"
        );
        Ok(Self::start(config, seed, board))
    }

    /// Wrap an existing board, checking it against `config`.
    pub fn from_board(config: GameConfig, seed: String, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if (board.width, board.height) != (config.width, config.height)
            || board.len() != config.cell_count()
        {
            return Err(ConfigError::BoardShape {
                width: board.width,
                height: board.height,
                cells: board.len(),
                expected_width: config.width,
                expected_height: config.height,
            });
        }
        if let Some((index, &strain)) =
            board.cells.iter().enumerate().find(|&(_, &c)| c >= config.strains)
        {
            return Err(ConfigError::CellStrain {
                index,
                strain,
                strains: config.strains,
            });
        }
        Ok(Self::start(config, seed, board))
    }

    /// `board` is non-empty, matches `config` and holds only valid strains.
    fn start(config: GameConfig, seed: String, board: Board) -> Self {
        let current = board.cells[0];
        let mut session = Self {
            config,
            seed,
            board,
            current,
            moves: 0,
            infected: 0,
            history: Vec::new(),
            state: PlayState::Playing,
        };
        session.refresh();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The resolved seed label.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn config_key(&self) -> ConfigKey {
        ConfigKey::new(&self.config, self.seed.as_str())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Strain {
        self.current
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn infected(&self) -> usize {
        self.infected
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == PlayState::Won
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Infected share of the grid, rounded half up to a whole percent.
    pub fn infected_percent(&self) -> u8 {
        let total = self.board.len();
        ((200 * self.infected + total) / (2 * total)) as u8
    }

    /// Play `strain`: flood from the origin, capture enclosed pockets, count.
    pub fn apply_move(&mut self, strain: Strain) -> Result<MoveOutcome, MoveRejected> {
        if self.state == PlayState::Won {
            return Err(MoveRejected::AlreadyWon);
        }
        if strain >= self.config.strains {
            return Err(MoveRejected::UnknownStrain {
                strain,
                strains: self.config.strains,
            });
        }
        if strain == self.current {
            return Err(MoveRejected::SameStrain { strain });
        }

        self.history.push(Snapshot {
            board: self.board.clone(),
            current: self.current,
            moves: self.moves,
        });

        flood_recolor(&mut self.board, self.current, strain);
        let captured = capture_enclosed(&mut self.board, strain);
        self.current = strain;
        self.moves += 1;
        self.refresh();

        debug!(strain, moves = self.moves, infected = self.infected, captured, "move applied");
        if self.state == PlayState::Won {
            info!(moves = self.moves, seed = %self.seed, "grid fully infected");
        }

        Ok(MoveOutcome {
            strain,
            moves: self.moves,
            infected: self.infected,
            captured,
            state: self.state,
        })
    }

    /// Play the strain of the cell at `(x, y)`.
    pub fn choose_cell(&mut self, x: usize, y: usize) -> Result<MoveOutcome, MoveRejected> {
        if x >= self.board.width || y >= self.board.height {
            return Err(MoveRejected::OutOfBounds { x, y });
        }
        self.apply_move(self.board.get(x, y))
    }

    /// Restore the state before the last accepted move.
    pub fn undo(&mut self) -> Result<(), UndoError> {
        let snapshot = self.history.pop().ok_or(UndoError::EmptyHistory)?;
        self.board = snapshot.board;
        self.current = snapshot.current;
        self.moves = snapshot.moves;
        self.refresh();
        debug!(moves = self.moves, "move undone");
        Ok(())
    }

    pub fn hint(&self) -> Option<Hint> {
        advisor::suggest_best_move(&self.board, self.current, self.config.strains)
    }

    pub fn suggest_best_move(&self) -> Option<Strain> {
        self.hint().map(|h| h.strain)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            width: self.config.width,
            height: self.config.height,
            strains: self.config.strains,
            seed: self.seed.clone(),
            cells: self.board.cells.clone(),
            current: self.current,
            moves: self.moves,
            infected: self.infected,
            infected_percent: self.infected_percent(),
            state: self.state,
            can_undo: self.can_undo(),
        }
    }

    /// One-line description of the finished puzzle.
    pub fn summary(&self) -> String {
        format!(
            "Moves: {} • Grid: {}×{} • Strains: {} • Seed: {}",
            self.moves, self.config.width, self.config.height, self.config.strains, self.seed
        )
    }

    // Recount from scratch; the cached count is never adjusted incrementally.
    fn refresh(&mut self) {
        self.infected = infected_size(&self.board, self.current);
        self.state = if self.infected == self.board.len() {
            PlayState::Won
        } else {
            PlayState::Playing
        };
    }
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub width: usize,
    pub height: usize,
    pub strains: u8,
    pub seed: String,
    pub cells: Vec<Strain>,
    pub current: Strain,
    pub moves: u32,
    pub infected: usize,
    pub infected_percent: u8,
    pub state: PlayState,
    pub can_undo: bool,
}
