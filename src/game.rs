//! The engine's front door: the current session plus best-score records.

use serde::Serialize;
use tracing::debug;

use crate::advisor::Hint;
use crate::config::GameConfig;
use crate::error::{ConfigError, MoveRejected, UndoError};
use crate::score::{BestScores, ConfigKey, ScoreStore};
use crate::session::{MoveOutcome, PlayState, Session};
use crate::types::Strain;

/// A move result as the UI sees it: a flat object tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MoveReport {
    Applied {
        strain: Strain,
        moves: u32,
        infected: usize,
        captured: usize,
        state: PlayState,
        /// Best score for this puzzle after the move.
        best: Option<u32>,
    },
    Rejected {
        reason: String,
    },
}

pub struct Game<S> {
    session: Session,
    scores: BestScores<S>,
    /// Seed text as requested, before a blank one is resolved.
    requested_seed: Option<String>,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(config: GameConfig, seed: Option<&str>, store: S) -> Result<Self, ConfigError> {
        Ok(Self {
            session: Session::new(config, seed)?,
            scores: BestScores::new(store),
            requested_seed: seed.map(str::to_owned),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the current session. On error the old session is kept.
    pub fn new_game(&mut self, config: GameConfig, seed: Option<&str>) -> Result<(), ConfigError> {
        self.session = Session::new(config, seed)?;
        self.requested_seed = seed.map(str::to_owned);
        Ok(())
    }

    /// Start over with the last requested configuration and seed text.
    /// On error the old session is kept.
    pub fn play_again(&mut self) -> Result<(), ConfigError> {
        let config = *self.session.config();
        self.session = Session::new(config, self.requested_seed.as_deref()).inspect_err(|err| {
            debug!(%err, "play again failed");
        })?;
        Ok(())
    }

    pub fn apply_move(&mut self, strain: Strain) -> Result<MoveOutcome, MoveRejected> {
        let outcome = self.session.apply_move(strain).inspect_err(|err| {
            debug!(%err, "move rejected");
        })?;
        self.record_win();
        Ok(outcome)
    }

    pub fn choose_cell(&mut self, x: usize, y: usize) -> Result<MoveOutcome, MoveRejected> {
        let outcome = self.session.choose_cell(x, y).inspect_err(|err| {
            debug!(%err, "cell pick rejected");
        })?;
        self.record_win();
        Ok(outcome)
    }

    pub fn undo(&mut self) -> Result<(), UndoError> {
        self.session.undo()
    }

    pub fn hint(&self) -> Option<Hint> {
        let hint = self.session.hint();
        if let Some(h) = hint {
            debug!(strain = h.strain, gain = h.gain, "hint");
        }
        hint
    }

    pub fn suggest_best_move(&self) -> Option<Strain> {
        self.hint().map(|h| h.strain)
    }

    pub fn infected_percent(&self) -> u8 {
        self.session.infected_percent()
    }

    pub fn is_won(&self) -> bool {
        self.session.is_won()
    }

    pub fn best_score(&self, key: &ConfigKey) -> Option<u32> {
        self.scores.get(key)
    }

    /// Returns false if the store refused to forget the record.
    pub fn reset_best_score(&mut self, key: &ConfigKey) -> bool {
        self.scores.reset(key)
    }

    /// Best score for the puzzle being played.
    pub fn current_best(&self) -> Option<u32> {
        self.scores.get(&self.session.config_key())
    }

    /// Summarise a move result together with the current best score.
    pub fn report(&self, result: Result<MoveOutcome, MoveRejected>) -> MoveReport {
        match result {
            Ok(outcome) => MoveReport::Applied {
                strain: outcome.strain,
                moves: outcome.moves,
                infected: outcome.infected,
                captured: outcome.captured,
                state: outcome.state,
                best: self.current_best(),
            },
            Err(rejected) => MoveReport::Rejected {
                reason: rejected.to_string(),
            },
        }
    }

    fn record_win(&mut self) {
        if self.session.is_won() {
            self.scores.record(&self.session.config_key(), self.session.moves());
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::score::MemoryStore;

    /// Play hints until the grid is infected.
    fn solve(game: &mut Game<MemoryStore>) -> u32 {
        while !game.is_won() {
            let strain = game.suggest_best_move().unwrap();
            game.apply_move(strain).unwrap();
        }
        game.session().moves()
    }

    #[test]
    fn test_win_records_best() {
        let mut game = Game::new(GameConfig::square(10, 4), Some("greedy"), MemoryStore::new()).unwrap();
        assert_eq!(game.current_best(), None);
        let moves = solve(&mut game);
        assert_eq!(game.session().state(), PlayState::Won);
        assert_eq!(game.current_best(), Some(moves));
        assert_eq!(game.infected_percent(), 100);
    }

    #[test]
    fn test_best_never_rises() {
        let mut game = Game::new(GameConfig::square(10, 4), Some("greedy"), MemoryStore::new()).unwrap();
        let moves = solve(&mut game);

        // Replay the same puzzle, opening with a different strain.
        game.play_again().unwrap();
        assert_eq!(game.session().moves(), 0);
        let opening = (game.session().current() + 1) % 4;
        game.apply_move(opening).unwrap();
        let again = solve(&mut game);
        assert_eq!(game.current_best(), Some(moves.min(again)));
    }

    #[test]
    fn test_reset_best() {
        let mut game = Game::new(GameConfig::square(6, 3), Some("reset"), MemoryStore::new()).unwrap();
        solve(&mut game);
        let key = game.session().config_key();
        assert!(game.best_score(&key).is_some());
        assert!(game.reset_best_score(&key));
        assert_eq!(game.best_score(&key), None);
    }

    #[test]
    fn test_new_game_keeps_session_on_error() {
        let mut game = Game::new(GameConfig::square(6, 3), Some("keep"), MemoryStore::new()).unwrap();
        let board = game.session().board().clone();
        assert!(game.new_game(GameConfig::square(6, 12), Some("x")).is_err());
        assert_eq!(game.session().board(), &board);

        game.new_game(GameConfig::square(10, 5), Some("next")).unwrap();
        assert_eq!(game.session().config().width, 10);
        assert_eq!(game.session().seed(), "next");
    }

    #[test]
    fn test_rejections_pass_through() {
        let mut game = Game::new(GameConfig::square(6, 3), Some("reject"), MemoryStore::new()).unwrap();
        let current = game.session().current();
        assert_eq!(
            game.apply_move(current),
            Err(MoveRejected::SameStrain { strain: current })
        );
        assert_eq!(game.undo(), Err(UndoError::EmptyHistory));
    }

    #[test]
    fn test_play_again_replays_typed_seed() {
        let mut game = Game::new(GameConfig::new(9, 7, 5), Some("again"), MemoryStore::new()).unwrap();
        let board = game.session().board().clone();
        let opening = (game.session().current() + 1) % 5;
        game.apply_move(opening).unwrap();

        game.play_again().unwrap();
        assert_eq!(game.session().board(), &board);
        assert_eq!(game.session().seed(), "again");
        assert!(!game.session().can_undo());
    }

    #[test]
    fn test_report_is_flat_tagged_object() {
        let mut game = Game::new(GameConfig::square(6, 3), Some("report"), MemoryStore::new()).unwrap();
        let current = game.session().current();

        let rejected = game.apply_move(current);
        let value = serde_json::to_value(game.report(rejected)).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "rejected",
                "reason": format!("strain {current} is already the infected strain"),
            })
        );

        let strain = (current + 1) % 3;
        let outcome = game.apply_move(strain).unwrap();
        let value = serde_json::to_value(game.report(Ok(outcome))).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "applied",
                "strain": strain,
                "moves": 1,
                "infected": outcome.infected,
                "captured": outcome.captured,
                "state": if outcome.state == PlayState::Won { "won" } else { "playing" },
                "best": game.current_best(),
            })
        );
    }

    #[test]
    fn test_report_includes_best_after_win() {
        let mut game = Game::new(GameConfig::square(5, 3), Some("finish"), MemoryStore::new()).unwrap();
        let mut last = None;
        while !game.is_won() {
            let strain = game.suggest_best_move().unwrap();
            last = Some(game.apply_move(strain));
        }
        let report = game.report(last.unwrap());
        let moves = game.session().moves();
        assert!(matches!(
            report,
            MoveReport::Applied { state: PlayState::Won, best: Some(b), moves: m, .. } if b == moves && m == moves
        ));
    }
}
