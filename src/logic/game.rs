use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::{
    data::{FieldView, GameState},
    error::Result,
    logic::Board,
};

#[derive(Debug)]
pub struct Game {
    board: Board,
    created_at: Instant,
    state: GameState,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            created_at: Instant::now(),
            state: GameState::Active,
        }
    }

    /// Reveals a cell. A bomb or an invalid coordinate loses the game and is
    /// returned as an error. On a finished game the move is still checked and
    /// its error reported, but nothing is disclosed and the state stays put.
    #[instrument(level = "trace", skip(self))]
    pub fn reveal_at(&mut self, row: i32, column: i32) -> Result<()> {
        if self.state.is_terminal() {
            self.board.target(row, column)?;
            debug!("Ignoring reveal on finished game at [{}:{}]", row, column);
            return Ok(());
        }

        if let Err(err) = self.board.reveal(row, column) {
            warn!("Game lost: {}", err);
            self.state = GameState::Lost;
            return Err(err);
        }

        if self.board.all_safe_disclosed() {
            info!("Game won! All safe fields disclosed.");
            self.state = GameState::Won;
        }

        Ok(())
    }

    /// Marks an active game as lost once it is at least `threshold_secs` old.
    pub fn check_expiry(&mut self, threshold_secs: u64) {
        if self.state.is_terminal() {
            return;
        }

        let elapsed = self.created_at.elapsed().as_secs();
        if elapsed >= threshold_secs {
            debug!("Game expired after {}s", elapsed);
            self.state = GameState::Lost;
        }
    }

    pub fn snapshot(&self) -> Vec<Vec<FieldView>> {
        self.board.rows()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    fn test_game() -> Game {
        Game::new(Board::from_layout(include_str!("../../fixtures/test_layout.txt")).unwrap())
    }

    #[test]
    fn test_bomb_loses() {
        let mut game = test_game();
        assert_eq!(
            game.reveal_at(0, 4),
            Err(GameError::BombHit { row: 0, column: 4 })
        );
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn test_negative_coordinates_lose() {
        for (row, column) in [(-1, 3), (1, -3), (-1, -3)] {
            let mut game = test_game();
            assert!(matches!(
                game.reveal_at(row, column),
                Err(GameError::InvalidAction(_))
            ));
            assert_eq!(game.state(), GameState::Lost);
        }

        let mut game = Game::new(Board::empty());
        assert!(game.reveal_at(-1, 0).is_err());
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn test_out_of_range_loses() {
        let mut game = test_game();
        assert!(matches!(
            game.reveal_at(3, 8),
            Err(GameError::InvalidAction(_))
        ));
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn test_safe_reveal_keeps_active() {
        let mut game = test_game();
        assert_eq!(game.reveal_at(0, 3), Ok(()));
        assert_eq!(game.state(), GameState::Active);
        assert!(game.snapshot()[0][3].disclosed);
    }

    #[test]
    fn test_repeat_reveal_is_noop() {
        let mut game = test_game();
        game.reveal_at(2, 3).unwrap();
        let before = game.snapshot();

        assert_eq!(game.reveal_at(2, 3), Ok(()));
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.state(), GameState::Active);
    }

    #[test]
    fn test_terminal_state_is_final() {
        let mut game = test_game();
        assert!(game.reveal_at(0, 4).is_err());

        assert_eq!(game.reveal_at(0, 3), Ok(()));
        assert_eq!(game.state(), GameState::Lost);
        assert!(!game.snapshot()[0][3].disclosed);
    }

    #[test]
    fn test_finished_game_still_reports_bad_moves() {
        let mut game = test_game();
        assert!(game.reveal_at(0, 4).is_err());

        assert_eq!(
            game.reveal_at(0, 4),
            Err(GameError::BombHit { row: 0, column: 4 })
        );
        assert!(matches!(
            game.reveal_at(-1, -1),
            Err(GameError::InvalidAction(_))
        ));
        assert!(matches!(
            game.reveal_at(8, 0),
            Err(GameError::InvalidAction(_))
        ));
        assert_eq!(game.state(), GameState::Lost);
        assert!(game.snapshot().iter().flatten().all(|field| !field.disclosed));
    }

    #[test]
    fn test_won_game_reports_bomb_without_losing() {
        let mut game = Game::new(Board::from_layout("0 1").unwrap());
        game.reveal_at(7, 7).unwrap();
        game.reveal_at(0, 0).unwrap();
        assert_eq!(game.state(), GameState::Won);

        assert_eq!(
            game.reveal_at(0, 1),
            Err(GameError::BombHit { row: 0, column: 1 })
        );
        assert!(matches!(
            game.reveal_at(0, -2),
            Err(GameError::InvalidAction(_))
        ));
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn test_expiry() {
        let mut game = test_game();
        game.check_expiry(600);
        assert_eq!(game.state(), GameState::Active);

        game.check_expiry(0);
        assert_eq!(game.state(), GameState::Lost);
        game.check_expiry(0);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn test_won_game_does_not_expire() {
        let mut game = Game::new(Board::from_layout("0 1").unwrap());
        // The empty region reaches every safe cell except the (0, 0) corner.
        game.reveal_at(7, 7).unwrap();
        assert_eq!(game.state(), GameState::Active);
        assert_eq!(game.board().disclosed_count(), 62);

        game.reveal_at(0, 0).unwrap();
        assert_eq!(game.state(), GameState::Won);

        game.check_expiry(0);
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn test_snapshot_shape() {
        let game = test_game();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.len(), 8);
        assert!(snapshot.iter().all(|row| row.len() == 8));
        assert!(snapshot[0][4].has_bomb);
        assert_eq!(snapshot[0][3].bombs_around, 2);
        assert!(snapshot.iter().flatten().all(|field| !field.disclosed));
    }
}
