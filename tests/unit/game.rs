use crate::common::board;
use chessbox::chess::{Board, Color, FenError, GameStatus, MoveError, START_FEN};
use chessbox::game::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use chessbox::{Game, Move, MoveSelector, Player, RandomSelector};

/// Selector that always answers with a fixed move, legal or not.
struct FixedSelector(Move);

impl MoveSelector for FixedSelector {
    fn select(&mut self, _board: &Board, _legal: &[Move], _difficulty: u8) -> Option<Move> {
        Some(self.0)
    }
}

/// Selector that records the difficulty it was asked to play at.
struct RecordingSelector {
    seen: std::rc::Rc<std::cell::Cell<u8>>,
}

impl MoveSelector for RecordingSelector {
    fn select(&mut self, _board: &Board, legal: &[Move], difficulty: u8) -> Option<Move> {
        self.seen.set(difficulty);
        legal.first().copied()
    }
}

fn seeded_game() -> Game {
    Game::with_selector(Board::new(), Box::new(RandomSelector::seeded(11)))
}

#[cfg(test)]
mod setup_tests {
    use super::*;

    #[test]
    fn test_new_game_is_not_initialized() {
        let game = seeded_game();
        assert!(!game.is_initialized());
        assert_eq!(game.player(Color::White), Player::Human);
        assert_eq!(game.board().to_fen(), START_FEN);
    }

    #[test]
    fn test_player_vs_player() {
        let mut game = seeded_game();
        assert!(game.initialize_player_vs_player());
        assert!(game.is_initialized());
        assert!(!game.computer_to_move());
    }

    #[test]
    fn test_player_vs_computer_difficulty_range() {
        let mut game = seeded_game();
        assert!(!game.initialize_player_vs_computer(Color::Black, MIN_DIFFICULTY - 1));
        assert!(!game.initialize_player_vs_computer(Color::Black, MAX_DIFFICULTY + 1));
        assert!(!game.is_initialized());

        assert!(game.initialize_player_vs_computer(Color::Black, MAX_DIFFICULTY));
        assert_eq!(
            game.player(Color::Black),
            Player::Computer { difficulty: 5 }
        );
        assert_eq!(game.player(Color::White), Player::Human);
        assert_eq!(
            game.player(Color::Black).to_string(),
            "Computer (level 5)"
        );
    }

    #[test]
    fn test_restart_returns_to_start() {
        let mut game = seeded_game();
        game.initialize_player_vs_player();
        game.play_move("e2e4").unwrap();

        game.restart();
        assert!(!game.is_initialized());
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.history().count(), 0);
    }
}

#[cfg(test)]
mod play_tests {
    use super::*;

    #[test]
    fn test_play_and_undo() {
        let mut game = seeded_game();
        game.initialize_player_vs_player();

        let mv = game.play_move("e2e4").unwrap();
        assert_eq!(mv.to_string(), "e2e4");
        game.play_move("e7e5").unwrap();
        assert_eq!(
            game.history().map(|mv| mv.to_string()).collect::<Vec<_>>(),
            vec!["e2e4", "e7e5"]
        );

        assert_eq!(game.undo().unwrap().to_string(), "e7e5");
        assert_eq!(game.undo().unwrap().to_string(), "e2e4");
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.undo(), Err(MoveError::NothingToUndo));
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut game = seeded_game();
        game.initialize_player_vs_player();

        assert_eq!(
            game.play_move("e2e5"),
            Err(MoveError::Illegal("e2e5".to_string()))
        );
        assert!(matches!(game.play_move("zz"), Err(MoveError::Format(_))));
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.history().count(), 0);
    }

    #[test]
    fn test_computer_reply_is_legal() {
        let mut game = seeded_game();
        game.initialize_player_vs_computer(Color::Black, 3);
        game.play_move("d2d4").unwrap();

        assert!(game.computer_to_move());
        let before = game.board().clone();
        let reply = game.play_computer_move().expect("computer has a reply");
        assert!(before.legal_moves().contains(&reply));
        assert_eq!(game.board().active_color(), Color::White);
        assert!(!game.computer_to_move());
    }

    #[test]
    fn test_selector_receives_difficulty() {
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let selector = RecordingSelector { seen: seen.clone() };
        let mut game = Game::with_selector(Board::new(), Box::new(selector));
        game.initialize_player_vs_computer(Color::White, 4);

        assert!(game.play_computer_move().is_some());
        assert_eq!(seen.get(), 4);
    }

    #[test]
    fn test_illegal_selector_move_is_refused() {
        let bogus = Move::new("e2".parse().unwrap(), "e5".parse().unwrap());
        let mut game = Game::with_selector(Board::new(), Box::new(FixedSelector(bogus)));
        game.initialize_player_vs_computer(Color::White, 1);

        assert_eq!(game.play_computer_move(), None);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_no_computer_move_for_human_side() {
        let mut game = seeded_game();
        game.initialize_player_vs_computer(Color::Black, 2);
        assert_eq!(game.play_computer_move(), None);
    }

    #[test]
    fn test_finished_game_stops_computer() {
        let mut game = Game::with_selector(
            board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            Box::new(RandomSelector::seeded(5)),
        );
        game.initialize_player_vs_computer(Color::White, 2);

        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert!(!game.computer_to_move());
    }
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_load_fen_replaces_position_and_history() {
        let mut game = seeded_game();
        game.initialize_player_vs_player();
        game.play_move("e2e4").unwrap();

        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1";
        game.load_fen(fen).unwrap();
        assert_eq!(game.board().to_fen(), fen);
        assert_eq!(game.history().count(), 0);
    }

    #[test]
    fn test_bad_fen_keeps_position() {
        let mut game = seeded_game();
        game.initialize_player_vs_player();
        game.play_move("e2e4").unwrap();
        let before = game.board().clone();

        assert_eq!(
            game.load_fen("8/8/8/8/8/8/8/8 w - -"),
            Err(FenError::FieldCount(4))
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.history().count(), 1);
    }
}
