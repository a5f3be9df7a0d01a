use crate::common::{board, sq};
use chessbox::chess::{Board, CastlingRights, Color, FenError, Piece, START_FEN};

#[cfg(test)]
mod fen_parsing_tests {
    use super::*;

    #[test]
    fn test_standard_starting_position_fen() {
        let parsed = Board::from_fen(START_FEN).expect("start position parses");
        assert_eq!(parsed, Board::new());
        assert_eq!(Board::new().to_fen(), START_FEN);

        assert_eq!(parsed.active_color(), Color::White);
        assert_eq!(parsed.castling_rights().bits(), 0b1111);
        assert_eq!(parsed.en_passant_target(), None);
        assert_eq!(parsed.halfmove_clock(), 0);
        assert_eq!(parsed.fullmove_number(), 1);
        assert_eq!(parsed.piece(sq("e1")), Piece::King(Color::White, sq("e1")));
        assert_eq!(parsed.piece(sq("d8")), Piece::Queen(Color::Black, sq("d8")));
        assert_eq!(parsed.piece(sq("e4")), Piece::Empty(sq("e4")));
    }

    #[test]
    fn test_round_trip() {
        let fens = [
            START_FEN,
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/8/8/8/8/8/8/8 b - - 50 100",
            "8/3N1Q1p/1p1K2p1/3PN1B1/3k1r2/n2P1P2/3p3P/8 w - - 0 1",
            "3nQ3/2K5/1rp2P2/6p1/2N3P1/1p4Pb/2k5/b5rR w - - 0 1",
            "8/8/2P2P1P/KpP2rP1/Q1p5/4p2q/2np1P2/4k3 w - - 0 1",
            "2r5/4kr2/8/NPp4B/2pP4/2P2Pp1/4Kpb1/4R3 w - - 0 1",
            "1b2k1r1/3p4/5K2/5BPp/3P1p1R/2Q1P3/1pr4P/8 w - - 0 1",
            "bB6/1RN5/P1p5/n3p2r/4k3/4P1Q1/KPPP4/8 w - - 0 1",
            "r4b2/r5P1/N2P4/1R2KP2/3p1Pp1/5k2/1n4p1/7N w - - 0 1",
            "1N6/3nBp2/1P2pPR1/8/K3k2P/3bP3/2p4P/3B4 w - - 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 7 31",
        ];

        for fen in fens {
            let parsed = Board::from_fen(fen).unwrap_or_else(|e| panic!("{}: {}", fen, e));
            assert_eq!(parsed.to_fen(), fen);
        }
    }

    #[test]
    fn test_castling_letters_any_order() {
        let parsed = board("r3k2r/8/8/8/8/8/8/R3K2R w qkQK - 0 1");
        assert_eq!(parsed.castling_rights(), CastlingRights::new());
        assert_eq!(parsed.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn test_adjacent_digit_runs_are_summed() {
        let parsed = board("44/71/8/8/8/8/8/4K2k w - - 0 1");
        assert!(parsed.piece(sq("e8")).is_empty());
        assert_eq!(parsed.to_fen(), "8/8/8/8/8/8/8/4K2k w - - 0 1");

        let parsed = board("rnbqkbnr/pppppppp/224/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(parsed, Board::new());
    }

    #[test]
    fn test_surrounding_whitespace_accepted() {
        let parsed = board(&format!("  {}\n", START_FEN));
        assert_eq!(parsed.to_fen(), START_FEN);
    }

    #[test]
    fn test_invalid_field_count() {
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"),
            Err(FenError::FieldCount(3))
        );
        assert_eq!(Board::from_fen(""), Err(FenError::FieldCount(0)));
        assert_eq!(
            Board::from_fen(&format!("{} extra", START_FEN)),
            Err(FenError::FieldCount(7))
        );
    }

    #[test]
    fn test_invalid_rank_count() {
        assert_eq!(
            Board::from_fen("8/8/8 w - - 0 1"),
            Err(FenError::RankCount(3))
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::RankCount(9))
        );
    }

    #[test]
    fn test_invalid_rank_width() {
        assert_eq!(
            Board::from_fen("7/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::RankWidth { rank: 8, files: 7 })
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/ppppppppp w - - 0 1"),
            Err(FenError::RankWidth { rank: 1, files: 9 })
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/44p/8/8/8 w - - 0 1"),
            Err(FenError::RankWidth { rank: 4, files: 9 })
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/ w - - 0 1"),
            Err(FenError::RankWidth { rank: 1, files: 0 })
        );
    }

    #[test]
    fn test_invalid_piece_characters() {
        assert_eq!(
            Board::from_fen("x7/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiece('x'))
        );
        assert_eq!(
            Board::from_fen("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiece('9'))
        );
        assert_eq!(
            Board::from_fen("08/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiece('0'))
        );
    }

    #[test]
    fn test_invalid_side_to_move() {
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::InvalidSide("x".to_string()))
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 white - - 0 1"),
            Err(FenError::InvalidSide("white".to_string()))
        );
    }

    #[test]
    fn test_invalid_castling() {
        for castling in ["KX", "K-", "--", "a"] {
            let fen = format!("8/8/8/8/8/8/8/8 w {} - 0 1", castling);
            assert_eq!(
                Board::from_fen(&fen),
                Err(FenError::InvalidCastling(castling.to_string())),
                "castling field '{}'",
                castling
            );
        }
    }

    #[test]
    fn test_invalid_en_passant() {
        for target in ["e4", "z3", "e", "e33", "a1", "h8"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", target);
            assert_eq!(
                Board::from_fen(&fen),
                Err(FenError::InvalidEnPassant(target.to_string())),
                "en passant field '{}'",
                target
            );
        }
    }

    #[test]
    fn test_invalid_clocks() {
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - -1 1"),
            Err(FenError::InvalidHalfmove("-1".to_string()))
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(FenError::InvalidHalfmove("x".to_string()))
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 0"),
            Err(FenError::InvalidFullmove("0".to_string()))
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 -3"),
            Err(FenError::InvalidFullmove("-3".to_string()))
        );
    }

    #[test]
    fn test_failed_load_leaves_board_untouched() {
        let mut target = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 12");
        let before = target.clone();
        let key_before = target.key();

        let result = target.load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0");
        assert_eq!(result, Err(FenError::InvalidFullmove("0".to_string())));
        assert_eq!(target, before);
        assert_eq!(target.key(), key_before);

        target.load_fen(START_FEN).expect("valid FEN loads");
        assert_eq!(target, Board::new());
    }
}
