use chessbox::chess::square::{A1, A8, H1, H8};
use chessbox::chess::{index_to_tile, is_playable, tile_to_index, Square, TileError, BOARD_CELLS, NO_TILE};

#[cfg(test)]
mod tile_conversion_tests {
    use super::*;

    #[test]
    fn test_corner_indices() {
        assert_eq!(tile_to_index("a1").unwrap().index(), 21);
        assert_eq!(tile_to_index("h1").unwrap().index(), 28);
        assert_eq!(tile_to_index("a8").unwrap().index(), 91);
        assert_eq!(tile_to_index("h8").unwrap().index(), 98);
        assert_eq!([A1, H1, A8, H8], [21, 28, 91, 98]);
        assert_eq!(tile_to_index("e4").unwrap().index(), 55);
    }

    #[test]
    fn test_inverse_law_for_all_squares() {
        let mut seen = 0;
        for file in 'a'..='h' {
            for rank in '1'..='8' {
                let name = format!("{}{}", file, rank);
                let square = tile_to_index(&name).expect("valid tile");
                assert_eq!(index_to_tile(square.index()), name);
                assert_eq!(square.to_string(), name);
                seen += 1;
            }
        }
        assert_eq!(seen, 64);
    }

    #[test]
    fn test_malformed_names() {
        for name in ["", "e", "e44", "abc", "a10"] {
            assert_eq!(
                tile_to_index(name),
                Err(TileError::Malformed(name.to_string())),
                "'{}' should be malformed",
                name
            );
        }
    }

    #[test]
    fn test_off_board_names() {
        for name in ["i1", "a9", "a0", "z9", "E4", "44", "ee"] {
            assert_eq!(
                tile_to_index(name),
                Err(TileError::OffBoard(name.to_string())),
                "'{}' should be off board",
                name
            );
        }
    }

    #[test]
    fn test_index_to_tile_outside_window() {
        for index in [0, 10, 20, 29, 30, 39, 99, 100, 119, 120, 500] {
            assert_eq!(index_to_tile(index), NO_TILE, "index {}", index);
        }
    }

    #[test]
    fn test_playable_window() {
        let playable = (0..BOARD_CELLS).filter(|&i| is_playable(i)).count();
        assert_eq!(playable, 64);
        assert!(!is_playable(BOARD_CELLS));
        assert!(Square::new(20).is_none());
        assert!(Square::new(21).is_some());
    }

    #[test]
    fn test_coordinates() {
        let square = tile_to_index("c6").unwrap();
        assert_eq!(square.file(), 2);
        assert_eq!(square.rank(), 5);
        assert_eq!(square.ordinal(), 42);
        assert_eq!(Square::from_coords(2, 5), square);
        assert_eq!(Square::all().count(), 64);
        assert_eq!(Square::all().next().unwrap().to_string(), "a1");
        assert_eq!(Square::all().last().unwrap().to_string(), "h8");
    }
}
