//! Finding a playable pair.

use tilelink_core::Point;
use tilelink_paths::can_connect;

use crate::board::Board;

/// The first pair of same-kind tiles that can be matched, if any.
///
/// Pairs are ordered by the first tile in row-major order, then by the
/// second. One occupancy snapshot is shared by every check.
pub fn find_pair(board: &Board) -> Option<(Point, Point)> {
    let occ = board.occupancy();
    let tiles: Vec<_> = board.tiles().collect();
    for (i, &(a, ka)) in tiles.iter().enumerate() {
        for &(b, kb) in &tiles[i + 1..] {
            if ka == kb && can_connect(&occ, a, b) {
                return Some((a, b));
            }
        }
    }
    None
}

/// Whether any pair on the board can still be matched.
pub fn has_moves(board: &Board) -> bool {
    find_pair(board).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn finds_first_pair_in_row_major_order() {
        let b = Board::parse("AB.\n...\nAB.").unwrap();
        assert_eq!(find_pair(&b), Some((p(0, 0), p(0, 2))));
    }

    #[test]
    fn skips_kinds_without_a_path() {
        // The As and Bs box each other in; the Cs are adjacent.
        let b = Board::parse("AB\nBA\nCC").unwrap();
        assert_eq!(find_pair(&b), Some((p(0, 2), p(1, 2))));
    }

    #[test]
    fn deadlocked_board_has_no_moves() {
        let b = Board::parse("AB\nBA").unwrap();
        assert_eq!(find_pair(&b), None);
        assert!(!has_moves(&b));
    }

    #[test]
    fn empty_board_has_no_moves() {
        assert!(!has_moves(&Board::new(4, 4)));
    }

    #[test]
    fn every_hint_can_be_played() {
        let mut b = Board::parse(
            "
ABCA
C..B
CDDC",
        )
        .unwrap();
        while let Some((a, c)) = find_pair(&b) {
            assert!(b.remove_pair(a, c).is_ok());
        }
        assert!(b.is_cleared());
    }
}
