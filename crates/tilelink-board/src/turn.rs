//! Turn resolution: turning player selections into matches.
//!
//! Input arrives as [`TurnMsg`] values and every message produces exactly one
//! [`TurnEvent`] describing what happened, so front ends never call the
//! connectivity checks themselves.

use tilelink_core::Point;
use tilelink_paths::Turns;

use crate::board::{Board, MatchError};

/// Player input for the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnMsg {
    /// The player picked the cell at this position.
    Select(Point),
    /// The player dropped the current selection.
    Cancel,
}

/// Outcome of one [`TurnMsg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// The tile at this position is now selected.
    Selected(Point),
    /// The selection on this position was dropped.
    Deselected(Point),
    /// Both tiles were removed from the board.
    Matched { a: Point, b: Point, turns: Turns },
    /// The pair could not be matched; `b` is now the selection.
    Rejected { a: Point, b: Point, reason: MatchError },
    /// The message had no effect (empty cell, or nothing to cancel).
    Ignored,
}

/// Tracks the pending selection between two player inputs.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    selected: Option<Point>,
}

impl Selector {
    /// Create a selector with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected tile, if any.
    pub fn selected(&self) -> Option<Point> {
        self.selected
    }

    /// Apply one message to `board`.
    pub fn update(&mut self, board: &mut Board, msg: TurnMsg) -> TurnEvent {
        match msg {
            TurnMsg::Select(p) => self.select(board, p),
            TurnMsg::Cancel => match self.selected.take() {
                Some(p) => TurnEvent::Deselected(p),
                None => TurnEvent::Ignored,
            },
        }
    }

    fn select(&mut self, board: &mut Board, p: Point) -> TurnEvent {
        if board.at(p).is_none() {
            return TurnEvent::Ignored;
        }
        let Some(a) = self.selected else {
            self.selected = Some(p);
            return TurnEvent::Selected(p);
        };
        if a == p {
            self.selected = None;
            return TurnEvent::Deselected(p);
        }
        match board.remove_pair(a, p) {
            Ok(turns) => {
                self.selected = None;
                log::debug!("matched {a} and {p} ({turns}), {} left", board.remaining());
                TurnEvent::Matched { a, b: p, turns }
            }
            Err(reason) => {
                self.selected = Some(p);
                log::trace!("rejected {a} and {p}: {reason}");
                TurnEvent::Rejected { a, b: p, reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileKind;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn select_then_match() {
        let mut board = Board::parse("A.A\nB.B").unwrap();
        let mut sel = Selector::new();
        assert_eq!(
            sel.update(&mut board, TurnMsg::Select(p(0, 0))),
            TurnEvent::Selected(p(0, 0))
        );
        assert_eq!(sel.selected(), Some(p(0, 0)));
        assert_eq!(
            sel.update(&mut board, TurnMsg::Select(p(2, 0))),
            TurnEvent::Matched {
                a: p(0, 0),
                b: p(2, 0),
                turns: Turns::Straight
            }
        );
        assert_eq!(sel.selected(), None);
        assert_eq!(board.remaining(), 2);
    }

    #[test]
    fn empty_cells_are_ignored() {
        let mut board = Board::parse("A.A").unwrap();
        let mut sel = Selector::new();
        assert_eq!(
            sel.update(&mut board, TurnMsg::Select(p(1, 0))),
            TurnEvent::Ignored
        );
        assert_eq!(
            sel.update(&mut board, TurnMsg::Select(p(9, 9))),
            TurnEvent::Ignored
        );
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn reselecting_deselects() {
        let mut board = Board::parse("A.A").unwrap();
        let mut sel = Selector::new();
        sel.update(&mut board, TurnMsg::Select(p(0, 0)));
        assert_eq!(
            sel.update(&mut board, TurnMsg::Select(p(0, 0))),
            TurnEvent::Deselected(p(0, 0))
        );
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn rejection_moves_selection_to_second_tile() {
        let mut board = Board::parse("AB.A").unwrap();
        let mut sel = Selector::new();
        sel.update(&mut board, TurnMsg::Select(p(0, 0)));
        assert_eq!(
            sel.update(&mut board, TurnMsg::Select(p(1, 0))),
            TurnEvent::Rejected {
                a: p(0, 0),
                b: p(1, 0),
                reason: MatchError::KindMismatch(TileKind(0), TileKind(1))
            }
        );
        assert_eq!(sel.selected(), Some(p(1, 0)));
        assert_eq!(board.remaining(), 3);
    }

    #[test]
    fn blocked_pair_is_rejected() {
        // Single row: the B sits between the As and nothing can go around it.
        let mut board = Board::parse("ABA").unwrap();
        let mut sel = Selector::new();
        sel.update(&mut board, TurnMsg::Select(p(0, 0)));
        let ev = sel.update(&mut board, TurnMsg::Select(p(2, 0)));
        assert!(matches!(
            ev,
            TurnEvent::Rejected {
                reason: MatchError::NoPath,
                ..
            }
        ));
    }

    #[test]
    fn cancel() {
        let mut board = Board::parse("A.A").unwrap();
        let mut sel = Selector::new();
        assert_eq!(sel.update(&mut board, TurnMsg::Cancel), TurnEvent::Ignored);
        sel.update(&mut board, TurnMsg::Select(p(2, 0)));
        assert_eq!(
            sel.update(&mut board, TurnMsg::Cancel),
            TurnEvent::Deselected(p(2, 0))
        );
        assert_eq!(sel.selected(), None);
    }
}
