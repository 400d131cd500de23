//! Two-turn connectivity between board cells.
//!
//! Two cells connect when an orthogonal path with at most two turns joins
//! them through empty cells only. The endpoints themselves are the tiles
//! being matched, so their own occupancy is never checked.
//!
//! Three strategies are tried in increasing cost order, each built on the
//! previous one:
//!
//! 1. [`straight_line`]: 0 turns, the cells share a row or column.
//! 2. [`one_turn`]: 1 turn through one of the two L-shape corners.
//! 3. [`two_turn`]: 2 turns; every cell on the four visibility rays of the
//!    start (see [`visible_from`]) is tried as a pivot for [`one_turn`].
//!
//! Cells outside the board never block a straight segment. Turning points
//! and ray cells must lie inside the board.

use std::fmt;

use tilelink_core::{Direction, Point};

use crate::traits::{Blocker, FlagGrid};

/// How many turns the first successful strategy needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turns {
    Straight,
    One,
    Two,
}

impl Turns {
    /// Number of direction changes on the path.
    #[inline]
    pub fn count(self) -> u8 {
        match self {
            Turns::Straight => 0,
            Turns::One => 1,
            Turns::Two => 2,
        }
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turns::Straight => write!(f, "straight"),
            Turns::One => write!(f, "one turn"),
            Turns::Two => write!(f, "two turns"),
        }
    }
}

/// Whether `start` and `end` can be joined by a path of at most two turns.
///
/// Returns `false` when `start == end`. Never fails: any coordinates and
/// any board size are accepted.
#[inline]
pub fn can_connect<B: Blocker + ?Sized>(grid: &B, start: Point, end: Point) -> bool {
    connection(grid, start, end).is_some()
}

/// [`can_connect`] over a row-major slice of blocked flags.
pub fn can_connect_dims(start: Point, end: Point, cells: &[bool], width: i32, height: i32) -> bool {
    can_connect(&FlagGrid::new(cells, width, height), start, end)
}

/// Like [`can_connect`], but reports which strategy succeeded first.
pub fn connection<B: Blocker + ?Sized>(grid: &B, start: Point, end: Point) -> Option<Turns> {
    if start == end {
        return None;
    }
    let turns = if straight_line(grid, start, end) {
        Turns::Straight
    } else if one_turn(grid, start, end) {
        Turns::One
    } else if two_turn(grid, start, end) {
        Turns::Two
    } else {
        return None;
    };
    log::trace!("{start} connects to {end}: {turns}");
    Some(turns)
}

/// 0 turns: `a` and `b` share a row or column and no in-bounds cell strictly
/// between them is blocked.
///
/// Returns `false` when the points share neither a row nor a column.
pub fn straight_line<B: Blocker + ?Sized>(grid: &B, a: Point, b: Point) -> bool {
    let bounds = grid.bounds();
    let blocks = |p: Point| bounds.contains(p) && grid.is_blocked(p);
    if a.y == b.y {
        let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
        !(lo..hi).skip(1).any(|x| blocks(Point::new(x, a.y)))
    } else if a.x == b.x {
        let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
        !(lo..hi).skip(1).any(|y| blocks(Point::new(a.x, y)))
    } else {
        false
    }
}

/// 1 turn: an L-shaped path through `(a.x, b.y)` or `(b.x, a.y)`.
///
/// A corner is usable only if it is inside the board and empty; both legs
/// must then pass [`straight_line`].
pub fn one_turn<B: Blocker + ?Sized>(grid: &B, a: Point, b: Point) -> bool {
    [Point::new(a.x, b.y), Point::new(b.x, a.y)]
        .into_iter()
        .any(|corner| {
            grid.is_free(corner) && straight_line(grid, a, corner) && straight_line(grid, corner, b)
        })
}

/// 2 turns: some cell visible from `start` reaches `end` with [`one_turn`].
pub fn two_turn<B: Blocker + ?Sized>(grid: &B, start: Point, end: Point) -> bool {
    visible_from(grid, start)
        .into_iter()
        .any(|pivot| one_turn(grid, pivot, end))
}

/// The four visibility rays from `p`.
///
/// Walks each direction of [`Direction::ALL`] one cell at a time and
/// collects every in-bounds empty cell, stopping at the first blocked cell
/// or the board edge. Rays are listed in direction order, nearest first.
pub fn visible_from<B: Blocker + ?Sized>(grid: &B, p: Point) -> Vec<Point> {
    let mut out = Vec::new();
    for d in Direction::ALL {
        let mut q = p.checked_step(d);
        while let Some(c) = q.filter(|&c| grid.is_free(c)) {
            out.push(c);
            q = c.checked_step(d);
        }
    }
    out
}
