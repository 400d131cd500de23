//! The tile board: which kind of tile sits on which cell.
//!
//! [`Board`] owns the tiles and is the only thing that mutates them. Every
//! connectivity query runs on a fresh [`Occupancy`] snapshot taken from it.

use std::fmt;

use tilelink_core::{Occupancy, Point, Range};
use tilelink_paths::{Turns, connection};

/// The face of a tile. Two tiles match when their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileKind(pub u16);

impl TileKind {
    /// Create a new tile kind.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw kind value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Letter used by [`Board::parse`] and `Display`: `A` for kind 0, and so on.
    /// Kinds past `Z` print as `?`.
    pub fn letter(self) -> char {
        if self.0 < 26 {
            char::from(b'A' + self.0 as u8)
        } else {
            '?'
        }
    }
}

impl From<u16> for TileKind {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// A rectangular board of optional tiles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Board {
    bounds: Range,
    tiles: Vec<Option<TileKind>>,
}

impl Board {
    /// Create an empty board. Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width, height);
        Self {
            tiles: vec![None; bounds.len()],
            bounds,
        }
    }

    /// Create a board by asking `tile` about every cell.
    pub fn from_fn(width: i32, height: i32, tile: impl FnMut(Point) -> Option<TileKind>) -> Self {
        let bounds = Range::sized(width, height);
        Self {
            tiles: bounds.iter().map(tile).collect(),
            bounds,
        }
    }

    /// Parse an ASCII picture: `A`..`Z` are tile kinds 0..25, `.` is empty.
    ///
    /// The first line is `y = 0`. Blank lines around the picture are ignored.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim_matches(|c| c == '\n' || c == '\r');
        if s.is_empty() {
            return Ok(Self::default());
        }
        let mut width: Option<usize> = None;
        let mut tiles = Vec::new();
        let mut height = 0;
        for (y, line) in s.lines().enumerate() {
            let len = line.chars().count();
            match width {
                None => width = Some(len),
                Some(w) if w != len => {
                    return Err(ParseError::InconsistentWidth {
                        line: y,
                        expected: w,
                        found: len,
                    });
                }
                Some(_) => {}
            }
            for (x, ch) in line.chars().enumerate() {
                let tile = match ch {
                    'A'..='Z' => Some(TileKind(ch as u16 - 'A' as u16)),
                    '.' => None,
                    _ => {
                        return Err(ParseError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                };
                tiles.push(tile);
            }
            height += 1;
        }
        Ok(Self {
            bounds: Range::sized(width.unwrap_or(0) as i32, height),
            tiles,
        })
    }

    /// Width of the board in cells.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the board in cells.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The valid coordinates of the board.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The tile at `p`, or `None` if the cell is empty or out of bounds.
    pub fn at(&self, p: Point) -> Option<TileKind> {
        self.idx(p).and_then(|i| self.tiles[i])
    }

    /// Place or clear a tile. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, tile: Option<TileKind>) {
        if let Some(i) = self.idx(p) {
            self.tiles[i] = tile;
        }
    }

    /// Iterate over occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Point, TileKind)> + '_ {
        self.bounds
            .iter()
            .zip(self.tiles.iter())
            .filter_map(|(p, t)| t.map(|k| (p, k)))
    }

    /// Number of tiles still on the board.
    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// Whether every tile has been removed.
    pub fn is_cleared(&self) -> bool {
        self.tiles.iter().all(Option::is_none)
    }

    /// A snapshot of the board where every occupied cell is blocked.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_fn(self.width(), self.height(), |p| self.at(p).is_some())
    }

    /// Check whether the tiles at `a` and `b` can be matched.
    ///
    /// On success, returns how many turns the connecting path needs.
    pub fn can_match(&self, a: Point, b: Point) -> Result<Turns, MatchError> {
        for p in [a, b] {
            if !self.bounds.contains(p) {
                return Err(MatchError::OutOfBounds(p));
            }
        }
        if a == b {
            return Err(MatchError::SameCell(a));
        }
        let ka = self.at(a).ok_or(MatchError::Empty(a))?;
        let kb = self.at(b).ok_or(MatchError::Empty(b))?;
        if ka != kb {
            return Err(MatchError::KindMismatch(ka, kb));
        }
        connection(&self.occupancy(), a, b).ok_or(MatchError::NoPath)
    }

    /// Remove the tiles at `a` and `b` if they can be matched.
    pub fn remove_pair(&mut self, a: Point, b: Point) -> Result<Turns, MatchError> {
        let turns = self.can_match(a, b)?;
        self.set(a, None);
        self.set(b, None);
        Ok(turns)
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Board {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            bounds: Range,
            tiles: Vec<Option<TileKind>>,
        }
        let Raw { bounds, tiles } = Raw::deserialize(deserializer)?;
        if bounds.min != Point::ZERO {
            return Err(serde::de::Error::custom(format!(
                "board bounds must start at {}, found {}",
                Point::ZERO,
                bounds.min
            )));
        }
        if tiles.len() != bounds.len() {
            return Err(serde::de::Error::custom(format!(
                "board has {} cells for a {}x{} board",
                tiles.len(),
                bounds.width(),
                bounds.height()
            )));
        }
        Ok(Self { bounds, tiles })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                let ch = self.at(Point::new(x, y)).map_or('.', TileKind::letter);
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Why two selected tiles could not be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// The coordinate is not on the board.
    OutOfBounds(Point),
    /// Both selections name the same cell.
    SameCell(Point),
    /// There is no tile at the coordinate.
    Empty(Point),
    /// The two tiles show different kinds.
    KindMismatch(TileKind, TileKind),
    /// No path with at most two turns joins the tiles.
    NoPath,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "{p} is outside the board"),
            Self::SameCell(p) => write!(f, "a tile cannot match itself at {p}"),
            Self::Empty(p) => write!(f, "no tile at {p}"),
            Self::KindMismatch(a, b) => {
                write!(f, "tiles differ: {} and {}", a.letter(), b.letter())
            }
            Self::NoPath => write!(f, "no path with at most two turns"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Errors that can occur when parsing a board picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line is wider or narrower than the first one.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `A`..`Z` or `.` was found.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(f, "board: line {line} has width {found}, expected {expected}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "board: invalid character {ch:?} at {pos}")
            }
        }
    }
}

impl std::error::Error for ParseError {}
