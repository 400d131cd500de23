//! Immutable occupancy snapshots.
//!
//! An [`Occupancy`] records, for every cell of a `width × height` board,
//! whether the cell is blocked. Snapshots are plain values: the board that
//! owns the tiles builds a fresh one for each query and nothing inside a
//! query ever mutates it.

use std::fmt;

use crate::geom::{Point, Range};

/// A rectangular grid of blocked/free flags, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Occupancy {
    bounds: Range,
    cells: Vec<bool>,
}

impl Occupancy {
    /// Create a snapshot with every cell free.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width, height);
        Self {
            cells: vec![false; bounds.len()],
            bounds,
        }
    }

    /// Create a snapshot by asking `blocked` about every cell.
    pub fn from_fn(width: i32, height: i32, mut blocked: impl FnMut(Point) -> bool) -> Self {
        let bounds = Range::sized(width, height);
        let cells = bounds.iter().map(&mut blocked).collect();
        Self { bounds, cells }
    }

    /// Create a snapshot where exactly the listed points are blocked.
    ///
    /// Points outside the board are ignored.
    pub fn with_blocked(width: i32, height: i32, blocked: &[Point]) -> Self {
        let mut occ = Self::new(width, height);
        for &p in blocked {
            occ.set(p, true);
        }
        occ
    }

    /// Parse an ASCII picture of the board.
    ///
    /// `#` and `X` are blocked, `.` and space are free. The first line is
    /// `y = 0` and every line must have the same width. Blank lines around
    /// the picture are ignored.
    pub fn parse(s: &str) -> Result<Self, OccupancyError> {
        let s = s.trim_matches(|c| c == '\n' || c == '\r');
        if s.is_empty() {
            return Ok(Self::default());
        }
        let mut width: Option<usize> = None;
        let mut cells = Vec::new();
        let mut height = 0;
        for (y, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let len = line.chars().count();
            match width {
                None => width = Some(len),
                Some(w) if w != len => {
                    return Err(OccupancyError::InconsistentWidth {
                        line: y,
                        expected: w,
                        found: len,
                    });
                }
                Some(_) => {}
            }
            for (x, ch) in line.chars().enumerate() {
                let blocked = match ch {
                    '#' | 'X' => true,
                    '.' | ' ' => false,
                    _ => {
                        return Err(OccupancyError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                };
                cells.push(blocked);
            }
            height += 1;
        }
        let width = width.unwrap_or(0) as i32;
        Ok(Self {
            bounds: Range::sized(width, height),
            cells,
        })
    }

    /// Width of the board in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the board in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` is a valid board coordinate.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The flag at `p`, or `None` if `p` is outside the board.
    #[inline]
    pub fn at(&self, p: Point) -> Option<bool> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// Whether `p` is blocked. Cells outside the board are never blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.at(p).unwrap_or(false)
    }

    /// Mark `p` as blocked or free. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, blocked: bool) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = blocked;
        }
    }

    /// Number of blocked cells.
    pub fn count_blocked(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Occupancy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            bounds: Range,
            cells: Vec<bool>,
        }
        let Raw { bounds, cells } = Raw::deserialize(deserializer)?;
        if bounds.min != Point::ZERO {
            return Err(serde::de::Error::custom(format!(
                "occupancy bounds must start at {}, found {}",
                Point::ZERO,
                bounds.min
            )));
        }
        if cells.len() != bounds.len() {
            return Err(serde::de::Error::custom(format!(
                "occupancy has {} cells for a {}x{} board",
                cells.len(),
                bounds.width(),
                bounds.height()
            )));
        }
        Ok(Self { bounds, cells })
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                let ch = if self.is_blocked(Point::new(x, y)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing an occupancy picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccupancyError {
    /// A line is wider or narrower than the first one.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#`, `X`, `.` or space was found.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for OccupancyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "occupancy: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "occupancy: invalid character {ch:?} at {pos}")
            }
        }
    }
}

impl std::error::Error for OccupancyError {}

#[cfg(test)]
mod tests {
    use super::*;

    const RING: &str = "
###
#.#
###
";

    #[test]
    fn new_is_all_free() {
        let occ = Occupancy::new(4, 3);
        assert_eq!(occ.width(), 4);
        assert_eq!(occ.height(), 3);
        assert_eq!(occ.count_blocked(), 0);
        assert_eq!(occ.at(Point::new(3, 2)), Some(false));
    }

    #[test]
    fn negative_dimensions_clamp_to_empty() {
        let occ = Occupancy::new(-2, 5);
        assert_eq!(occ.width(), 0);
        assert!(occ.bounds().is_empty());
        assert_eq!(occ.at(Point::new(0, 0)), None);
    }

    #[test]
    fn out_of_bounds_is_never_blocked() {
        let occ = Occupancy::from_fn(2, 2, |_| true);
        assert!(occ.is_blocked(Point::new(1, 1)));
        assert!(!occ.is_blocked(Point::new(2, 1)));
        assert!(!occ.is_blocked(Point::new(-1, 0)));
        assert_eq!(occ.at(Point::new(0, 2)), None);
    }

    #[test]
    fn with_blocked_ignores_outside_points() {
        let occ = Occupancy::with_blocked(3, 3, &[Point::new(1, 0), Point::new(7, 7)]);
        assert_eq!(occ.count_blocked(), 1);
        assert!(occ.is_blocked(Point::new(1, 0)));
    }

    #[test]
    fn parse_ring() {
        let occ = Occupancy::parse(RING).unwrap();
        assert_eq!(occ.bounds(), Range::sized(3, 3));
        assert_eq!(occ.count_blocked(), 8);
        assert!(!occ.is_blocked(Point::new(1, 1)));
        assert_eq!(occ.to_string(), RING.trim());
    }

    #[test]
    fn parse_first_line_is_row_zero() {
        let occ = Occupancy::parse("#..\n...").unwrap();
        assert!(occ.is_blocked(Point::new(0, 0)));
        assert!(!occ.is_blocked(Point::new(0, 1)));
        assert_eq!(occ.height(), 2);
    }

    #[test]
    fn parse_treats_spaces_as_free() {
        let occ = Occupancy::parse("# #\n   ").unwrap();
        assert_eq!(occ.width(), 3);
        assert_eq!(occ.height(), 2);
        assert!(!occ.is_blocked(Point::new(1, 0)));
        assert!(occ.is_blocked(Point::new(2, 0)));
        assert_eq!(occ.count_blocked(), 2);
    }

    #[test]
    fn parse_empty_is_empty() {
        let occ = Occupancy::parse("\n\n").unwrap();
        assert!(occ.bounds().is_empty());
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = Occupancy::parse("...\n..").unwrap_err();
        assert_eq!(
            err,
            OccupancyError::InconsistentWidth {
                line: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_chars() {
        let err = Occupancy::parse("..\n.?").unwrap_err();
        assert_eq!(
            err,
            OccupancyError::InvalidChar {
                ch: '?',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }
}
