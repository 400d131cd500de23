use tilelink_core::{Occupancy, Point, Range};

/// Read-only view of board occupancy used by the connectivity checks.
pub trait Blocker {
    /// The valid coordinates of the board.
    fn bounds(&self) -> Range;

    /// Whether `p` holds content. Must return `false` outside [`bounds`](Self::bounds).
    fn is_blocked(&self, p: Point) -> bool;

    /// Whether a path may turn at or stop on `p`: inside the board and empty.
    #[inline]
    fn is_free(&self, p: Point) -> bool {
        self.bounds().contains(p) && !self.is_blocked(p)
    }
}

impl Blocker for Occupancy {
    #[inline]
    fn bounds(&self) -> Range {
        Occupancy::bounds(self)
    }

    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        Occupancy::is_blocked(self, p)
    }
}

impl<B: Blocker + ?Sized> Blocker for &B {
    #[inline]
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        (**self).is_blocked(p)
    }
}

/// A borrowed row-major slice of blocked flags with explicit dimensions.
///
/// Cells past the end of a short slice count as free.
#[derive(Debug, Clone, Copy)]
pub struct FlagGrid<'a> {
    cells: &'a [bool],
    bounds: Range,
}

impl<'a> FlagGrid<'a> {
    /// Wrap `cells` as a `width × height` board.
    pub fn new(cells: &'a [bool], width: i32, height: i32) -> Self {
        Self {
            cells,
            bounds: Range::sized(width, height),
        }
    }
}

impl Blocker for FlagGrid<'_> {
    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        if !self.bounds.contains(p) {
            return false;
        }
        let i = p.y as usize * self.bounds.width() as usize + p.x as usize;
        self.cells.get(i).copied().unwrap_or(false)
    }
}
