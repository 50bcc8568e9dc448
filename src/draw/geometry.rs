//! Pixel-space coordinates and line segments.

use std::fmt;

/// A pixel-space position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Role of a segment within its stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// First segment of a stroke, opened on pointer-down.
    Begin,
    /// Segment synthesized by the trail animator while the button is held.
    Inter,
}

/// A segment whose end point is not known yet.
///
/// The only way to obtain a [`Segment`] from it is [`OpenSegment::close`], so
/// nothing that reaches the completed history can be missing its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSegment {
    pub begin: Coordinate,
    pub kind: SegmentKind,
}

impl OpenSegment {
    pub fn new(begin: Coordinate, kind: SegmentKind) -> Self {
        Self { begin, kind }
    }

    /// Fixes the end point, producing a finalized segment.
    pub fn close(self, end: Coordinate) -> Segment {
        Segment {
            begin: self.begin,
            end,
            kind: self.kind,
        }
    }
}

/// A finalized line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub begin: Coordinate,
    pub end: Coordinate,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(begin: Coordinate, end: Coordinate, kind: SegmentKind) -> Self {
        Self { begin, end, kind }
    }

    pub fn is_begin(&self) -> bool {
        self.kind == SegmentKind::Begin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_keeps_begin_and_kind() {
        let open = OpenSegment::new(Coordinate::new(3, 4), SegmentKind::Inter);
        let closed = open.close(Coordinate::new(7, 9));

        assert_eq!(closed.begin, Coordinate::new(3, 4));
        assert_eq!(closed.end, Coordinate::new(7, 9));
        assert_eq!(closed.kind, SegmentKind::Inter);
        assert!(!closed.is_begin());
    }

    #[test]
    fn coordinate_from_tuple() {
        assert_eq!(Coordinate::from((-2, 11)), Coordinate::new(-2, 11));
    }
}
