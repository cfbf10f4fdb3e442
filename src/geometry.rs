// src/geometry.rs
//
// Plain 2D primitives for the crossing tests. A tracked person's bounding
// box is reduced to its diagonal(s) and tested against a calibrated
// reference line; a box "sweeps across" a line when a diagonal intersects
// it. Segment touching (shared endpoint, T-contact) counts as intersecting.

/// A point in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line segment in frame coordinates. Reference lines are built once from
/// calibration and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Orientation of the ordered triple (a, b, c) via the cross product sign.
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Is c within the axis-aligned bounding box of segment a-b? Only meaningful
/// when the three points are already known collinear.
fn on_segment(a: Point, b: Point, c: Point) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Standard 2D segment-intersection test. Boundary contact (segments
    /// touching at an endpoint or crossing through one) intersects. A
    /// degenerate zero-length segment intersects only when its point lies
    /// exactly on the other segment.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, p2) = (self.start, self.end);
        let (p3, p4) = (other.start, other.end);

        let d1 = orientation(p3, p4, p1);
        let d2 = orientation(p3, p4, p2);
        let d3 = orientation(p1, p2, p3);
        let d4 = orientation(p1, p2, p4);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        (d1 == 0.0 && on_segment(p3, p4, p1))
            || (d2 == 0.0 && on_segment(p3, p4, p2))
            || (d3 == 0.0 && on_segment(p1, p2, p3))
            || (d4 == 0.0 && on_segment(p1, p2, p4))
    }
}

/// An axis-aligned detection box (x1,y1) top-left, (x2,y2) bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Both diagonals: top-left↔bottom-right, then top-right↔bottom-left.
    pub fn diagonals(&self) -> [Segment; 2] {
        [
            Segment::from_coords(self.x1, self.y1, self.x2, self.y2),
            Segment::from_coords(self.x2, self.y1, self.x1, self.y2),
        ]
    }

    /// Diagonal-proxy sweep test: did this box cross `line`?
    ///
    /// With `both_diagonals` either diagonal hitting the line counts, which
    /// raises recall for people walking along the line's orientation at the
    /// cost of occasional false positives on elongated boxes. With it off,
    /// only the top-left↔bottom-right diagonal is tested.
    pub fn sweeps_across(&self, line: &Segment, both_diagonals: bool) -> bool {
        let [d1, d2] = self.diagonals();
        if both_diagonals {
            d1.intersects(line) || d2.intersects(line)
        } else {
            d1.intersects(line)
        }
    }
}
