#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in screen space (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) / 2.0, y: (self.y + other.y) / 2.0 }
    }
}

/// Measured extent of a piece of text or a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `size` whose top-left corner sits at `origin`.
    #[must_use]
    pub fn at(origin: Point, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Grow the rectangle by `dx` on the left and right and `dy` on the top and bottom.
    #[must_use]
    pub fn inflate(&self, dx: f64, dy: f64) -> Rect {
        Rect { x: self.x - dx, y: self.y - dy, width: self.width + dx * 2.0, height: self.height + dy * 2.0 }
    }

    /// Half-open containment: the left and top edges are inside, the right and bottom edges are not.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x < self.right() && pt.y >= self.y && pt.y < self.bottom()
    }

    /// Strict intersection. Rectangles that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}
