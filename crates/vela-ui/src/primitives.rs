use glam::Vec2;

/// Axis-aligned rectangle defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Shrink this rectangle by an inset on each side.
    ///
    /// The result never inverts: a rectangle smaller than the inset collapses
    /// to zero size at the inset origin.
    pub fn shrink(&self, inset: Inset) -> Rect {
        let min = self.min + Vec2::new(inset.left, inset.top);
        let max = Vec2::new(
            (self.max.x - inset.right).max(min.x),
            (self.max.y - inset.bottom).max(min.y),
        );
        Rect { min, max }
    }
}

/// Four-sided inset in pixels, used for margins and padding
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Inset {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Inset {
    /// Create an inset from individual left, right, top, bottom values
    pub const fn lrtb(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Create an inset with all sides equal
    pub const fn all(value: f32) -> Self {
        Self::lrtb(value, value, value, value)
    }

    /// Create a zero inset
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Create an inset with symmetric horizontal and vertical values
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::lrtb(horizontal, horizontal, vertical, vertical)
    }

    /// Combined left + right extent
    pub const fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top + bottom extent
    pub const fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}
