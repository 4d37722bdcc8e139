use std::ops::{Add, Sub};

/// Integer point or size in pixel space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance, widened so far-apart points cannot overflow
    pub fn distance_sq(&self, other: Vec2) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Draw subregion of a pixel buffer, `max` is exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub min: Vec2,
    pub max: Vec2,
}

impl Region {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Whole-buffer region
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// True when this region lies inside a `width` x `height` buffer
    pub fn inside_buffer(&self, width: usize, height: usize) -> bool {
        self.min.x >= 0
            && self.min.y >= 0
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.max.x as i64 <= width as i64
            && self.max.y as i64 <= height as i64
    }
}
