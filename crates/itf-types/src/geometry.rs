use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned box. Whether it is in page or viewport coordinates depends
/// on where it came from; see the call sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Midpoint of the left edge
    pub fn left_center(&self) -> Point {
        Point::new(self.left, self.top + self.height / 2.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }
}

/// Placement of a connector line in viewport coordinates.
///
/// The line starts at `start`, runs `length` pixels and is rotated by
/// `angle` radians clockwise from the positive x axis (screen y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub start: Point,
    pub length: f64,
    pub angle: f64,
}

impl LineGeometry {
    pub fn between(start: Point, end: Point) -> Self {
        Self {
            start,
            length: start.distance_to(end),
            angle: (end.y - start.y).atan2(end.x - start.x),
        }
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    pub fn end(&self) -> Point {
        Point::new(
            self.start.x + self.length * self.angle.cos(),
            self.start.y + self.length * self.angle.sin(),
        )
    }
}
