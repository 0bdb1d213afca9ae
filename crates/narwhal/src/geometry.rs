//! Integer points, sizes and rectangles, plus the polar [`Vector`] used for forces.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Integer 2D coordinates. Node origins are top-left, following the drawing-surface convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Truncated Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> i64 {
        calculate_distance(self, other)
    }

    /// Truncated distance from the origin.
    pub fn magnitude(self) -> i64 {
        calculate_distance(Point::ORIGIN, self)
    }

    /// Applies a zoom factor; each component is truncated toward zero.
    pub fn scale(self, factor: f64) -> Point {
        Point {
            x: (self.x as f64 * factor) as i64,
            y: (self.y as f64 * factor) as i64,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The size as an offset from the origin.
    pub fn as_offset(self) -> Point {
        Point::new(i64::from(self.width), i64::from(self.height))
    }
}

/// Axis-aligned bounds. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rectangle {
    pub fn from_ltrb(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            x: left.min(right),
            y: top.min(bottom),
            width: (right - left).abs(),
            height: (bottom - top).abs(),
        }
    }

    /// Smallest rectangle containing every point, or `None` for an empty input.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::from_ltrb(min_x, min_y, max_x, max_y))
    }

    pub fn left(&self) -> i64 {
        self.x
    }

    pub fn top(&self) -> i64 {
        self.y
    }

    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    /// Integer midpoint; odd extents round toward the top-left corner.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// A force or velocity in polar form. `direction` is in degrees from the positive x-axis.
///
/// Magnitudes may be negative: repulsion is expressed as a negative magnitude along the bearing
/// toward the repelling node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub magnitude: f64,
    pub direction: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector {
        magnitude: 0.0,
        direction: 0.0,
    };

    pub const fn new(magnitude: f64, direction: f64) -> Self {
        Self {
            magnitude,
            direction,
        }
    }

    /// Position of `point` relative to the origin. The magnitude is the truncated distance.
    pub fn from_origin(point: Point) -> Self {
        Self {
            magnitude: point.magnitude() as f64,
            direction: bearing_angle(Point::ORIGIN, point),
        }
    }

    pub fn from_cartesian(x: f64, y: f64) -> Self {
        let magnitude = (x * x + y * y).sqrt();
        let direction = if magnitude == 0.0 {
            0.0
        } else {
            y.atan2(x).to_degrees()
        };
        Self {
            magnitude,
            direction,
        }
    }

    pub fn to_cartesian(self) -> (f64, f64) {
        let theta = self.direction.to_radians();
        (self.magnitude * theta.cos(), self.magnitude * theta.sin())
    }

    /// Rounds the Cartesian form to the nearest integer point.
    pub fn to_point(self) -> Point {
        let (x, y) = self.to_cartesian();
        Point::new(x.round() as i64, y.round() as i64)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        let (ax, ay) = self.to_cartesian();
        let (bx, by) = rhs.to_cartesian();
        Vector::from_cartesian(ax + bx, ay + by)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        let (ax, ay) = self.to_cartesian();
        let (bx, by) = rhs.to_cartesian();
        Vector::from_cartesian(ax - bx, ay - by)
    }
}

/// Component-wise product in polar form: magnitudes multiply and so do directions.
///
/// This is not a rotation. Multiplying by a vector whose direction is `0` collapses the
/// direction of the result to `0`.
impl Mul for Vector {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        Vector::new(
            self.magnitude * rhs.magnitude,
            self.direction * rhs.direction,
        )
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.magnitude * rhs, self.direction)
    }
}

/// Euclidean distance between two points, truncated toward zero.
pub fn calculate_distance(a: Point, b: Point) -> i64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt() as i64
}

/// Bearing from `start` to `end` in degrees.
///
/// The angle is measured against the floor-divided half-way point rather than `end` itself, so
/// odd offsets lose a unit toward negative infinity. Purely horizontal bearings snap to `0` or
/// `180`.
pub fn bearing_angle(start: Point, end: Point) -> f64 {
    let half = Point::new(
        start.x + (end.x - start.x).div_euclid(2),
        start.y + (end.y - start.y).div_euclid(2),
    );
    let dx = (half.x - start.x) as f64;
    let dy = (half.y - start.y) as f64;

    if dy != 0.0 {
        dy.atan2(dx).to_degrees()
    } else if dx < 0.0 {
        180.0
    } else {
        0.0
    }
}
