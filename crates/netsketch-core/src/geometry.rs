//! Geometric primitives for glyph placement.
//!
//! This module provides the geometric types used to place layer glyphs,
//! connector endpoints and labels on the canvas.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Netsketch uses a coordinate system consistent with SVG and raster images:
//!
//! ```text
//!   (0,0) ────────► +X   (layers flow this way)
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use netsketch_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Calculates the centroid of a set of points, or `None` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use netsketch_core::geometry::Point;
    /// let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 30.0)];
    /// let centroid = Point::centroid(&points).unwrap();
    /// assert_eq!(centroid.x(), 5.0);
    /// assert_eq!(centroid.y(), 10.0);
    ///
    /// assert!(Point::centroid(&[]).is_none());
    /// ```
    pub fn centroid(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let count = points.len() as f32;
        let sum = points
            .iter()
            .fold(Point::default(), |acc, point| acc.add_point(*point));
        Some(Self {
            x: sum.x / count,
            y: sum.y / count,
        })
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds spanning two opposite corners, in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use netsketch_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_corners(Point::new(60.0, 160.0), Point::new(20.0, 120.0));
    /// assert_eq!(bounds.min_x(), 20.0);
    /// assert_eq!(bounds.min_y(), 120.0);
    /// assert_eq!(bounds.width(), 40.0);
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }
}
