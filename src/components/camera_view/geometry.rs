//! Points, rectangles and the edge math shared by the camera and the router.

use std::ops::{Add, Mul, Sub};

/// Replace NaN and infinities with zero.
pub fn finite_or_zero(v: f64) -> f64 {
	if v.is_finite() { v } else { 0.0 }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Point) -> f64 {
		(other - self).length()
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}

	/// Unit vector, or zero for a zero-length input.
	pub fn normalized(self) -> Point {
		let len = self.length();
		if len > 0.0 {
			Point::new(self.x / len, self.y / len)
		} else {
			Point::ZERO
		}
	}

	/// z component of the 3D cross product.
	pub fn cross(self, other: Point) -> f64 {
		self.x * other.y - self.y * other.x
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

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
	Left,
	Right,
	Top,
	Bottom,
}

/// Axis-aligned rectangle in world space, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	/// Builds a rectangle, mapping non-finite values to zero and negative sizes to empty.
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x: finite_or_zero(x),
			y: finite_or_zero(y),
			width: finite_or_zero(width).max(0.0),
			height: finite_or_zero(height).max(0.0),
		}
	}

	pub fn left(&self) -> f64 {
		self.x
	}

	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	pub fn top(&self) -> f64 {
		self.y
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	pub fn half_width(&self) -> f64 {
		self.width / 2.0
	}

	pub fn half_height(&self) -> f64 {
		self.height / 2.0
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + self.half_width(), self.y + self.half_height())
	}

	pub fn edge_midpoint(&self, side: Side) -> Point {
		let c = self.center();
		match side {
			Side::Left => Point::new(c.x - self.half_width(), c.y),
			Side::Right => Point::new(c.x + self.half_width(), c.y),
			Side::Top => Point::new(c.x, c.y - self.half_height()),
			Side::Bottom => Point::new(c.x, c.y + self.half_height()),
		}
	}

	/// True when the y spans share an interior (touching edges do not count).
	pub fn overlaps_vertically(&self, other: &Rect) -> bool {
		self.top() < other.bottom() && other.top() < self.bottom()
	}

	/// True when the x spans share an interior.
	pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
		self.left() < other.right() && other.left() < self.right()
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
	}
}

/// Point where a ray from `center` along `dir` leaves a box of the given half extents.
pub fn ray_edge_intersection(center: Point, half_w: f64, half_h: f64, dir: Point) -> Point {
	let sx = if dir.x == 0.0 { f64::INFINITY } else { half_w / dir.x.abs() };
	let sy = if dir.y == 0.0 { f64::INFINITY } else { half_h / dir.y.abs() };
	let s = sx.min(sy);
	if !s.is_finite() {
		return center;
	}
	center + dir * s
}

/// Running min/max over a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn from_point(p: Point) -> Self {
		Self {
			min_x: p.x,
			min_y: p.y,
			max_x: p.x,
			max_y: p.y,
		}
	}

	pub fn include(&mut self, p: Point) {
		self.min_x = self.min_x.min(p.x);
		self.min_y = self.min_y.min(p.y);
		self.max_x = self.max_x.max(p.x);
		self.max_y = self.max_y.max(p.y);
	}

	pub fn padded(&self, margin: f64) -> Bounds {
		Bounds {
			min_x: self.min_x - margin,
			min_y: self.min_y - margin,
			max_x: self.max_x + margin,
			max_y: self.max_y + margin,
		}
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn origin(&self) -> Point {
		Point::new(self.min_x, self.min_y)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn center_and_edges() {
		let r = Rect::new(10.0, 20.0, 50.0, 30.0);
		assert_eq!(r.center(), Point::new(35.0, 35.0));
		assert_eq!(r.edge_midpoint(Side::Left), Point::new(10.0, 35.0));
		assert_eq!(r.edge_midpoint(Side::Right), Point::new(60.0, 35.0));
		assert_eq!(r.edge_midpoint(Side::Top), Point::new(35.0, 20.0));
		assert_eq!(r.edge_midpoint(Side::Bottom), Point::new(35.0, 50.0));
	}

	#[test]
	fn ray_exits_through_nearest_edge() {
		let exit = |dx, dy| ray_edge_intersection(Point::ZERO, 25.0, 10.0, Point::new(dx, dy));
		assert_eq!(exit(1.0, 0.0), Point::new(25.0, 0.0));
		assert_eq!(exit(0.0, -3.0), Point::new(0.0, -10.0));
		// diagonal hits the short side first
		assert_eq!(exit(1.0, 1.0), Point::new(10.0, 10.0));
	}

	#[test]
	fn zero_direction_returns_center() {
		let c = Point::new(4.0, 5.0);
		assert_eq!(ray_edge_intersection(c, 25.0, 25.0, Point::ZERO), c);
	}

	#[test]
	fn nan_dimensions_degrade_to_zero() {
		let r = Rect::new(f64::NAN, 3.0, f64::INFINITY, -4.0);
		assert_eq!(r, Rect::new(0.0, 3.0, 0.0, 0.0));
	}

	#[test]
	fn span_overlap_is_strict() {
		let a = Rect::new(0.0, 0.0, 50.0, 50.0);
		let touching = Rect::new(0.0, 50.0, 50.0, 50.0);
		let shifted = Rect::new(100.0, 49.0, 50.0, 50.0);
		assert!(!a.overlaps_vertically(&touching));
		assert!(a.overlaps_horizontally(&touching));
		assert!(a.overlaps_vertically(&shifted));
		assert!(!a.overlaps_horizontally(&shifted));
	}

	#[test]
	fn bounds_pad_and_contain() {
		let mut b = Bounds::from_point(Point::new(0.0, 0.0));
		b.include(Point::new(10.0, -5.0));
		let p = b.padded(20.0);
		assert_eq!(p.origin(), Point::new(-20.0, -25.0));
		assert_eq!(p.width(), 50.0);
		assert_eq!(p.height(), 45.0);
		assert!(p.contains(Point::new(29.0, 14.0)));
	}
}
