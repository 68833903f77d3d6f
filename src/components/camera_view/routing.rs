//! Orthogonal arrow routing between axis-aligned nodes.
//!
//! Every connection becomes one of four route shapes:
//!
//! - degenerate: both centers coincide, a zero-length path;
//! - straight: facing edges line up, a single segment;
//! - single corner: an L from the source's exit edge to the target's entry edge;
//! - double corner: H-V-H or V-H-V between facing edges of nodes whose spans
//!   overlap on one axis.
//!
//! Corners are rounded with circular arcs; a double-corner route whose middle
//! leg is too short to hold two arcs is drawn as a single cubic instead.

use std::collections::BTreeMap;

use super::geometry::{Bounds, Point, Rect, Side};
use super::scene::Connection;
use super::types::NodeId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouterConfig {
	/// Fraction of the shortest leg used as corner radius. 0 gives sharp corners.
	pub smoothing: f64,
	/// Shortest outer leg a double-corner route may have.
	pub min_leg: f64,
	/// Padding added around the routing bounds.
	pub margin: f64,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			smoothing: 0.1,
			min_leg: 20.0,
			margin: 20.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
	Degenerate,
	Straight,
	SingleCorner,
	DoubleCorner,
}

/// Axis the route leaves its source along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	Horizontal,
	Vertical,
}

impl Axis {
	fn main(self, p: Point) -> f64 {
		match self {
			Axis::Horizontal => p.x,
			Axis::Vertical => p.y,
		}
	}

	fn cross(self, p: Point) -> f64 {
		match self {
			Axis::Horizontal => p.y,
			Axis::Vertical => p.x,
		}
	}

	fn point(self, main: f64, cross: f64) -> Point {
		match self {
			Axis::Horizontal => Point::new(main, cross),
			Axis::Vertical => Point::new(cross, main),
		}
	}
}

/// Drawing commands for one route, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
	MoveTo(Point),
	LineTo(Point),
	ArcTo { radius: f64, sweep: bool, to: Point },
	CubicTo { c1: Point, c2: Point, to: Point },
}

/// Geometry of a routed connector.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
	pub kind: RouteKind,
	pub axis: Axis,
	/// Start, corners, end. Always 2 to 4 points.
	pub points: Vec<Point>,
	pub corner_radius: Option<f64>,
	/// Control points replacing the corners of a tight double-corner route.
	pub cubic: Option<(Point, Point)>,
}

impl Route {
	fn degenerate(at: Point) -> Self {
		Self {
			kind: RouteKind::Degenerate,
			axis: Axis::Horizontal,
			points: vec![at, at],
			corner_radius: None,
			cubic: None,
		}
	}

	fn straight(start: Point, end: Point, axis: Axis) -> Self {
		Self {
			kind: RouteKind::Straight,
			axis,
			points: vec![start, end],
			corner_radius: None,
			cubic: None,
		}
	}

	pub fn start(&self) -> Point {
		self.points[0]
	}

	pub fn end(&self) -> Point {
		self.points[self.points.len() - 1]
	}

	pub fn leg_lengths(&self) -> Vec<f64> {
		self.points.windows(2).map(|w| w[0].distance(w[1])).collect()
	}

	pub fn segments(&self) -> Vec<Segment> {
		let mut out = vec![Segment::MoveTo(self.start())];
		if let Some((c1, c2)) = self.cubic {
			out.push(Segment::CubicTo {
				c1,
				c2,
				to: self.end(),
			});
			return out;
		}
		let Some(r) = self.corner_radius else {
			out.extend(self.points[1..].iter().map(|&p| Segment::LineTo(p)));
			return out;
		};
		for w in self.points.windows(3) {
			let (prev, corner, next) = (w[0], w[1], w[2]);
			let u_in = (corner - prev).normalized();
			let u_out = (next - corner).normalized();
			out.push(Segment::LineTo(corner - u_in * r));
			out.push(Segment::ArcTo {
				radius: r,
				sweep: u_in.cross(u_out) > 0.0,
				to: corner + u_out * r,
			});
		}
		out.push(Segment::LineTo(self.end()));
		out
	}

	/// Unit direction the route arrives at its end with; zero for degenerate routes.
	pub fn end_tangent(&self) -> Point {
		let end = self.end();
		if let Some((_, c2)) = self.cubic {
			let t = (end - c2).normalized();
			if t != Point::ZERO {
				return t;
			}
		}
		(end - self.points[self.points.len() - 2]).normalized()
	}

	fn extend_bounds(&self, bounds: &mut Option<Bounds>) {
		let mut include = |p: Point| bounds.get_or_insert_with(|| Bounds::from_point(p)).include(p);
		for &p in &self.points {
			include(p);
		}
		for seg in self.segments() {
			match seg {
				Segment::MoveTo(p) | Segment::LineTo(p) | Segment::ArcTo { to: p, .. } => {
					include(p)
				}
				Segment::CubicTo { c1, c2, to } => {
					include(c1);
					include(c2);
					include(to);
				}
			}
		}
	}
}

/// A routed connection.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowPath {
	pub from: NodeId,
	pub to: NodeId,
	pub route: Route,
}

/// Result of routing a whole container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Routing {
	pub paths: Vec<ArrowPath>,
	/// Padded bounds over every path point and control point; `None` without paths.
	pub bounds: Option<Bounds>,
}

fn sign(v: f64) -> f64 {
	if v > 0.0 {
		1.0
	} else if v < 0.0 {
		-1.0
	} else {
		0.0
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ArrowRouter {
	config: RouterConfig,
}

impl ArrowRouter {
	pub fn new(config: RouterConfig) -> Self {
		Self {
			config: RouterConfig {
				smoothing: config.smoothing.clamp(0.0, 0.5),
				min_leg: config.min_leg.max(0.0),
				margin: config.margin.max(0.0),
			},
		}
	}

	/// Route every connection whose endpoints are both present in `rects`.
	pub fn route(&self, rects: &BTreeMap<NodeId, Rect>, connections: &[Connection]) -> Routing {
		let paths: Vec<ArrowPath> = connections
			.iter()
			.filter_map(|c| {
				let (a, b) = (rects.get(&c.from)?, rects.get(&c.to)?);
				Some(ArrowPath {
					from: c.from,
					to: c.to,
					route: self.route_pair(a, b),
				})
			})
			.collect();

		let mut bounds = None;
		for path in &paths {
			path.route.extend_bounds(&mut bounds);
		}
		Routing {
			paths,
			bounds: bounds.map(|b| b.padded(self.config.margin)),
		}
	}

	pub fn route_pair(&self, a: &Rect, b: &Rect) -> Route {
		let (ca, cb) = (a.center(), b.center());
		if ca == cb {
			return Route::degenerate(ca);
		}

		if a.overlaps_vertically(b) && ca.x != cb.x {
			let (exit, entry) = if cb.x > ca.x {
				(Side::Right, Side::Left)
			} else {
				(Side::Left, Side::Right)
			};
			return self.facing_route(
				a.edge_midpoint(exit),
				b.edge_midpoint(entry),
				Axis::Horizontal,
				sign(cb.x - ca.x),
			);
		}

		if a.overlaps_horizontally(b) && ca.y != cb.y {
			let (exit, entry) = if cb.y > ca.y {
				(Side::Bottom, Side::Top)
			} else {
				(Side::Top, Side::Bottom)
			};
			return self.facing_route(
				a.edge_midpoint(exit),
				b.edge_midpoint(entry),
				Axis::Vertical,
				sign(cb.y - ca.y),
			);
		}

		self.corner_route(a, b, ca, cb)
	}

	/// Straight or doubled route between two facing edge midpoints.
	fn facing_route(&self, start: Point, end: Point, axis: Axis, dir: f64) -> Route {
		if axis.cross(start) == axis.cross(end) {
			return Route::straight(start, end, axis);
		}

		let min_leg = self.config.min_leg;
		let (s, e) = (axis.main(start), axis.main(end));
		let mut mid = (s + e) / 2.0;
		if (mid - s).abs() < min_leg || (e - mid).abs() < min_leg {
			mid = if dir < 0.0 {
				s.min(e) - min_leg
			} else {
				s.max(e) + min_leg
			};
		}

		let points = vec![
			start,
			axis.point(mid, axis.cross(start)),
			axis.point(mid, axis.cross(end)),
			end,
		];
		let mut route = Route {
			kind: RouteKind::DoubleCorner,
			axis,
			points,
			corner_radius: None,
			cubic: None,
		};

		let p = &route.points;
		if p[1].distance(p[2]) < 2.0 * min_leg {
			let reach = min_leg.max((axis.main(p[3]) - axis.main(p[0])).abs() / 2.0);
			let first = sign(axis.main(p[1]) - axis.main(p[0]));
			let last = sign(axis.main(p[3]) - axis.main(p[2]));
			let c1 = p[0] + axis.point(first, 0.0) * reach;
			let c2 = p[3] - axis.point(last, 0.0) * reach;
			route.cubic = Some((c1, c2));
		} else {
			route.corner_radius = self.radius_for(&route);
		}
		route
	}

	/// L-shaped route when the nodes share no span.
	fn corner_route(&self, a: &Rect, b: &Rect, ca: Point, cb: Point) -> Route {
		let (dx, dy) = (cb.x - ca.x, cb.y - ca.y);
		let (axis, start, end, corner) = if dx.abs() >= dy.abs() {
			let exit = if dx > 0.0 { Side::Right } else { Side::Left };
			let entry = if dy > 0.0 {
				Side::Top
			} else if dy < 0.0 {
				Side::Bottom
			} else if dx > 0.0 {
				Side::Left
			} else {
				Side::Right
			};
			let (start, end) = (a.edge_midpoint(exit), b.edge_midpoint(entry));
			(Axis::Horizontal, start, end, Point::new(end.x, start.y))
		} else {
			let exit = if dy > 0.0 { Side::Bottom } else { Side::Top };
			let entry = if dx > 0.0 {
				Side::Left
			} else if dx < 0.0 {
				Side::Right
			} else if dy > 0.0 {
				Side::Top
			} else {
				Side::Bottom
			};
			let (start, end) = (a.edge_midpoint(exit), b.edge_midpoint(entry));
			(Axis::Vertical, start, end, Point::new(start.x, end.y))
		};

		if corner == start || corner == end {
			return Route::straight(start, end, axis);
		}

		let mut route = Route {
			kind: RouteKind::SingleCorner,
			axis,
			points: vec![start, corner, end],
			corner_radius: None,
			cubic: None,
		};
		route.corner_radius = self.radius_for(&route);
		route
	}

	fn radius_for(&self, route: &Route) -> Option<f64> {
		let shortest = route.leg_lengths().into_iter().fold(f64::INFINITY, f64::min);
		let r = self.config.smoothing * shortest;
		(r > 0.0 && r.is_finite()).then_some(r)
	}
}
