//! Turns routed paths into drawables placed inside the routing bounds.

use super::geometry::Point;
use super::routing::{Route, RouteKind, Routing, Segment};
use super::types::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
	Line {
		from: NodeId,
		to: NodeId,
		start: Point,
		end: Point,
	},
	/// SVG path data for rounded and cubic routes.
	Path {
		from: NodeId,
		to: NodeId,
		data: String,
		end: Point,
		/// Arrival direction at `end`.
		tangent: Point,
	},
}

/// Drawables in coordinates relative to `origin`, the top-left of the region.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
	pub origin: Point,
	pub width: f64,
	pub height: f64,
	pub primitives: Vec<Primitive>,
}

fn path_data(route: &Route, origin: Point) -> String {
	let commands: Vec<String> = route
		.segments()
		.into_iter()
		.map(|seg| match seg {
			Segment::MoveTo(p) => {
				let p = p - origin;
				format!("M {} {}", p.x, p.y)
			}
			Segment::LineTo(p) => {
				let p = p - origin;
				format!("L {} {}", p.x, p.y)
			}
			Segment::ArcTo { radius, sweep, to } => {
				let p = to - origin;
				format!("A {r} {r} 0 0 {} {} {}", sweep as u8, p.x, p.y, r = radius)
			}
			Segment::CubicTo { c1, c2, to } => {
				let (c1, c2, p) = (c1 - origin, c2 - origin, to - origin);
				format!("C {} {} {} {} {} {}", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
			}
		})
		.collect();
	commands.join(" ")
}

impl Overlay {
	pub fn build(routing: &Routing) -> Option<Overlay> {
		let bounds = routing.bounds?;
		let origin = bounds.origin();
		let primitives = routing
			.paths
			.iter()
			.map(|path| {
				let route = &path.route;
				if matches!(route.kind, RouteKind::Straight | RouteKind::Degenerate) {
					return Primitive::Line {
						from: path.from,
						to: path.to,
						start: route.start() - origin,
						end: route.end() - origin,
					};
				}
				Primitive::Path {
					from: path.from,
					to: path.to,
					data: path_data(route, origin),
					end: route.end() - origin,
					tangent: route.end_tangent(),
				}
			})
			.collect();
		Some(Overlay {
			origin,
			width: bounds.width(),
			height: bounds.height(),
			primitives,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::components::camera_view::geometry::Rect;
	use crate::components::camera_view::routing::{ArrowRouter, RouterConfig};
	use crate::components::camera_view::scene::Connection;

	fn routing(
		rects: &[(NodeId, Rect)],
		connections: &[(NodeId, NodeId)],
		config: RouterConfig,
	) -> Routing {
		let rects: BTreeMap<_, _> = rects.iter().copied().collect();
		let connections: Vec<Connection> =
			connections.iter().copied().map(Connection::from).collect();
		ArrowRouter::new(config).route(&rects, &connections)
	}

	#[test]
	fn empty_routing_has_no_overlay() {
		assert_eq!(Overlay::build(&Routing::default()), None);
	}

	#[test]
	fn straight_path_is_line_relative_to_bounds() {
		let r = routing(
			&[(1, Rect::new(0.0, 0.0, 50.0, 50.0)), (2, Rect::new(200.0, 0.0, 50.0, 50.0))],
			&[(1, 2)],
			RouterConfig::default(),
		);
		let overlay = Overlay::build(&r).unwrap();
		assert_eq!(overlay.origin, Point::new(30.0, 5.0));
		assert_eq!((overlay.width, overlay.height), (190.0, 40.0));
		assert_eq!(
			overlay.primitives,
			vec![Primitive::Line {
				from: 1,
				to: 2,
				start: Point::new(20.0, 20.0),
				end: Point::new(170.0, 20.0),
			}]
		);
	}

	#[test]
	fn rounded_corner_becomes_arc_command() {
		let r = routing(
			&[(1, Rect::new(0.0, 0.0, 50.0, 50.0)), (2, Rect::new(200.0, 200.0, 50.0, 50.0))],
			&[(1, 2)],
			RouterConfig::default(),
		);
		let overlay = Overlay::build(&r).unwrap();
		let Primitive::Path { data, tangent, .. } = &overlay.primitives[0] else {
			panic!("expected a path, got {:?}", overlay.primitives[0]);
		};
		assert_eq!(data, "M 20 20 L 177.5 20 A 17.5 17.5 0 0 1 195 37.5 L 195 195");
		assert_eq!(*tangent, Point::new(0.0, 1.0));
	}

	#[test]
	fn sharp_corners_still_draw_all_legs() {
		let r = routing(
			&[(1, Rect::new(0.0, 0.0, 50.0, 50.0)), (2, Rect::new(200.0, 200.0, 50.0, 50.0))],
			&[(1, 2)],
			RouterConfig {
				smoothing: 0.0,
				..Default::default()
			},
		);
		let overlay = Overlay::build(&r).unwrap();
		let Primitive::Path { data, .. } = &overlay.primitives[0] else {
			panic!("expected a path");
		};
		assert_eq!(data, "M 20 20 L 195 20 L 195 195");
	}
}
