use std::collections::BTreeMap;

use arrow_canvas::camera_view::camera::Camera;
use arrow_canvas::camera_view::geometry::{Point, Rect};
use arrow_canvas::camera_view::routing::{ArrowRouter, RouteKind, RouterConfig, Segment};
use arrow_canvas::camera_view::scene::{Connection, Scene};
use arrow_canvas::camera_view::storage::{MemoryStore, SceneStore, default_scene, load_or_default};
use arrow_canvas::camera_view::{CanvasConfig, SceneState};

fn square(x: f64, y: f64) -> Rect {
	Rect::new(x, y, 50.0, 50.0)
}

#[test]
fn side_by_side_nodes_get_a_straight_arrow() {
	let rects: BTreeMap<_, _> =
		[(1, square(0.0, 0.0)), (2, square(200.0, 0.0))].into_iter().collect();
	let routing = ArrowRouter::default().route(&rects, &[Connection { from: 1, to: 2 }]);
	let route = &routing.paths[0].route;
	assert_eq!(route.kind, RouteKind::Straight);
	assert_eq!(route.start(), Point::new(50.0, 25.0));
	assert_eq!(route.end(), Point::new(200.0, 25.0));
}

#[test]
fn diagonal_nodes_get_an_l_shaped_arrow() {
	let router = ArrowRouter::new(RouterConfig::default());
	let route = router.route_pair(&square(0.0, 0.0), &square(200.0, 200.0));
	assert_eq!(
		route.points,
		vec![Point::new(50.0, 25.0), Point::new(225.0, 25.0), Point::new(225.0, 200.0)]
	);
}

#[test]
fn every_segment_of_the_default_scene_fits_its_bounds() {
	let state = default_scene();
	let config = CanvasConfig::default();
	let router = ArrowRouter::new(config.router);
	for i in 0..state.containers.len() {
		let scene = Scene::from_state(&state.container(i), &config);
		let routing = router.route(&scene.rects(), scene.connections());
		assert_eq!(routing.paths.len(), scene.connections().len());
		let inner = routing.bounds.unwrap().padded(-config.router.margin);
		for path in &routing.paths {
			for seg in path.route.segments() {
				let points = match seg {
					Segment::MoveTo(p) | Segment::LineTo(p) => vec![p],
					Segment::ArcTo { to, .. } => vec![to],
					Segment::CubicTo { c1, c2, to } => vec![c1, c2, to],
				};
				for p in points {
					assert!(inner.contains(p), "container {i}: {p:?} outside {inner:?}");
				}
			}
		}
	}
}

#[test]
fn zoom_anchor_holds_across_many_points() {
	let origin = Point::new(12.0, 34.0);
	let cases = [
		(0.0, 0.0, 1.5),
		(640.0, 10.0, 0.7),
		(33.0, 480.0, 4.0),
		(200.0, 200.0, 0.2),
	];
	for (sx, sy, factor) in cases {
		let mut camera = Camera::new(-17.0, 42.0, 0.8);
		let screen = Point::new(sx, sy);
		let before = camera.screen_to_world(screen, origin);
		camera.zoom_at(screen, origin, factor);
		let after = camera.screen_to_world(screen, origin);
		assert!((before.x - after.x).abs() < 1e-9 && (before.y - after.y).abs() < 1e-9);
	}
}

#[test]
fn edited_scene_survives_a_save_and_reload() {
	let store = MemoryStore::default();
	let mut state: SceneState = load_or_default(&store);
	let config = CanvasConfig::default();

	let mut scene = Scene::from_state(&state.container(0), &config);
	scene.move_node(0, 400, 10);
	scene.camera.pan(100.0, 0.0);
	state.set_container(0, scene.to_state());
	store.save(&state).unwrap();

	let restored = load_or_default(&store);
	let again = Scene::from_state(&restored.container(0), &config);
	assert_eq!((again.nodes()[0].x, again.nodes()[0].y), (400, 10));
	assert_eq!(again.camera.x, -100.0);
	assert_eq!(again.connections(), scene.connections());
}
