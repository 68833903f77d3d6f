use super::camera::{PinchGesture, WheelInput};
use super::config::CanvasConfig;
use super::drag::{DragController, DragState, SpawnRelease};
use super::geometry::{Point, ray_edge_intersection};
use super::overlay::Overlay;
use super::routing::{ArrowRouter, Routing};
use super::scene::{Node, Scene, SpawnPlacement};
use super::types::ContainerState;

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub last: Point,
}

/// What needs redoing after a batch of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dirty {
	/// Node positions or connections changed: reroute and redraw.
	pub geometry: bool,
	/// Camera or transient visuals changed: redraw only.
	pub view: bool,
}

impl Dirty {
	pub fn any(self) -> bool {
		self.geometry || self.view
	}
}

/// Everything behind one canvas. Input methods take client (screen) coordinates.
pub struct CanvasState {
	pub scene: Scene,
	pub config: CanvasConfig,
	pub routing: Routing,
	pub overlay: Option<Overlay>,
	pub drag: DragController,
	pub pan: PanState,
	pub pinch: Option<PinchGesture>,
	/// Client position of the canvas' top-left corner.
	pub origin: Point,
	pub pointer: Point,
	pub width: f64,
	pub height: f64,
	router: ArrowRouter,
	view_dirty: bool,
}

impl CanvasState {
	pub fn new(initial: &ContainerState, config: CanvasConfig, width: f64, height: f64) -> Self {
		let mut state = Self {
			scene: Scene::from_state(initial, &config),
			router: ArrowRouter::new(config.router),
			config,
			routing: Routing::default(),
			overlay: None,
			drag: DragController::default(),
			pan: PanState::default(),
			pinch: None,
			origin: Point::ZERO,
			pointer: Point::ZERO,
			width,
			height,
			view_dirty: true,
		};
		state.reroute();
		state
	}

	pub fn reroute(&mut self) {
		self.routing = self.router.route(&self.scene.rects(), self.scene.connections());
		self.overlay = Overlay::build(&self.routing);
	}

	/// Collect pending changes, rerouting first if geometry moved.
	pub fn refresh(&mut self) -> Dirty {
		let dirty = Dirty {
			geometry: self.scene.take_dirty(),
			view: std::mem::take(&mut self.view_dirty),
		};
		if dirty.geometry {
			self.reroute();
		}
		dirty
	}

	pub fn snapshot(&self) -> ContainerState {
		self.scene.to_state()
	}

	pub fn set_origin(&mut self, left: f64, top: f64) {
		self.origin = Point::new(left, top);
	}

	pub fn to_world(&self, screen: Point) -> Point {
		self.scene.camera.screen_to_world(screen, self.origin)
	}

	/// World-space center of the plus control under `node`.
	pub fn plus_center(&self, node: &Node) -> Point {
		let r = node.rect();
		Point::new(
			r.center().x,
			r.bottom() + self.config.plus_gap + self.config.plus_radius,
		)
	}

	pub fn plus_at(&self, world: Point) -> Option<usize> {
		self.scene
			.nodes()
			.iter()
			.rposition(|n| self.plus_center(n).distance(world) <= self.config.plus_radius)
	}

	/// Line from the source's border to the pointer while a spawn gesture runs, in world space.
	pub fn spawn_preview(&self) -> Option<(Point, Point)> {
		let DragState::Spawning { source, last, .. } = self.drag.state() else {
			return None;
		};
		let r = self.scene.node(source)?.rect();
		let to = self.to_world(last);
		let from =
			ray_edge_intersection(r.center(), r.half_width(), r.half_height(), to - r.center());
		Some((from, to))
	}

	pub fn pointer_down(&mut self, p: Point) {
		self.pointer = p;
		let world = self.to_world(p);
		if let Some(i) = self.plus_at(world) {
			self.drag.begin_spawn(i, p);
			self.view_dirty = true;
		} else if let Some(i) = self.scene.node_at(world) {
			let node = &self.scene.nodes()[i];
			self.drag
				.begin_move(i, (node.x, node.y), p, self.scene.camera.scale);
		} else {
			self.pan = PanState {
				active: true,
				last: p,
			};
		}
	}

	pub fn pointer_move(&mut self, p: Point) {
		self.pointer = p;
		if let Some((i, x, y)) = self.drag.update(p) {
			self.scene.move_node(i, x, y);
		} else if self.drag.is_active() {
			self.view_dirty = true;
		} else if self.pan.active {
			let d = p - self.pan.last;
			self.scene.camera.pan(d.x, d.y);
			self.pan.last = p;
			self.view_dirty = true;
		}
	}

	/// `p` is the release position when the event carries one.
	pub fn pointer_up(&mut self, p: Option<Point>) {
		// releases arrive from the whole window; ignore the ones this view never saw start
		if !self.drag.is_active() && !self.pan.active {
			return;
		}
		match self.drag.release(p) {
			Some(SpawnRelease::Click { source }) => {
				self.scene.spawn(source, SpawnPlacement::BelowSource);
			}
			Some(SpawnRelease::Drop { source, at }) => {
				let world = self.to_world(at);
				self.scene.spawn(source, SpawnPlacement::At(world));
			}
			None => {}
		}
		self.pan.active = false;
		self.view_dirty = true;
	}

	pub fn touch_start(&mut self, touches: &[Point]) {
		match touches {
			[] => {}
			[p] => self.pointer_down(*p),
			[a, b, ..] => {
				// the second finger belongs to the pinch, not the drag
				self.drag.cancel();
				self.pan.active = false;
				self.pinch = PinchGesture::begin(&self.scene.camera, *a, *b, self.origin);
				self.view_dirty = true;
			}
		}
	}

	pub fn touch_move(&mut self, touches: &[Point]) {
		match (touches, self.pinch) {
			([a, b, ..], Some(pinch)) => {
				pinch.update(&mut self.scene.camera, *a, *b, self.origin);
				self.view_dirty = true;
			}
			([p], _) => self.pointer_move(*p),
			_ => {}
		}
	}

	/// `remaining` are the touches still down, `released` the one that lifted.
	pub fn touch_end(&mut self, remaining: &[Point], released: Option<Point>) {
		if remaining.len() < 2 {
			self.pinch = None;
		}
		if remaining.is_empty() {
			self.pointer_up(released);
		}
	}

	pub fn wheel(&mut self, input: WheelInput) {
		self.scene
			.camera
			.apply_wheel(&input, self.origin, self.config.zoom_intensity);
		self.view_dirty = true;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.view_dirty = true;
	}
}
