use super::geometry::{Point, finite_or_zero};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;

/// Lowest zoom factor a single wheel tick may produce.
const MIN_WHEEL_FACTOR: f64 = 0.01;

pub fn clamp_scale(scale: f64) -> f64 {
	if scale.is_nan() {
		return 1.0;
	}
	scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Pan/zoom state for one view. `x`/`y` is the world point shown at the
/// container's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub x: f64,
	pub y: f64,
	pub scale: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			scale: 1.0,
		}
	}
}

impl Camera {
	pub fn new(x: f64, y: f64, scale: f64) -> Self {
		Self {
			x: finite_or_zero(x),
			y: finite_or_zero(y),
			scale: clamp_scale(scale),
		}
	}

	pub fn screen_to_world(&self, screen: Point, origin: Point) -> Point {
		Point::new(
			(screen.x - origin.x) / self.scale + self.x,
			(screen.y - origin.y) / self.scale + self.y,
		)
	}

	pub fn world_to_screen(&self, world: Point, origin: Point) -> Point {
		Point::new(
			(world.x - self.x) * self.scale + origin.x,
			(world.y - self.y) * self.scale + origin.y,
		)
	}

	/// Drag the view by a screen-space delta.
	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.x -= dx / self.scale;
		self.y -= dy / self.scale;
	}

	/// Multiply the scale by `factor` keeping the world point under `screen` fixed.
	pub fn zoom_at(&mut self, screen: Point, origin: Point, factor: f64) {
		let anchor = self.screen_to_world(screen, origin);
		let new_scale = clamp_scale(self.scale * factor);
		let ratio = self.scale / new_scale;
		self.x = anchor.x - (anchor.x - self.x) * ratio;
		self.y = anchor.y - (anchor.y - self.y) * ratio;
		self.scale = new_scale;
	}

	pub fn apply_wheel(&mut self, input: &WheelInput, origin: Point, intensity: f64) {
		if input.ctrl {
			let factor = (1.0 - input.delta_y * intensity / 100.0).max(MIN_WHEEL_FACTOR);
			self.zoom_at(input.position, origin, factor);
		} else if input.shift {
			let delta = if input.delta_y != 0.0 {
				input.delta_y
			} else {
				input.delta_x
			};
			self.x += delta / self.scale;
		} else {
			self.y += input.delta_y / self.scale;
			self.x += input.delta_x / self.scale;
		}
	}

	/// Translation and scale to apply to the scene root, in that order.
	pub fn canvas_transform(&self) -> (f64, f64, f64) {
		(-self.x * self.scale, -self.y * self.scale, self.scale)
	}
}

/// One wheel event, already decoded from the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct WheelInput {
	pub delta_x: f64,
	pub delta_y: f64,
	pub shift: bool,
	pub ctrl: bool,
	pub position: Point,
}

/// Two-finger zoom, anchored on the world point first seen under the midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchGesture {
	start_distance: f64,
	start_scale: f64,
	anchor: Point,
}

impl PinchGesture {
	pub fn begin(camera: &Camera, a: Point, b: Point, origin: Point) -> Option<Self> {
		let start_distance = a.distance(b);
		if start_distance.is_nan() || start_distance <= 0.0 {
			return None;
		}
		Some(Self {
			start_distance,
			start_scale: camera.scale,
			anchor: camera.screen_to_world(a.midpoint(b), origin),
		})
	}

	pub fn update(&self, camera: &mut Camera, a: Point, b: Point, origin: Point) {
		let scale = clamp_scale(self.start_scale * (a.distance(b) / self.start_distance));
		let mid = a.midpoint(b);
		camera.x = self.anchor.x - (mid.x - origin.x) / scale;
		camera.y = self.anchor.y - (mid.y - origin.y) / scale;
		camera.scale = scale;
	}
}
