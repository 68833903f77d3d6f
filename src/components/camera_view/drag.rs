use super::geometry::Point;

/// Single-pointer drag state. Screen coordinates throughout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	#[default]
	Idle,
	/// Moving node `node`, which sat at `origin` when the pointer went down at `start`.
	Moving {
		node: usize,
		origin: (i32, i32),
		start: Point,
		scale: f64,
	},
	/// Pulling a new node out of `source`'s plus control.
	Spawning { source: usize, start: Point, last: Point },
}

/// How a spawn gesture ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnRelease {
	/// Released where it was pressed.
	Click { source: usize },
	/// Released elsewhere, at this screen point.
	Drop { source: usize, at: Point },
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
	state: DragState,
}

impl DragController {
	pub fn state(&self) -> DragState {
		self.state
	}

	pub fn is_active(&self) -> bool {
		self.state != DragState::Idle
	}

	pub fn begin_move(&mut self, node: usize, origin: (i32, i32), start: Point, scale: f64) {
		self.state = DragState::Moving {
			node,
			origin,
			start,
			scale,
		};
	}

	pub fn begin_spawn(&mut self, source: usize, start: Point) {
		self.state = DragState::Spawning {
			source,
			start,
			last: start,
		};
	}

	/// Feed a pointer sample. While moving a node, returns the node and its new position.
	pub fn update(&mut self, pointer: Point) -> Option<(usize, i32, i32)> {
		match &mut self.state {
			DragState::Idle => None,
			DragState::Moving {
				node,
				origin,
				start,
				scale,
			} => {
				let x = origin.0 as f64 + (pointer.x - start.x) / *scale;
				let y = origin.1 as f64 + (pointer.y - start.y) / *scale;
				Some((*node, x.round() as i32, y.round() as i32))
			}
			DragState::Spawning { last, .. } => {
				*last = pointer;
				None
			}
		}
	}

	/// Pointer released. Returns how a spawn gesture ended, if one was running.
	pub fn release(&mut self, pointer: Option<Point>) -> Option<SpawnRelease> {
		let state = std::mem::take(&mut self.state);
		let DragState::Spawning { source, start, last } = state else {
			return None;
		};
		let at = pointer.unwrap_or(last);
		if at == start {
			Some(SpawnRelease::Click { source })
		} else {
			Some(SpawnRelease::Drop { source, at })
		}
	}

	pub fn cancel(&mut self) {
		self.state = DragState::Idle;
	}
}
