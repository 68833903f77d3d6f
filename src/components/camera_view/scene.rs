use std::collections::{BTreeMap, HashSet};

use log::debug;

use super::camera::Camera;
use super::config::{CanvasConfig, NodeSizing};
use super::geometry::{Point, Rect};
use super::types::{ContainerState, NodeId, NodeRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
	pub from: NodeId,
	pub to: NodeId,
}

impl From<(NodeId, NodeId)> for Connection {
	fn from((from, to): (NodeId, NodeId)) -> Self {
		Self { from, to }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: Option<NodeId>,
	pub x: i32,
	pub y: i32,
	pub width: f64,
	pub height: f64,
}

impl Node {
	pub fn rect(&self) -> Rect {
		Rect::new(self.x as f64, self.y as f64, self.width, self.height)
	}

	pub fn center(&self) -> Point {
		self.rect().center()
	}
}

/// Where a spawned node goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnPlacement {
	/// A fixed distance below the source's center.
	BelowSource,
	/// Centered on this world point.
	At(Point),
}

/// Nodes, connections and camera of one camera view.
#[derive(Clone, Debug)]
pub struct Scene {
	nodes: Vec<Node>,
	connections: Vec<Connection>,
	pub camera: Camera,
	sizing: NodeSizing,
	stack_gap: f64,
	spawn_offset: f64,
	dirty: bool,
}

impl Scene {
	pub fn new(config: &CanvasConfig) -> Self {
		Self {
			nodes: Vec::new(),
			connections: Vec::new(),
			camera: Camera::default(),
			sizing: config.sizing,
			stack_gap: config.stack_gap,
			spawn_offset: config.spawn_offset,
			dirty: true,
		}
	}

	/// Build a scene from saved records. Nodes without a position are stacked
	/// below and right of the positioned ones; repeated ids are dropped.
	pub fn from_state(state: &ContainerState, config: &CanvasConfig) -> Self {
		let mut scene = Scene::new(config);
		scene.camera = state.camera.into();
		scene.connections = state.connections.iter().copied().map(Connection::from).collect();

		let mut seen = HashSet::new();
		let ids: Vec<Option<NodeId>> = state
			.nodes
			.iter()
			.map(|r| r.id.filter(|id| seen.insert(*id)))
			.collect();
		let sizes: Vec<_> = (0..ids.len()).map(|i| scene.sizing.measure(i)).collect();

		let (mut right, mut bottom) = (0.0_f64, 0.0_f64);
		for (record, size) in state.nodes.iter().zip(&sizes) {
			if let (Some(x), Some(y)) = (record.x, record.y) {
				right = right.max(x as f64 + size.width);
				bottom = bottom.max(y as f64 + size.height);
			}
		}

		let mut auto_y = bottom;
		for ((record, id), size) in state.nodes.iter().zip(ids).zip(sizes) {
			let (x, y) = match (record.x, record.y) {
				(Some(x), Some(y)) => (x, y),
				_ => {
					let pos = (right.round() as i32, auto_y.round() as i32);
					auto_y += size.height + scene.stack_gap;
					pos
				}
			};
			scene.nodes.push(Node {
				id,
				x,
				y,
				width: size.width,
				height: size.height,
			});
		}
		scene
	}

	pub fn to_state(&self) -> ContainerState {
		ContainerState {
			nodes: self
				.nodes
				.iter()
				.map(|n| NodeRecord {
					id: n.id,
					x: Some(n.x),
					y: Some(n.y),
				})
				.collect(),
			camera: self.camera.into(),
			connections: self.connections.iter().map(|c| (c.from, c.to)).collect(),
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn node(&self, index: usize) -> Option<&Node> {
		self.nodes.get(index)
	}

	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	/// Returns true when the node actually moved.
	pub fn move_node(&mut self, index: usize, x: i32, y: i32) -> bool {
		let Some(node) = self.nodes.get_mut(index) else {
			return false;
		};
		if (node.x, node.y) == (x, y) {
			return false;
		}
		node.x = x;
		node.y = y;
		self.dirty = true;
		true
	}

	/// Smallest id above every id in use.
	pub fn next_id(&self) -> NodeId {
		self.nodes.iter().filter_map(|n| n.id).max().map_or(1, |m| m + 1)
	}

	/// The node's id, assigning the next free one if it has none yet.
	pub fn ensure_id(&mut self, index: usize) -> Option<NodeId> {
		if let Some(id) = self.nodes.get(index)?.id {
			return Some(id);
		}
		let id = self.next_id();
		self.nodes[index].id = Some(id);
		self.dirty = true;
		debug!("assigned id {} to node #{}", id, index);
		Some(id)
	}

	/// Create a node connected from `source`. Returns the new node's id.
	pub fn spawn(&mut self, source: usize, placement: SpawnPlacement) -> Option<NodeId> {
		let from = self.ensure_id(source)?;
		let target = match placement {
			SpawnPlacement::BelowSource => {
				self.nodes[source].center() + Point::new(0.0, self.spawn_offset)
			}
			SpawnPlacement::At(p) => p,
		};
		let id = self.next_id();
		let size = self.sizing.measure(self.nodes.len());
		self.nodes.push(Node {
			id: Some(id),
			x: (target.x - size.width / 2.0).round() as i32,
			y: (target.y - size.height / 2.0).round() as i32,
			width: size.width,
			height: size.height,
		});
		self.connections.push(Connection { from, to: id });
		self.dirty = true;
		debug!("spawned node {} from {} at ({:.0}, {:.0})", id, from, target.x, target.y);
		Some(id)
	}

	/// Rectangles of every node that has an id, for routing.
	pub fn rects(&self) -> BTreeMap<NodeId, Rect> {
		self.nodes.iter().filter_map(|n| Some((n.id?, n.rect()))).collect()
	}

	/// Topmost node under a world point.
	pub fn node_at(&self, world: Point) -> Option<usize> {
		self.nodes.iter().rposition(|n| n.rect().contains(world))
	}

	/// Whether node geometry changed since the last call.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::camera_view::geometry::Size;

	fn state(nodes: Vec<NodeRecord>) -> ContainerState {
		ContainerState {
			nodes,
			..Default::default()
		}
	}

	#[test]
	fn unplaced_nodes_stack_below_extent() {
		let scene = Scene::from_state(
			&state(vec![
				NodeRecord::unplaced(3),
				NodeRecord::at(1, 30, 40),
				NodeRecord::at(2, 200, 60),
				NodeRecord::unplaced(4),
			]),
			&CanvasConfig::default(),
		);
		let pos: Vec<_> = scene.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(pos, vec![(250, 110), (30, 40), (200, 60), (250, 170)]);
	}

	#[test]
	fn stacking_starts_at_origin_without_placed_nodes() {
		let scene =
			Scene::from_state(&state(vec![NodeRecord::default()]), &CanvasConfig::default());
		assert_eq!((scene.nodes()[0].x, scene.nodes()[0].y), (0, 0));
		assert_eq!(scene.nodes()[0].id, None);
	}

	#[test]
	fn duplicate_ids_are_cleared() {
		let scene = Scene::from_state(
			&state(vec![NodeRecord::at(1, 0, 0), NodeRecord::at(1, 100, 0)]),
			&CanvasConfig::default(),
		);
		assert_eq!(scene.nodes()[1].id, None);
		assert_eq!(scene.rects().len(), 1);
	}

	#[test]
	fn each_unplaced_node_stacks_below_the_previous_one() {
		let scene = Scene::from_state(
			&state(vec![
				NodeRecord::at(1, 0, 0),
				NodeRecord::unplaced(2),
				NodeRecord::unplaced(3),
			]),
			&CanvasConfig::default(),
		);
		let pos: Vec<_> = scene.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(pos, vec![(0, 0), (50, 50), (50, 110)]);
	}

	#[test]
	fn assigning_an_id_keeps_the_node_height() {
		let config = CanvasConfig {
			sizing: NodeSizing::Varied {
				width: 50.0,
				min_height: 60.0,
				max_height: 200.0,
			},
			..Default::default()
		};
		let mut scene = Scene::from_state(
			&state(vec![NodeRecord::at(7, 0, 0), NodeRecord::default()]),
			&config,
		);
		let height = scene.nodes()[1].height;
		scene.spawn(1, SpawnPlacement::BelowSource);
		assert_eq!(scene.nodes()[1].id, Some(8));

		let reloaded = Scene::from_state(&scene.to_state(), &config);
		assert_eq!(reloaded.nodes()[1].height, height);
		assert_eq!(reloaded.nodes()[2].height, scene.nodes()[2].height);
	}

	#[test]
	fn spawn_click_places_below_source_center() {
		let mut scene =
			Scene::from_state(&state(vec![NodeRecord::at(4, 0, 0)]), &CanvasConfig::default());
		scene.take_dirty();
		let id = scene.spawn(0, SpawnPlacement::BelowSource).unwrap();
		assert_eq!(id, 5);
		let node = &scene.nodes()[1];
		assert_eq!(node.center(), Point::new(25.0, 145.0));
		assert_eq!(scene.connections(), &[Connection { from: 4, to: 5 }]);
		assert!(scene.take_dirty());
	}

	#[test]
	fn spawn_drop_centers_node_on_point_and_names_source() {
		let config = CanvasConfig {
			sizing: NodeSizing::Fixed(Size::new(40.0, 60.0)),
			..Default::default()
		};
		let mut scene = Scene::from_state(&state(vec![NodeRecord::default()]), &config);
		let id = scene.spawn(0, SpawnPlacement::At(Point::new(300.0, 200.0))).unwrap();
		assert_eq!(scene.nodes()[0].id, Some(1));
		assert_eq!(id, 2);
		assert_eq!((scene.nodes()[1].x, scene.nodes()[1].y), (280, 170));
		assert_eq!(scene.to_state().connections, vec![(1, 2)]);
	}

	#[test]
	fn move_reports_changes_only() {
		let mut scene =
			Scene::from_state(&state(vec![NodeRecord::at(1, 5, 5)]), &CanvasConfig::default());
		scene.take_dirty();
		assert!(!scene.move_node(0, 5, 5));
		assert!(!scene.take_dirty());
		assert!(scene.move_node(0, 6, 5));
		assert!(scene.take_dirty());
		assert!(!scene.move_node(9, 0, 0));
	}

	#[test]
	fn topmost_node_wins_hit_test() {
		let scene = Scene::from_state(
			&state(vec![NodeRecord::at(1, 0, 0), NodeRecord::at(2, 20, 20)]),
			&CanvasConfig::default(),
		);
		assert_eq!(scene.node_at(Point::new(30.0, 30.0)), Some(1));
		assert_eq!(scene.node_at(Point::new(5.0, 5.0)), Some(0));
		assert_eq!(scene.node_at(Point::new(500.0, 5.0)), None);
	}
}
