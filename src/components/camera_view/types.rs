use serde::{Deserialize, Serialize};

use super::camera::Camera;

pub type NodeId = u32;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<NodeId>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<i32>,
}

impl NodeRecord {
	pub fn at(id: NodeId, x: i32, y: i32) -> Self {
		Self {
			id: Some(id),
			x: Some(x),
			y: Some(y),
		}
	}

	pub fn unplaced(id: NodeId) -> Self {
		Self {
			id: Some(id),
			x: None,
			y: None,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
	pub x: f64,
	pub y: f64,
	pub scale: f64,
}

impl Default for CameraRecord {
	fn default() -> Self {
		Camera::default().into()
	}
}

impl From<Camera> for CameraRecord {
	fn from(c: Camera) -> Self {
		Self {
			x: c.x,
			y: c.y,
			scale: c.scale,
		}
	}
}

impl From<CameraRecord> for Camera {
	fn from(r: CameraRecord) -> Self {
		Camera::new(r.x, r.y, r.scale)
	}
}

/// Saved state of a single camera view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerState {
	pub nodes: Vec<NodeRecord>,
	pub camera: CameraRecord,
	pub connections: Vec<(NodeId, NodeId)>,
}

/// Everything persisted for the page. The three lists are aligned by container index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
	pub containers: Vec<Vec<NodeRecord>>,
	#[serde(default)]
	pub cameras: Vec<CameraRecord>,
	#[serde(default)]
	pub connections: Vec<Vec<(NodeId, NodeId)>>,
}

impl SceneState {
	pub fn container(&self, index: usize) -> ContainerState {
		ContainerState {
			nodes: self.containers.get(index).cloned().unwrap_or_default(),
			camera: self.cameras.get(index).copied().unwrap_or_default(),
			connections: self.connections.get(index).cloned().unwrap_or_default(),
		}
	}

	pub fn set_container(&mut self, index: usize, state: ContainerState) {
		if self.containers.len() <= index {
			self.containers.resize_with(index + 1, Vec::new);
		}
		if self.cameras.len() <= index {
			self.cameras.resize_with(index + 1, CameraRecord::default);
		}
		if self.connections.len() <= index {
			self.connections.resize_with(index + 1, Vec::new);
		}
		self.containers[index] = state.nodes;
		self.cameras[index] = state.camera;
		self.connections[index] = state.connections;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_sparse_records() {
		let json = concat!(
			r#"{"containers":[[{"id":1,"x":30,"y":40},{}]],"#,
			r#""cameras":[{"x":1.5,"y":2,"scale":3}]}"#
		);
		let state: SceneState = serde_json::from_str(json).unwrap();
		assert_eq!(state.containers[0][0], NodeRecord::at(1, 30, 40));
		assert_eq!(state.containers[0][1], NodeRecord::default());
		assert!(state.connections.is_empty());
		assert_eq!(state.container(0).camera.scale, 3.0);
	}

	#[test]
	fn connections_are_pairs() {
		let state = SceneState {
			containers: vec![vec![]],
			cameras: vec![CameraRecord::default()],
			connections: vec![vec![(1, 2)]],
		};
		let json = serde_json::to_string(&state).unwrap();
		assert!(json.contains(r#""connections":[[[1,2]]]"#), "{json}");
		assert!(json.contains(r#""containers":[[]]"#), "{json}");
	}

	#[test]
	fn set_container_grows_all_lists() {
		let mut state = SceneState::default();
		let camera = CameraRecord {
			x: 4.0,
			y: 5.0,
			scale: 2.0,
		};
		state.set_container(
			1,
			ContainerState {
				nodes: vec![NodeRecord::unplaced(7)],
				camera,
				connections: vec![(7, 7)],
			},
		);
		assert_eq!(state.containers.len(), 2);
		assert_eq!(state.cameras[0], CameraRecord::default());
		assert_eq!(state.container(1).camera, camera);
		assert_eq!(state.container(1).connections, vec![(7, 7)]);
	}
}
