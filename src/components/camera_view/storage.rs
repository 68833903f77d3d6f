//! Scene persistence. Anything that fails to load is replaced by the default scene.

use std::cell::RefCell;

use log::{info, warn};
use thiserror::Error;

use super::types::{CameraRecord, NodeId, NodeRecord, SceneState};

pub const STORAGE_KEY: &str = "freecanvas_state";
/// Key of the single-view chat canvas.
pub const CHAT_STORAGE_KEY: &str = "chat_canvas_state";

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("local storage is unavailable")]
	Unavailable,
	#[error("storage access failed: {0}")]
	Access(String),
	#[error("malformed scene state: {0}")]
	Malformed(#[from] serde_json::Error),
	#[error("scene state has no containers")]
	Empty,
}

pub trait SceneStore {
	/// `Ok(None)` when nothing has been saved yet.
	fn load(&self) -> Result<Option<SceneState>, StoreError>;
	fn save(&self, state: &SceneState) -> Result<(), StoreError>;
}

fn parse(json: &str) -> Result<SceneState, StoreError> {
	let state: SceneState = serde_json::from_str(json)?;
	if state.containers.is_empty() {
		return Err(StoreError::Empty);
	}
	Ok(state)
}

/// Browser `localStorage`, one JSON blob under a fixed key.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
	key: String,
}

impl Default for LocalStorageStore {
	fn default() -> Self {
		Self::new(STORAGE_KEY)
	}
}

impl LocalStorageStore {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	fn storage(&self) -> Result<web_sys::Storage, StoreError> {
		web_sys::window()
			.ok_or(StoreError::Unavailable)?
			.local_storage()
			.map_err(|e| StoreError::Access(format!("{e:?}")))?
			.ok_or(StoreError::Unavailable)
	}
}

impl SceneStore for LocalStorageStore {
	fn load(&self) -> Result<Option<SceneState>, StoreError> {
		let json = self
			.storage()?
			.get_item(&self.key)
			.map_err(|e| StoreError::Access(format!("{e:?}")))?;
		json.as_deref().map(parse).transpose()
	}

	fn save(&self, state: &SceneState) -> Result<(), StoreError> {
		let json = serde_json::to_string(state)?;
		self.storage()?
			.set_item(&self.key, &json)
			.map_err(|e| StoreError::Access(format!("{e:?}")))
	}
}

/// In-memory JSON slot, for tests and hosts without a browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
	json: RefCell<Option<String>>,
}

impl MemoryStore {
	pub fn with_json(json: impl Into<String>) -> Self {
		Self {
			json: RefCell::new(Some(json.into())),
		}
	}
}

impl SceneStore for MemoryStore {
	fn load(&self) -> Result<Option<SceneState>, StoreError> {
		self.json.borrow().as_deref().map(parse).transpose()
	}

	fn save(&self, state: &SceneState) -> Result<(), StoreError> {
		*self.json.borrow_mut() = Some(serde_json::to_string(state)?);
		Ok(())
	}
}

/// Load the saved scene, falling back to [`default_scene`] when absent or unreadable.
pub fn load_or_default(store: &impl SceneStore) -> SceneState {
	load_or(store, default_scene)
}

pub fn load_or(store: &impl SceneStore, fallback: fn() -> SceneState) -> SceneState {
	match store.load() {
		Ok(Some(state)) => {
			info!("restored {} container(s)", state.containers.len());
			state
		}
		Ok(None) => fallback(),
		Err(e) => {
			warn!("discarding saved scene: {}", e);
			fallback()
		}
	}
}

fn placed(points: &[(i32, i32)]) -> Vec<NodeRecord> {
	points
		.iter()
		.enumerate()
		.map(|(i, &(x, y))| NodeRecord::at(i as NodeId + 1, x, y))
		.collect()
}

pub fn default_scene() -> SceneState {
	let first = placed(&[(30, 40), (120, 100), (60, 160), (200, 60)]);
	let mut second = placed(&[
		(200, 60),
		(300, 180),
		(50, 220),
		(100, 50),
		(180, 120),
		(250, 90),
		(320, 40),
		(60, 160),
		(350, 250),
		(120, 200),
		(200, 260),
	]);
	second.extend((12..=14).map(NodeRecord::unplaced));

	SceneState {
		containers: vec![first, second],
		cameras: vec![CameraRecord::default(); 2],
		connections: vec![vec![(1, 2), (2, 3)], vec![(1, 2)]],
	}
}

/// One view holding a single unplaced node.
pub fn chat_scene() -> SceneState {
	SceneState {
		containers: vec![vec![NodeRecord::unplaced(1)]],
		cameras: vec![CameraRecord::default()],
		connections: vec![Vec::new()],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_state_falls_back_to_default() {
		assert_eq!(load_or_default(&MemoryStore::default()), default_scene());
	}

	#[test]
	fn garbage_falls_back_to_default() {
		for json in ["{not json", r#"{"containers":"nope"}"#, r#"{"containers":[]}"#, "[]"] {
			let store = MemoryStore::with_json(json);
			assert!(store.load().is_err(), "{json}");
			assert_eq!(load_or_default(&store), default_scene());
		}
	}

	#[test]
	fn saved_state_is_restored() {
		let store = MemoryStore::default();
		let mut state = default_scene();
		state.connections[1].push((3, 999));
		store.save(&state).unwrap();
		assert_eq!(load_or_default(&store), state);
	}

	#[test]
	fn chat_fallback_is_a_single_view() {
		let store = MemoryStore::with_json("{");
		let state = load_or(&store, chat_scene);
		assert_eq!(state, chat_scene());
		assert_eq!(state.container(0).nodes, vec![NodeRecord::unplaced(1)]);
		assert!(state.container(0).connections.is_empty());
	}

	#[test]
	fn default_scene_is_aligned() {
		let state = default_scene();
		assert_eq!(state.containers.len(), state.cameras.len());
		assert_eq!(state.containers.len(), state.connections.len());
		assert_eq!(state.containers[1].len(), 14);
		assert_eq!(state.containers[1][13], NodeRecord::unplaced(14));
	}
}
