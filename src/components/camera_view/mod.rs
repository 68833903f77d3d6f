pub mod camera;
mod component;
pub mod config;
pub mod drag;
pub mod geometry;
pub mod overlay;
mod render;
pub mod routing;
pub mod scene;
pub mod state;
pub mod storage;
pub mod types;

pub use component::CameraViewCanvas;
pub use config::{CanvasConfig, NodeSizing};
pub use storage::{LocalStorageStore, SceneStore, load_or, load_or_default};
pub use types::{ContainerState, SceneState};
