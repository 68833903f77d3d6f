use leptos::prelude::*;
use log::warn;

use crate::components::camera_view::storage::{CHAT_STORAGE_KEY, chat_scene};
use crate::components::camera_view::{
	CameraViewCanvas, CanvasConfig, ContainerState, LocalStorageStore, NodeSizing, SceneStore,
	load_or,
};

/// A single fullscreen view with its own saved state.
#[component]
pub fn Chat() -> impl IntoView {
	let store = LocalStorageStore::new(CHAT_STORAGE_KEY);
	let scene = StoredValue::new(load_or(&store, chat_scene));
	let initial = scene.with_value(|s| s.container(0));
	let config = CanvasConfig {
		sizing: NodeSizing::Varied {
			width: 50.0,
			min_height: 60.0,
			max_height: 200.0,
		},
		..Default::default()
	};

	let on_change = Callback::new(move |snapshot: ContainerState| {
		scene.update_value(|s| s.set_container(0, snapshot));
		scene.with_value(|s| {
			if let Err(e) = store.save(s) {
				warn!("could not save chat canvas: {}", e);
			}
		});
	});

	view! {
		<div class="camera-view-container" style="position: fixed; inset: 0; overflow: hidden;">
			<CameraViewCanvas initial=initial config=config on_change=on_change fullscreen=true />
		</div>
	}
}
