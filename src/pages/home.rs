use leptos::prelude::*;
use log::warn;

use crate::components::camera_view::{
	CameraViewCanvas, CanvasConfig, ContainerState, LocalStorageStore, NodeSizing, SceneStore,
	load_or_default,
};

/// Every second view uses tall, uneven boxes so stacked routes are easy to see.
fn config_for(index: usize) -> CanvasConfig {
	if index % 2 == 1 {
		CanvasConfig {
			sizing: NodeSizing::Varied {
				width: 50.0,
				min_height: 60.0,
				max_height: 200.0,
			},
			..Default::default()
		}
	} else {
		CanvasConfig::default()
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let store = LocalStorageStore::default();
	let scene = StoredValue::new(load_or_default(&store));
	let views: Vec<ContainerState> =
		scene.with_value(|s| (0..s.containers.len()).map(|i| s.container(i)).collect());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="camera-views">
				<div class="graph-overlay">
					<h1>"Camera Views"</h1>
					<p class="subtitle">
						"Drag boxes to move them. Click or drag a + to add a connected box. Scroll to pan, ctrl+scroll or pinch to zoom."
					</p>
				</div>
				{views
					.into_iter()
					.enumerate()
					.map(|(index, initial)| {
						let store = store.clone();
						let on_change = Callback::new(move |snapshot: ContainerState| {
							scene.update_value(|s| s.set_container(index, snapshot));
							scene
								.with_value(|s| {
									if let Err(e) = store.save(s) {
										warn!("could not save scene: {}", e);
									}
								});
						});
						view! {
							<div
								class="camera-view-container"
								style="position: relative; overflow: hidden; height: 45vh; margin: 8px; border: 1px solid #ccc;"
							>
								<CameraViewCanvas
									initial=initial
									config=config_for(index)
									on_change=on_change
								/>
							</div>
						}
					})
					.collect_view()}
			</div>
		</ErrorBoundary>
	}
}
