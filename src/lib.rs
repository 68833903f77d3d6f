//! Pannable, zoomable canvases of boxes joined by orthogonal arrows.
//!
//! The app serves two pages: `/` with every saved camera view stacked
//! vertically, and `/chat` with a single fullscreen view.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

pub use crate::components::camera_view;

use crate::pages::chat::Chat;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Route `log` to the browser console and print panics there.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("arrow canvas starting");
}

#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Arrow Canvas" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/chat") view=Chat />
			</Routes>
		</Router>
	}
}
