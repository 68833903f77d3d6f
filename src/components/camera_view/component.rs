use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, TouchList, WheelEvent,
	Window,
};

use super::camera::WheelInput;
use super::config::CanvasConfig;
use super::geometry::Point;
use super::render;
use super::state::CanvasState;
use super::types::ContainerState;

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

fn touch_points(list: &TouchList) -> Vec<Point> {
	(0..list.length())
		.filter_map(|i| list.get(i))
		.map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
		.collect()
}

fn sync_origin(canvas: &HtmlCanvasElement, s: &mut CanvasState) {
	let rect = canvas.get_bounding_client_rect();
	s.set_origin(rect.left(), rect.top());
}

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

/// One pannable, zoomable view of a container. `on_change` receives a
/// snapshot at most once per animation frame, whenever something changed.
///
/// Moves and releases are taken from the window, so a drag or spawn that
/// leaves the canvas keeps going until the button is released.
#[component]
pub fn CameraViewCanvas(
	initial: ContainerState,
	#[prop(optional)] config: CanvasConfig,
	#[prop(optional, into)] on_change: Option<Callback<ContainerState>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let mouse_cbs: Rc<RefCell<Vec<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(Vec::new()));
	let (state_init, animate_init, resize_cb_init, mouse_cbs_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), mouse_cbs.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			warn!("2d canvas context unavailable");
			return;
		};
		let s = CanvasState::new(&initial, config, w, h);
		info!(
			"camera view ready: {} node(s), {} arrow(s)",
			s.scene.nodes().len(),
			s.routing.paths.len()
		);
		*state_init.borrow_mut() = Some(s);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_move, canvas_move) = (state_init.clone(), canvas.clone());
		let on_move: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
			if let Some(ref mut s) = *state_move.borrow_mut() {
				sync_origin(&canvas_move, s);
				s.pointer_move(client_point(&ev));
			}
		});
		let (state_up, canvas_up) = (state_init.clone(), canvas.clone());
		let on_up: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
			if let Some(ref mut s) = *state_up.borrow_mut() {
				sync_origin(&canvas_up, s);
				s.pointer_up(Some(client_point(&ev)));
			}
		});
		for (event, cb) in [("mousemove", &on_move), ("mouseup", &on_up)] {
			let _ = window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
		mouse_cbs_init.borrow_mut().extend([on_move, on_up]);

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.refresh().any() {
					render::render(s, &ctx);
					if let Some(cb) = on_change {
						cb.run(s.snapshot());
					}
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), &*animate_inner.borrow()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let sync = move |s: &mut CanvasState| {
		if let Some(canvas) = canvas_ref.get() {
			sync_origin(&canvas, s);
		}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(ref mut s) = *state_md.borrow_mut() {
			sync(s);
			s.pointer_down(client_point(&ev));
		}
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_ts.borrow_mut() {
			sync(s);
			s.touch_start(&touch_points(&ev.touches()));
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_tm.borrow_mut() {
			sync(s);
			s.touch_move(&touch_points(&ev.touches()));
		}
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_te.borrow_mut() {
			let released = touch_points(&ev.changed_touches()).first().copied();
			s.touch_end(&touch_points(&ev.touches()), released);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			sync(s);
			s.wheel(WheelInput {
				delta_x: ev.delta_x(),
				delta_y: ev.delta_y(),
				shift: ev.shift_key(),
				ctrl: ev.ctrl_key(),
				position: client_point(&ev),
			});
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="camera-view-canvas"
			on:mousedown=on_mousedown
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			on:wheel=on_wheel
			style="display: block; cursor: grab; touch-action: none; user-select: none;"
		/>
	}
}
