use std::f64::consts::PI;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::geometry::Point;
use super::overlay::Primitive;
use super::state::CanvasState;

const BACKGROUND: &str = "#f7f7f2";
const NODE_FILL: &str = "#ffffff";
const NODE_STROKE: &str = "#3a3a48";
const ARROW: &str = "#2f6fb0";
const PLUS_FILL: &str = "#e9eef5";

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let (tx, ty, k) = state.scene.camera.canvas_transform();
	let _ = ctx.translate(tx, ty);
	let _ = ctx.scale(k, k);
	draw_arrows(state, ctx);
	draw_nodes(state, ctx);
	draw_spawn_preview(state, ctx);
	ctx.restore();
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip: Point, dir: Point, size: f64) {
	if dir == Point::ZERO {
		return;
	}
	let back = tip - dir * size;
	let side = Point::new(-dir.y, dir.x) * (size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back.x + side.x, back.y + side.y);
	ctx.line_to(back.x - side.x, back.y - side.y);
	ctx.close_path();
	ctx.fill();
}

fn draw_arrows(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let Some(overlay) = &state.overlay else {
		return;
	};
	let k = state.scene.camera.scale;
	let (line_width, arrow_size) = (1.5 / k, 8.0 / k);

	ctx.save();
	let _ = ctx.translate(overlay.origin.x, overlay.origin.y);
	ctx.set_stroke_style_str(ARROW);
	ctx.set_fill_style_str(ARROW);
	ctx.set_line_width(line_width);

	for primitive in &overlay.primitives {
		match primitive {
			Primitive::Line { start, end, .. } => {
				ctx.begin_path();
				ctx.move_to(start.x, start.y);
				ctx.line_to(end.x, end.y);
				ctx.stroke();
				draw_arrowhead(ctx, *end, (*end - *start).normalized(), arrow_size);
			}
			Primitive::Path {
				from,
				to,
				data,
				end,
				tangent,
			} => match Path2d::new_with_path_string(data) {
				Ok(path) => {
					ctx.stroke_with_path(&path);
					draw_arrowhead(ctx, *end, *tangent, arrow_size);
				}
				Err(e) => debug!("skipping arrow {}->{}: {:?}", from, to, e),
			},
		}
	}
	ctx.restore();
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.scene.camera.scale;
	let radius = state.config.plus_radius;
	ctx.set_line_width(1.0 / k);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in state.scene.nodes() {
		let r = node.rect();
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill_rect(r.x, r.y, r.width, r.height);
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.stroke_rect(r.x, r.y, r.width, r.height);

		let c = r.center();
		if let Some(id) = node.id {
			ctx.set_fill_style_str(NODE_STROKE);
			ctx.set_font("12px sans-serif");
			let _ = ctx.fill_text(&id.to_string(), c.x, c.y);
		}

		let plus = state.plus_center(node);
		ctx.begin_path();
		let _ = ctx.arc(plus.x, plus.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(PLUS_FILL);
		ctx.fill();
		ctx.stroke();
		ctx.set_fill_style_str(NODE_STROKE);
		ctx.set_font(&format!("{}px sans-serif", radius * 1.6));
		let _ = ctx.fill_text("+", plus.x, plus.y);
	}
}

fn draw_spawn_preview(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let Some((from, to)) = state.spawn_preview() else {
		return;
	};
	let k = state.scene.camera.scale;
	ctx.set_stroke_style_str(ARROW);
	ctx.set_line_width(1.5 / k);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0 / k),
		&JsValue::from_f64(4.0 / k),
	));
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}
