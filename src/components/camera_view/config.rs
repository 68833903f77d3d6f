use super::geometry::Size;
use super::routing::RouterConfig;

/// How big a node is drawn. Sizes are never persisted, so they must be
/// reproducible from the node's place in its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeSizing {
	Fixed(Size),
	/// Fixed width, height picked per node from `[min_height, max_height]`.
	Varied {
		width: f64,
		min_height: f64,
		max_height: f64,
	},
}

impl Default for NodeSizing {
	fn default() -> Self {
		NodeSizing::Fixed(Size::new(50.0, 50.0))
	}
}

/// Deterministic pseudo-random value in `[0, 1)`.
fn rand_simple(seed: usize) -> f64 {
	let x = (seed as u64)
		.wrapping_add(1)
		.wrapping_mul(9301)
		.wrapping_add(49297)
		% 233280;
	(x as f64) / 233280.0
}

impl NodeSizing {
	/// Size of the node at `index`. Nodes are only ever appended, so the
	/// index survives saving and reloading where an id may not.
	pub fn measure(&self, index: usize) -> Size {
		match *self {
			NodeSizing::Fixed(size) => size,
			NodeSizing::Varied {
				width,
				min_height,
				max_height,
			} => {
				let span = (max_height - min_height).max(0.0);
				Size::new(width, (min_height + span * rand_simple(index)).round())
			}
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasConfig {
	pub router: RouterConfig,
	pub sizing: NodeSizing,
	/// Vertical gap between auto-stacked nodes.
	pub stack_gap: f64,
	/// Distance below the source center where a clicked plus control puts the new node.
	pub spawn_offset: f64,
	pub plus_radius: f64,
	/// Gap between a node's bottom edge and its plus control.
	pub plus_gap: f64,
	/// Percent of scale change per wheel delta unit while zooming.
	pub zoom_intensity: f64,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			router: RouterConfig::default(),
			sizing: NodeSizing::default(),
			stack_gap: 10.0,
			spawn_offset: 120.0,
			plus_radius: 9.0,
			plus_gap: 6.0,
			zoom_intensity: 0.6,
		}
	}
}
