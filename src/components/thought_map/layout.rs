use super::config::ThoughtMapConfig;
use super::types::Position;

/// Position of the `index`-th loaded thought: row-major grid, never persisted.
pub fn grid_position(index: usize, config: &ThoughtMapConfig) -> Position {
	let columns = config.grid_columns.max(1);
	let (col, row) = ((index % columns) as f64, (index / columns) as f64);
	Position::new(
		col * config.column_spacing + config.grid_margin,
		row * config.row_spacing + config.grid_margin,
	)
}

/// Chooses where a newly added thought appears.
pub trait Placement {
	fn place(&mut self, config: &ThoughtMapConfig) -> Position;
}

impl<F: FnMut(&ThoughtMapConfig) -> Position> Placement for F {
	fn place(&mut self, config: &ThoughtMapConfig) -> Position {
		self(config)
	}
}

/// Scales two unit samples into the spawn rectangle.
pub fn spawn_position(config: &ThoughtMapConfig, u: f64, v: f64) -> Position {
	Position::new(
		config.spawn_origin.x + u * config.spawn_extent.x,
		config.spawn_origin.y + v * config.spawn_extent.y,
	)
}

/// Uniformly random spawn point from `Math.random()`. Browser only.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScatterPlacement;

impl Placement for ScatterPlacement {
	fn place(&mut self, config: &ThoughtMapConfig) -> Position {
		spawn_position(config, js_sys::Math::random(), js_sys::Math::random())
	}
}
