use super::types::Position;

/// Geometry of the thought map.
#[derive(Clone, Debug, PartialEq)]
pub struct ThoughtMapConfig {
	/// Cards per row when laying out a loaded document.
	pub grid_columns: usize,
	pub column_spacing: f64,
	pub row_spacing: f64,
	pub grid_margin: f64,
	/// New cards land uniformly in `spawn_origin .. spawn_origin + spawn_extent`.
	pub spawn_origin: Position,
	pub spawn_extent: Position,
	pub card_width: f64,
	/// Where edges attach, relative to a card's top-left corner.
	pub card_anchor: Position,
	pub preview_chars: usize,
}

impl Default for ThoughtMapConfig {
	fn default() -> Self {
		Self {
			grid_columns: 5,
			column_spacing: 250.0,
			row_spacing: 200.0,
			grid_margin: 50.0,
			spawn_origin: Position::new(100.0, 100.0),
			spawn_extent: Position::new(400.0, 300.0),
			card_width: 200.0,
			card_anchor: Position::new(100.0, 40.0),
			preview_chars: 80,
		}
	}
}
