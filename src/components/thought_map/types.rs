use crate::document::Category;

/// Container-relative pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset_from(self, origin: Position) -> Position {
		Position::new(self.x - origin.x, self.y - origin.y)
	}

	pub fn clamp_non_negative(self) -> Position {
		Position::new(self.x.max(0.0), self.y.max(0.0))
	}
}

/// Session-only view of a thought; rebuilt from the document on every load.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub content: String,
	pub category: Category,
	pub position: Position,
	pub connections: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Mode {
	#[default]
	Idle,
	Selected(String),
	Dragging {
		id: String,
		offset: Position,
	},
	Connecting(String),
}
