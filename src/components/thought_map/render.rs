use super::config::ThoughtMapConfig;
use super::types::{GraphNode, Position};
use crate::document::Category;

pub fn category_color(category: Category) -> &'static str {
	match category {
		Category::Idea => "oklch(0.65 0.19 220)",
		Category::Goal => "oklch(0.65 0.19 280)",
		Category::Memory => "oklch(0.65 0.19 180)",
		Category::Question => "oklch(0.65 0.19 320)",
		Category::Insight => "oklch(0.65 0.19 60)",
		Category::Task => "oklch(0.65 0.19 140)",
	}
}

/// One connection line, anchor to anchor, stroked in the source's colour.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLine {
	pub from: Position,
	pub to: Position,
	pub color: &'static str,
}

pub fn edge_line(source: &GraphNode, target: &GraphNode, config: &ThoughtMapConfig) -> EdgeLine {
	let anchor = |p: Position| Position::new(p.x + config.card_anchor.x, p.y + config.card_anchor.y);
	EdgeLine {
		from: anchor(source.position),
		to: anchor(target.position),
		color: category_color(source.category),
	}
}

/// Card text, cut to `max_chars` characters with a trailing ellipsis.
pub fn preview(content: &str, max_chars: usize) -> String {
	match content.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}...", &content[..cut]),
		None => content.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	fn node(id: &str, category: Category, x: f64, y: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			content: String::new(),
			category,
			position: Position::new(x, y),
			connections: Vec::new(),
		}
	}

	#[test]
	fn edges_join_card_anchors() {
		let config = ThoughtMapConfig::default();
		let line = edge_line(
			&node("a", Category::Goal, 0.0, 0.0),
			&node("b", Category::Idea, 250.0, 200.0),
			&config,
		);
		assert_eq!(line.from, Position::new(100.0, 40.0));
		assert_eq!(line.to, Position::new(350.0, 240.0));
		assert_eq!(line.color, "oklch(0.65 0.19 280)");
	}

	#[test]
	fn preview_cuts_long_content_on_char_boundaries() {
		assert_eq!(preview("short", 80), "short");
		let exact = "x".repeat(80);
		assert_eq!(preview(&exact, 80), exact);
		let long = "é".repeat(81);
		assert_eq!(preview(&long, 80), format!("{}...", "é".repeat(80)));
	}

	#[test]
	fn every_category_has_a_distinct_color() {
		let colors: HashSet<_> = Category::ALL.into_iter().map(category_color).collect();
		assert_eq!(colors.len(), Category::ALL.len());
	}
}
