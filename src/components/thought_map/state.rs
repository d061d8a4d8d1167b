use std::collections::HashSet;

use log::{debug, info, warn};
use time::OffsetDateTime;
use uuid::Uuid;

use super::config::ThoughtMapConfig;
use super::layout::{Placement, grid_position};
use super::types::{GraphNode, Mode, Position};
use crate::document::{
	Category, Document, DocumentStore, ThoughtRecord, load_or_default, save_or_log,
};

/// Interaction state of the thought map.
///
/// Two views of the same graph are kept side by side and joined by id: the
/// persisted [`ThoughtRecord`]s behind `store`, re-read and re-written in full on
/// every structural change, and the session-only [`GraphNode`]s that carry
/// positions. Dragging only ever touches the latter.
pub struct ThoughtMapState<S, P> {
	store: S,
	placement: P,
	config: ThoughtMapConfig,
	nodes: Vec<GraphNode>,
	mode: Mode,
}

impl<S: DocumentStore, P: Placement> ThoughtMapState<S, P> {
	/// Builds nodes for every saved thought, laid out on a grid.
	pub fn load(store: S, placement: P, config: ThoughtMapConfig) -> Self {
		let document = load_or_default(&store);
		let nodes = build_nodes(&document, &config);
		info!("thought map loaded with {} nodes", nodes.len());

		Self {
			store,
			placement,
			config,
			nodes,
			mode: Mode::Idle,
		}
	}

	pub fn config(&self) -> &ThoughtMapConfig {
		&self.config
	}

	pub fn mode(&self) -> &Mode {
		&self.mode
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	pub fn node_ids(&self) -> Vec<String> {
		self.nodes.iter().map(|n| n.id.clone()).collect()
	}

	/// Nothing to draw; the view shows its empty-state hint.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The node that delete and connect act on.
	pub fn selected(&self) -> Option<&str> {
		match &self.mode {
			Mode::Idle => None,
			Mode::Selected(id) | Mode::Dragging { id, .. } | Mode::Connecting(id) => Some(id.as_str()),
		}
	}

	pub fn connecting_from(&self) -> Option<&str> {
		match &self.mode {
			Mode::Connecting(id) => Some(id.as_str()),
			_ => None,
		}
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.mode, Mode::Dragging { .. })
	}

	/// Directed edges whose endpoints are both on the map.
	pub fn edges(&self) -> Vec<(&GraphNode, &GraphNode)> {
		let mut edges = Vec::new();
		for source in &self.nodes {
			for target in &source.connections {
				if let Some(target) = self.node(target) {
					edges.push((source, target));
				}
			}
		}
		edges
	}

	/// Starts dragging `id`. Ignored while a connection is pending.
	pub fn pointer_down(&mut self, id: &str, pointer: Position) -> bool {
		if matches!(self.mode, Mode::Connecting(_)) {
			return false;
		}
		let Some(node) = self.node(id) else {
			debug!("pointer down on unknown node {id}");
			return false;
		};
		let offset = pointer.offset_from(node.position);
		self.mode = Mode::Dragging {
			id: id.to_string(),
			offset,
		};
		true
	}

	/// Moves the dragged node under the pointer. Visual only, nothing is saved.
	pub fn pointer_move(&mut self, pointer: Position) -> bool {
		let Mode::Dragging { id, offset } = &self.mode else {
			return false;
		};
		let (id, position) = (id.clone(), pointer.offset_from(*offset).clamp_non_negative());
		match self.node_mut(&id) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	pub fn pointer_up(&mut self) {
		if let Mode::Dragging { id, .. } = &self.mode {
			self.mode = Mode::Selected(id.clone());
		}
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
	}

	pub fn start_connecting(&mut self) -> bool {
		match &self.mode {
			Mode::Selected(id) => {
				self.mode = Mode::Connecting(id.clone());
				true
			}
			_ => false,
		}
	}

	/// Completes a pending connection; otherwise clicks are no-ops since
	/// selection already happened on pointer down.
	pub fn click_node(&mut self, id: &str) -> bool {
		if matches!(self.mode, Mode::Connecting(_)) {
			self.finish_connecting(id)
		} else {
			false
		}
	}

	pub fn click_away(&mut self) {
		if let Mode::Connecting(source) = &self.mode {
			debug!("connection from {source} cancelled");
			self.mode = Mode::Idle;
		}
	}

	/// Adds `source -> target_id` if absent and saves. Returns whether an edge was created.
	pub fn finish_connecting(&mut self, target_id: &str) -> bool {
		let Mode::Connecting(source) = &self.mode else {
			return false;
		};
		let source = source.clone();
		if source == target_id {
			debug!("self connection on {source} cancelled");
			self.mode = Mode::Idle;
			return false;
		}

		let mut document = load_or_default(&self.store);
		if document.thought(target_id).is_none() {
			warn!("cannot connect {source} to missing thought {target_id}");
			self.mode = Mode::Idle;
			return false;
		}
		let Some(record) = document.thought_mut(&source) else {
			warn!("cannot connect from missing thought {source}");
			self.mode = Mode::Idle;
			return false;
		};

		let created = !record.connections.iter().any(|c| c == target_id);
		if created {
			record.connections.push(target_id.to_string());
			record.updated_at = Some(OffsetDateTime::now_utc());
			save_or_log(&self.store, &document);
			info!("connected {source} -> {target_id}");
		}
		if let Some(node) = self.node_mut(&source) {
			if !node.connections.iter().any(|c| c == target_id) {
				node.connections.push(target_id.to_string());
			}
		}
		self.mode = Mode::Selected(source);
		created
	}

	/// Saves a new thought and drops its card at a placement-chosen spot.
	/// Blank content is refused. Returns the new id.
	pub fn add_thought(&mut self, content: &str, category: Category) -> Option<String> {
		if content.trim().is_empty() {
			debug!("refusing blank thought");
			return None;
		}

		let id = format!("thought-{}", Uuid::new_v4());
		let record = ThoughtRecord::new(
			id.clone(),
			content.to_string(),
			category,
			OffsetDateTime::now_utc(),
		);
		let mut document = load_or_default(&self.store);
		document.thoughts.push(record);
		save_or_log(&self.store, &document);

		let position = self.placement.place(&self.config);
		self.nodes.push(GraphNode {
			id: id.clone(),
			content: content.to_string(),
			category,
			position,
			connections: Vec::new(),
		});
		info!("added {category} thought {id}");
		Some(id)
	}

	/// Removes the selection everywhere, including inbound edges. Returns the removed id.
	pub fn delete_selected(&mut self) -> Option<String> {
		let id = self.selected()?.to_string();

		let mut document = load_or_default(&self.store);
		document.remove_thought(&id);
		save_or_log(&self.store, &document);

		self.nodes.retain(|n| n.id != id);
		for node in &mut self.nodes {
			node.connections.retain(|c| *c != id);
		}
		self.mode = Mode::Idle;
		info!("deleted thought {id}");
		Some(id)
	}
}

fn build_nodes(document: &Document, config: &ThoughtMapConfig) -> Vec<GraphNode> {
	let known: HashSet<&str> = document.thoughts.iter().map(|t| t.id.as_str()).collect();

	document
		.thoughts
		.iter()
		.enumerate()
		.map(|(i, thought)| {
			let mut seen = HashSet::new();
			let connections: Vec<String> = thought
				.connections
				.iter()
				.filter(|c| known.contains(c.as_str()) && seen.insert(c.as_str()))
				.cloned()
				.collect();
			if connections.len() != thought.connections.len() {
				warn!(
					"dropped {} stale connections from {}",
					thought.connections.len() - connections.len(),
					thought.id
				);
			}
			GraphNode {
				id: thought.id.clone(),
				content: thought.content.clone(),
				category: thought.category,
				position: grid_position(i, config),
				connections,
			}
		})
		.collect()
}
