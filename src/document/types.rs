use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use time::OffsetDateTime;

/// Kind of thought shown on the map. Unknown strings read back as [`Category::Idea`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
	#[default]
	Idea,
	Goal,
	Memory,
	Question,
	Insight,
	Task,
}

impl Category {
	pub const ALL: [Category; 6] = [
		Category::Idea,
		Category::Goal,
		Category::Memory,
		Category::Question,
		Category::Insight,
		Category::Task,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Category::Idea => "idea",
			Category::Goal => "goal",
			Category::Memory => "memory",
			Category::Question => "question",
			Category::Insight => "insight",
			Category::Task => "task",
		}
	}
}

impl FromStr for Category {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Category::ALL
			.into_iter()
			.find(|c| c.as_str() == s)
			.ok_or_else(|| format!("unknown category `{s}`"))
	}
}

impl From<String> for Category {
	fn from(s: String) -> Self {
		s.parse().unwrap_or_default()
	}
}

impl From<Category> for &'static str {
	fn from(c: Category) -> Self {
		c.as_str()
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A persisted thought. Fields written by other builds survive in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRecord {
	pub id: String,
	pub content: String,
	pub category: Category,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<OffsetDateTime>,
	#[serde(default)]
	pub connections: Vec<String>,
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

impl ThoughtRecord {
	pub fn new(id: String, content: String, category: Category, now: OffsetDateTime) -> Self {
		Self {
			id,
			content,
			category,
			created_at: now,
			updated_at: Some(now),
			connections: Vec::new(),
			extra: BTreeMap::new(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionKind {
	Joy,
	Sadness,
	Anger,
	Fear,
	Surprise,
	Neutral,
}

impl EmotionKind {
	pub fn as_str(self) -> &'static str {
		match self {
			EmotionKind::Joy => "joy",
			EmotionKind::Sadness => "sadness",
			EmotionKind::Anger => "anger",
			EmotionKind::Fear => "fear",
			EmotionKind::Surprise => "surprise",
			EmotionKind::Neutral => "neutral",
		}
	}
}

/// Read-only view of one entry in [`Document::emotions`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Emotion {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: EmotionKind,
	/// 1 to 10.
	#[serde(default)]
	pub intensity: f64,
	#[serde(default)]
	pub note: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}

/// Read-only view of one daily check-in in [`Document::syncs`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MentalSync {
	pub id: String,
	#[serde(with = "time::serde::rfc3339")]
	pub date: OffsetDateTime,
	#[serde(default)]
	pub completed: bool,
}

/// The single root object kept in local storage.
///
/// Only `thoughts` is edited here. The other sections belong to the emotion
/// tracker, the daily sync and the dashboard layout, and are carried as raw JSON
/// so that entries this build does not understand are written back untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
	pub thoughts: Vec<ThoughtRecord>,
	pub emotions: Vec<Value>,
	pub syncs: Vec<Value>,
	pub widgets: Vec<Value>,
	pub settings: Value,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

fn unit_widget(id: &str, kind: &str, x: u32) -> Value {
	json!({
		"id": id,
		"type": kind,
		"position": { "x": x, "y": 0 },
		"size": { "width": 1, "height": 1 },
		"visible": true,
	})
}

impl Default for Document {
	fn default() -> Self {
		Self {
			thoughts: Vec::new(),
			emotions: Vec::new(),
			syncs: Vec::new(),
			widgets: vec![
				unit_widget("widget-1", "thought-count", 0),
				unit_widget("widget-2", "emotion-tracker", 1),
				unit_widget("widget-3", "focus-timer", 2),
			],
			settings: json!({
				"theme": "dark",
				"notifications": true,
				"syncReminder": true,
				"syncTime": "09:00",
			}),
			extra: Map::new(),
		}
	}
}

impl Document {
	pub fn thought(&self, id: &str) -> Option<&ThoughtRecord> {
		self.thoughts.iter().find(|t| t.id == id)
	}

	pub fn thought_mut(&mut self, id: &str) -> Option<&mut ThoughtRecord> {
		self.thoughts.iter_mut().find(|t| t.id == id)
	}

	/// Drops the thought and every connection pointing at it. Returns whether it existed.
	pub fn remove_thought(&mut self, id: &str) -> bool {
		let before = self.thoughts.len();
		self.thoughts.retain(|t| t.id != id);
		for thought in &mut self.thoughts {
			thought.connections.retain(|c| c != id);
		}
		self.thoughts.len() != before
	}

	/// Emotions in storage order; entries that do not parse are skipped.
	pub fn emotions(&self) -> impl Iterator<Item = Emotion> + '_ {
		self.emotions.iter().filter_map(|v| parse_entry(v, "emotion"))
	}

	pub fn syncs(&self) -> impl Iterator<Item = MentalSync> + '_ {
		self.syncs.iter().filter_map(|v| parse_entry(v, "sync"))
	}
}

fn parse_entry<'de, T: Deserialize<'de>>(value: &'de Value, what: &str) -> Option<T> {
	T::deserialize(value)
		.map_err(|err| debug!("skipping unreadable {what}: {err}"))
		.ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_document_has_three_widgets_and_dark_theme() {
		let doc = Document::default();
		assert!(doc.thoughts.is_empty());
		assert_eq!(doc.widgets.len(), 3);
		assert_eq!(doc.widgets[2]["type"], "focus-timer");
		assert_eq!(doc.widgets[2]["position"]["x"], 2);
		assert_eq!(doc.settings["theme"], "dark");
		assert_eq!(doc.settings["syncTime"], "09:00");
	}

	#[test]
	fn missing_fields_fall_back_to_defaults() {
		let doc: Document = serde_json::from_str(r#"{"thoughts":[]}"#).unwrap();
		assert_eq!(doc, Document::default());
	}

	#[test]
	fn reads_records_written_by_older_builds() {
		let json = r#"{
			"thoughts": [{
				"id": "thought-1",
				"content": "plant tomatoes",
				"category": "note",
				"priority": "high",
				"tags": ["garden"],
				"createdAt": "2024-05-01T10:00:00.000Z"
			}]
		}"#;
		let doc: Document = serde_json::from_str(json).unwrap();
		let thought = &doc.thoughts[0];
		assert_eq!(thought.category, Category::Idea);
		assert!(thought.connections.is_empty());
		assert!(thought.updated_at.is_none());
		assert_eq!(thought.extra["priority"], "high");

		let written = serde_json::to_value(&doc).unwrap();
		assert_eq!(written["thoughts"][0]["tags"][0], "garden");
		assert_eq!(written["thoughts"][0]["category"], "idea");
	}

	#[test]
	fn categories_serialize_lowercase() {
		for category in Category::ALL {
			let json = serde_json::to_string(&category).unwrap();
			assert_eq!(json, format!("\"{category}\""));
			assert_eq!(serde_json::from_str::<Category>(&json).unwrap(), category);
		}
	}

	#[test]
	fn remove_thought_sweeps_connections() {
		let now = OffsetDateTime::UNIX_EPOCH;
		let mut doc = Document::default();
		for id in ["a", "b", "c"] {
			doc.thoughts
				.push(ThoughtRecord::new(id.into(), id.into(), Category::Idea, now));
		}
		doc.thought_mut("a").unwrap().connections = vec!["b".into(), "c".into()];
		doc.thought_mut("c").unwrap().connections = vec!["b".into()];

		assert!(doc.remove_thought("b"));
		assert!(!doc.remove_thought("b"));
		assert_eq!(doc.thought("a").unwrap().connections, vec!["c".to_string()]);
		assert!(doc.thought("c").unwrap().connections.is_empty());
	}

	#[test]
	fn sections_owned_elsewhere_round_trip_untouched() {
		let json = r#"{
			"thoughts": [],
			"emotions": [
				{"id": "e1", "type": "joy", "intensity": 4, "timestamp": "2024-05-01T10:00:00.000Z", "location": "home"},
				{"id": "e2", "type": "boredom", "intensity": 2, "timestamp": "2024-05-01T11:00:00.000Z"}
			],
			"syncs": [{"id": "s1", "date": "2024-05-01T08:00:00.000Z"}],
			"settings": {"theme": "solarized", "syncTime": 9},
			"focusSessions": [1, 2]
		}"#;
		let doc: Document = serde_json::from_str(json).unwrap();
		let written = serde_json::to_value(&doc).unwrap();
		let original: Value = serde_json::from_str(json).unwrap();

		assert_eq!(written["emotions"], original["emotions"]);
		assert_eq!(written["syncs"], original["syncs"]);
		assert_eq!(written["settings"], original["settings"]);
		assert_eq!(written["focusSessions"], json!([1, 2]));
		assert_eq!(written["widgets"], serde_json::to_value(Document::default().widgets).unwrap());
	}

	#[test]
	fn typed_views_skip_unreadable_entries() {
		let doc: Document = serde_json::from_value(json!({
			"emotions": [
				{"id": "e1", "type": "fear", "intensity": 7, "timestamp": "2024-05-01T10:00:00Z"},
				{"id": "e2", "type": "boredom", "timestamp": "2024-05-01T10:00:00Z"},
				"not an object"
			],
			"syncs": [{"id": "s1"}, {"id": "s2", "date": "2024-05-01T08:00:00Z"}]
		}))
		.unwrap();

		let emotions: Vec<_> = doc.emotions().collect();
		assert_eq!(emotions.len(), 1);
		assert_eq!(emotions[0].kind.as_str(), "fear");
		assert_eq!(emotions[0].intensity, 7.0);
		let syncs: Vec<_> = doc.syncs().map(|s| s.id).collect();
		assert_eq!(syncs, ["s2"]);
		assert_eq!(doc.emotions.len(), 3);
	}
}
