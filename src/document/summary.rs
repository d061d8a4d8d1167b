use time::{Date, OffsetDateTime, UtcOffset};

use super::types::{Document, Emotion, ThoughtRecord};

const RECENT: usize = 5;

/// Dashboard figures for one local calendar day.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
	pub thought_count: usize,
	pub today_emotion_count: usize,
	pub synced_today: bool,
	pub sync_count: usize,
	/// Newest first.
	pub recent_thoughts: Vec<ThoughtRecord>,
	/// Today's, newest first.
	pub recent_emotions: Vec<Emotion>,
}

impl Summary {
	/// `today` is a date in the `local` offset; timestamps are shifted into it before comparing.
	pub fn of(document: &Document, today: Date, local: UtcOffset) -> Self {
		let on_today = |at: OffsetDateTime| at.to_offset(local).date() == today;
		let today_emotions: Vec<Emotion> = document
			.emotions()
			.filter(|e| on_today(e.timestamp))
			.collect();

		Self {
			thought_count: document.thoughts.len(),
			today_emotion_count: today_emotions.len(),
			synced_today: document.syncs().any(|s| on_today(s.date)),
			sync_count: document.syncs.len(),
			recent_thoughts: document.thoughts.iter().rev().take(RECENT).cloned().collect(),
			recent_emotions: today_emotions.into_iter().rev().take(RECENT).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use time::macros::{date, offset};

	use super::*;
	use crate::document::types::Category;

	fn emotion(id: &str, at: &str) -> serde_json::Value {
		json!({ "id": id, "type": "joy", "intensity": 6, "timestamp": at })
	}

	#[test]
	fn counts_only_todays_emotions_and_syncs() {
		let mut doc = Document::default();
		doc.emotions = vec![
			emotion("e1", "2024-05-01T23:59:00Z"),
			emotion("e2", "2024-05-02T12:00:00Z"),
			emotion("e3", "2024-05-02T12:30:00Z"),
		];
		doc.syncs
			.push(json!({ "id": "s1", "date": "2024-05-01T23:00:00Z", "completed": true }));

		let summary = Summary::of(&doc, date!(2024-05-02), UtcOffset::UTC);
		assert_eq!(summary.today_emotion_count, 2);
		assert_eq!(summary.recent_emotions[0].id, "e3");
		assert!(!summary.synced_today);
		assert_eq!(summary.sync_count, 1);
		assert!(Summary::of(&doc, date!(2024-05-01), UtcOffset::UTC).synced_today);
	}

	#[test]
	fn today_follows_the_local_calendar_day() {
		let mut doc = Document::default();
		// 02:00 UTC on the 2nd is still the evening of the 1st five hours west.
		doc.emotions = vec![emotion("late", "2024-05-02T02:00:00Z")];
		doc.syncs.push(json!({ "id": "s1", "date": "2024-05-02T03:30:00Z" }));

		let west = offset!(-5);
		let local = Summary::of(&doc, date!(2024-05-01), west);
		assert_eq!(local.today_emotion_count, 1);
		assert!(local.synced_today);

		let utc_day = Summary::of(&doc, date!(2024-05-02), west);
		assert_eq!(utc_day.today_emotion_count, 0);
		assert!(!utc_day.synced_today);
	}

	#[test]
	fn unreadable_entries_are_not_counted_as_today() {
		let mut doc = Document::default();
		doc.emotions = vec![
			emotion("ok", "2024-05-02T12:00:00Z"),
			json!({ "id": "odd", "type": "boredom", "timestamp": "2024-05-02T12:00:00Z" }),
		];
		doc.syncs.push(json!({ "id": "no-date" }));

		let summary = Summary::of(&doc, date!(2024-05-02), UtcOffset::UTC);
		assert_eq!(summary.today_emotion_count, 1);
		assert!(!summary.synced_today);
		assert_eq!(summary.sync_count, 1);
	}

	#[test]
	fn recent_thoughts_are_last_five_newest_first() {
		let mut doc = Document::default();
		for i in 0..7 {
			doc.thoughts.push(ThoughtRecord::new(
				format!("t{i}"),
				format!("thought {i}"),
				Category::Task,
				OffsetDateTime::UNIX_EPOCH,
			));
		}
		let summary = Summary::of(&doc, OffsetDateTime::UNIX_EPOCH.date(), UtcOffset::UTC);
		assert_eq!(summary.thought_count, 7);
		let ids: Vec<_> = summary.recent_thoughts.iter().map(|t| t.id.as_str()).collect();
		assert_eq!(ids, ["t6", "t5", "t4", "t3", "t2"]);
	}
}
