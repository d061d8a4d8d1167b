use leptos::prelude::*;
use time::{OffsetDateTime, UtcOffset};

use crate::components::navigation::Navigation;
use crate::document::{LocalStorageStore, Summary, load_or_default};

fn stat_card(label: &'static str, value: String) -> impl IntoView {
	view! {
		<div class="card stat">
			<p class="muted">{label}</p>
			<p class="stat-value">{value}</p>
		</div>
	}
}

/// The browser's current UTC offset. `getTimezoneOffset` counts minutes west of UTC.
fn local_offset() -> UtcOffset {
	let minutes_west = js_sys::Date::new_0().get_timezone_offset();
	UtcOffset::from_whole_seconds(-(minutes_west * 60.0) as i32).unwrap_or(UtcOffset::UTC)
}

/// Dashboard: counts and the latest entries from the saved document.
#[component]
pub fn Home() -> impl IntoView {
	let local = local_offset();
	let summary = Summary::of(
		&load_or_default(&LocalStorageStore::default()),
		OffsetDateTime::now_utc().to_offset(local).date(),
		local,
	);

	let recent_thoughts = if summary.recent_thoughts.is_empty() {
		view! { <p class="muted empty">"No thoughts yet. Start mapping your mind!"</p> }.into_any()
	} else {
		summary
			.recent_thoughts
			.iter()
			.map(|thought| {
				view! {
					<div class="entry">
						<div class="entry-header">
							<span class="pill">{thought.category.as_str()}</span>
							<span class="muted">{thought.created_at.date().to_string()}</span>
						</div>
						<p>{thought.content.clone()}</p>
					</div>
				}
			})
			.collect_view()
			.into_any()
	};

	let recent_emotions = if summary.recent_emotions.is_empty() {
		view! { <p class="muted empty">"No emotions logged today. How are you feeling?"</p> }
			.into_any()
	} else {
		summary
			.recent_emotions
			.iter()
			.map(|emotion| {
				let bars = (0..10)
					.map(|i| {
						let class = if f64::from(i) < emotion.intensity { "bar filled" } else { "bar" };
						view! { <div class=class></div> }
					})
					.collect_view();
				view! {
					<div class="entry">
						<div class="entry-header">
							<span class="capitalize">{emotion.kind.as_str()}</span>
							<div class="intensity">{bars}</div>
						</div>
						{emotion.note.clone().map(|note| view! { <p class="muted">{note}</p> })}
					</div>
				}
			})
			.collect_view()
			.into_any()
	};

	view! {
		<Navigation />
		<main class="container">
			<div class="page-heading">
				<h2 class="gradient-text">"Welcome to Your Mind"</h2>
				<p class="muted">"Your personal mental operating system is ready"</p>
			</div>

			<div class="stats">
				{stat_card("Active Thoughts", summary.thought_count.to_string())}
				{stat_card("Today's Emotions", summary.today_emotion_count.to_string())}
				{stat_card(
					"Daily Sync",
					if summary.synced_today { "Complete" } else { "Pending" }.to_string(),
				)}
				{stat_card("Total Syncs", summary.sync_count.to_string())}
			</div>

			<div class="panels">
				<div class="card">
					<h3>"Recent Thoughts"</h3>
					{recent_thoughts}
				</div>
				<div class="card">
					<h3>"Emotional Pulse"</h3>
					{recent_emotions}
				</div>
			</div>
		</main>
	}
}
