use leptos::prelude::*;

use crate::components::navigation::Navigation;
use crate::components::thought_map::ThoughtMap;

#[component]
pub fn Thoughts() -> impl IntoView {
	view! {
		<Navigation />
		<main class="container">
			<div class="page-heading">
				<h2 class="gradient-text">"Thought Map"</h2>
				<p class="muted">"Visualize and connect your ideas"</p>
			</div>
			<ThoughtMap />
		</main>
	}
}
