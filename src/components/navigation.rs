use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

const NAV_ITEMS: &[(&str, &str)] = &[("/", "Dashboard"), ("/thoughts", "Thought Map")];

/// Fixed top bar linking the routed pages.
#[component]
pub fn Navigation() -> impl IntoView {
	let pathname = use_location().pathname;

	view! {
		<nav class="navigation">
			<A href="/" attr:class="brand">
				"LifeOS"
			</A>
			<div class="nav-links">
				{NAV_ITEMS
					.iter()
					.map(|&(href, label)| {
						let active = move || pathname.get() == href;
						view! {
							<A href=href attr:class=move || if active() { "nav-link active" } else { "nav-link" }>
								{label}
							</A>
						}
					})
					.collect_view()}
			</div>
		</nav>
	}
}
