use leptos::html::Div;
use leptos::prelude::*;
use web_sys::MouseEvent;

use super::config::ThoughtMapConfig;
use super::layout::ScatterPlacement;
use super::render::{category_color, edge_line, preview};
use super::state::ThoughtMapState;
use super::types::Position;
use crate::document::{Category, LocalStorageStore};

type BrowserMap = ThoughtMapState<LocalStorageStore, ScatterPlacement>;

/// Pointer position relative to the map's container.
fn pointer_in(container: NodeRef<Div>, ev: &MouseEvent) -> Option<Position> {
	let container = container.get_untracked()?;
	let rect = container.get_bounding_client_rect();
	Some(Position::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ThoughtMap(#[prop(optional)] config: Option<ThoughtMapConfig>) -> impl IntoView {
	let map = RwSignal::new(BrowserMap::load(
		LocalStorageStore::default(),
		ScatterPlacement,
		config.unwrap_or_default(),
	));
	let container = NodeRef::<Div>::new();

	let (adding, set_adding) = signal(false);
	let (content, set_content) = signal(String::new());
	let (category, set_category) = signal(Category::Idea);

	let connecting = move || map.with(|m| m.connecting_from().is_some());
	let has_selection = move || map.with(|m| m.selected().is_some());

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let mut added = None;
		map.update(|m| added = m.add_thought(&content.get_untracked(), category.get_untracked()));
		if added.is_some() {
			set_content.set(String::new());
			set_category.set(Category::Idea);
			set_adding.set(false);
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if !map.with_untracked(|m| m.is_dragging()) {
			return;
		}
		if let Some(p) = pointer_in(container, &ev) {
			map.update(|m| {
				m.pointer_move(p);
			});
		}
	};

	let on_mouseup = move |_: MouseEvent| {
		if map.with_untracked(|m| m.is_dragging()) {
			map.update(|m| m.pointer_up());
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		if map.with_untracked(|m| m.is_dragging()) {
			map.update(|m| m.pointer_leave());
		}
	};

	// Card clicks stop propagating, so anything reaching here missed every card.
	let on_click = move |_: MouseEvent| {
		if map.with_untracked(|m| m.connecting_from().is_some()) {
			map.update(|m| m.click_away());
		}
	};

	let edges = move || {
		map.with(|m| {
			m.edges()
				.into_iter()
				.map(|(source, target)| edge_line(source, target, m.config()))
				.map(|line| {
					view! {
						<line
							x1=line.from.x.to_string()
							y1=line.from.y.to_string()
							x2=line.to.x.to_string()
							y2=line.to.y.to_string()
							stroke=line.color
							stroke-width="2"
							stroke-opacity="0.5"
							stroke-dasharray="5,5"
						/>
					}
				})
				.collect_view()
		})
	};

	view! {
		<div class="thought-map card">
			<div class="thought-map-toolbar">
				<div class="thought-map-actions">
					<button class="button" on:click=move |_| set_adding.update(|open| *open = !*open)>
						"+ Add Thought"
					</button>
					<Show when=has_selection>
						<button
							class="button outline"
							disabled=connecting
							on:click=move |_| {
								map.update(|m| {
									m.start_connecting();
								});
							}
						>
							{move || if connecting() { "Click target..." } else { "Connect" }}
						</button>
						<button
							class="button destructive"
							on:click=move |_| {
								map.update(|m| {
									m.delete_selected();
								});
							}
						>
							"Delete"
						</button>
					</Show>
				</div>
				<p class="muted">
					{move || {
						if connecting() {
							"Click another thought to connect"
						} else {
							"Drag to move • Click to select"
						}
					}}
				</p>
			</div>

			<Show when=move || adding.get()>
				<form class="thought-form" on:submit=on_submit>
					<label for="thought-content">"Content"</label>
					<input
						id="thought-content"
						placeholder="What's on your mind?"
						prop:value=move || content.get()
						on:input=move |ev| set_content.set(event_target_value(&ev))
					/>
					<label for="thought-category">"Category"</label>
					<select
						id="thought-category"
						on:change=move |ev| {
							set_category.set(event_target_value(&ev).parse().unwrap_or_default())
						}
					>
						{Category::ALL
							.into_iter()
							.map(|c| {
								view! {
									<option value=c.as_str() selected=move || category.get() == c>
										{c.as_str()}
									</option>
								}
							})
							.collect_view()}
					</select>
					<button class="button" type="submit">
						"Add Thought"
					</button>
				</form>
			</Show>

			<div
				node_ref=container
				class="thought-map-canvas"
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
			>
				<svg class="thought-map-edges">{edges}</svg>

				<For
					each=move || map.with(|m| m.node_ids())
					key=|id| id.clone()
					children=move |id| view! { <ThoughtCard map=map container=container id=id /> }
				/>

				<Show when=move || map.with(|m| m.is_empty())>
					<div class="thought-map-empty">
						<p class="muted">
							"No thoughts yet. Click \"Add Thought\" to start mapping your mind."
						</p>
					</div>
				</Show>
			</div>
		</div>
	}
}

#[component]
fn ThoughtCard(map: RwSignal<BrowserMap>, container: NodeRef<Div>, id: String) -> impl IntoView {
	let (content, category, width, preview_chars) = map.with_untracked(|m| {
		let config = m.config();
		let (content, category) = m
			.node(&id)
			.map(|n| (n.content.clone(), n.category))
			.unwrap_or_default();
		(content, category, config.card_width, config.preview_chars)
	});
	let color = category_color(category);

	let position = {
		let id = id.clone();
		Memo::new(move |_| map.with(|m| m.node(&id).map(|n| n.position).unwrap_or_default()))
	};
	let selected = {
		let id = id.clone();
		Memo::new(move |_| map.with(|m| m.selected() == Some(id.as_str())))
	};
	let source = {
		let id = id.clone();
		Memo::new(move |_| map.with(|m| m.connecting_from() == Some(id.as_str())))
	};

	let on_mousedown = {
		let id = id.clone();
		move |ev: MouseEvent| {
			if let Some(p) = pointer_in(container, &ev) {
				map.update(|m| {
					m.pointer_down(&id, p);
				});
			}
		}
	};
	let on_click = move |ev: MouseEvent| {
		ev.stop_propagation();
		if map.with_untracked(|m| m.connecting_from().is_some()) {
			map.update(|m| {
				m.click_node(&id);
			});
		}
	};

	view! {
		<div
			class="thought-node"
			class:selected=move || selected.get()
			class:connecting=move || source.get()
			style:left=move || format!("{}px", position.get().x)
			style:top=move || format!("{}px", position.get().y)
			style:width=format!("{width}px")
			on:mousedown=on_mousedown
			on:click=on_click
		>
			<div class="thought-node-body" style:border-color=color>
				<div class="thought-node-category" style:color=color>
					{category.as_str()}
				</div>
				<div class="thought-node-content">{preview(&content, preview_chars)}</div>
			</div>
		</div>
	}
}
