//! WASM entry point: mounts the LifeOS app to the page body.

use leptos::prelude::*;
use lifeos::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
