mod component;
mod config;
mod layout;
mod render;
mod state;
mod types;

pub use component::ThoughtMap;
