pub mod navigation;
pub mod thought_map;
