mod store;
mod summary;
mod types;

#[cfg(test)]
pub use store::MemoryStore;
pub use store::{DocumentStore, LocalStorageStore, load_or_default, save_or_log};
pub use summary::Summary;
pub use types::{Category, Document, ThoughtRecord};
