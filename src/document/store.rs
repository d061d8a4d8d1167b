#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use log::{debug, error};
use thiserror::Error;

use super::types::Document;

#[derive(Debug, Error)]
pub enum StorageError {
	#[error("local storage is unavailable")]
	Unavailable,
	#[error("failed to read `{key}`: {reason}")]
	Read { key: String, reason: String },
	#[error("failed to write `{key}`: {reason}")]
	Write { key: String, reason: String },
	#[error("malformed document: {0}")]
	Format(#[from] serde_json::Error),
}

/// Load/save boundary for the whole document. Reads and writes are always full.
pub trait DocumentStore {
	/// `Ok(None)` when nothing has been saved yet.
	fn load(&self) -> Result<Option<Document>, StorageError>;
	fn save(&self, document: &Document) -> Result<(), StorageError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
	fn load(&self) -> Result<Option<Document>, StorageError> {
		(**self).load()
	}

	fn save(&self, document: &Document) -> Result<(), StorageError> {
		(**self).save(document)
	}
}

/// Reads the document, degrading any failure to the default one.
pub fn load_or_default<S: DocumentStore + ?Sized>(store: &S) -> Document {
	match store.load() {
		Ok(Some(document)) => document,
		Ok(None) => {
			debug!("no saved document, starting fresh");
			Document::default()
		}
		Err(err) => {
			error!("[LifeOS] error loading data: {err}");
			Document::default()
		}
	}
}

/// Writes the document, logging instead of propagating failures.
pub fn save_or_log<S: DocumentStore + ?Sized>(store: &S, document: &Document) -> bool {
	match store.save(document) {
		Ok(()) => true,
		Err(err) => {
			error!("[LifeOS] error saving data: {err}");
			false
		}
	}
}

/// Browser `localStorage`, one JSON document under a fixed key.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
	key: String,
}

impl Default for LocalStorageStore {
	fn default() -> Self {
		Self::with_key(Self::KEY)
	}
}

impl LocalStorageStore {
	pub const KEY: &'static str = "lifeos_data";

	pub fn with_key(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	fn storage() -> Result<web_sys::Storage, StorageError> {
		web_sys::window()
			.and_then(|w| w.local_storage().ok().flatten())
			.ok_or(StorageError::Unavailable)
	}
}

impl DocumentStore for LocalStorageStore {
	fn load(&self) -> Result<Option<Document>, StorageError> {
		let stored = Self::storage()?
			.get_item(&self.key)
			.map_err(|e| StorageError::Read {
				key: self.key.clone(),
				reason: format!("{e:?}"),
			})?;
		match stored {
			Some(json) if !json.is_empty() => Ok(Some(serde_json::from_str(&json)?)),
			_ => Ok(None),
		}
	}

	fn save(&self, document: &Document) -> Result<(), StorageError> {
		let json = serde_json::to_string(document)?;
		Self::storage()?
			.set_item(&self.key, &json)
			.map_err(|e| StorageError::Write {
				key: self.key.clone(),
				reason: format!("{e:?}"),
			})
	}
}

/// In-memory store holding the serialized JSON, so saves go through the same codec.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	json: Rc<RefCell<Option<String>>>,
	fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
	pub fn with_document(document: &Document) -> Self {
		let store = Self::default();
		*store.json.borrow_mut() = serde_json::to_string(document).ok();
		store
	}

	/// Seeds raw contents, e.g. a corrupt document.
	pub fn with_raw(json: impl Into<String>) -> Self {
		let store = Self::default();
		*store.json.borrow_mut() = Some(json.into());
		store
	}

	/// A store whose writes always fail, as if the quota were exceeded.
	pub fn read_only(self) -> Self {
		Self {
			fail_writes: true,
			..self
		}
	}

	pub fn raw(&self) -> Option<String> {
		self.json.borrow().clone()
	}
}

#[cfg(test)]
impl DocumentStore for MemoryStore {
	fn load(&self) -> Result<Option<Document>, StorageError> {
		match self.json.borrow().as_deref() {
			Some(json) => Ok(Some(serde_json::from_str(json)?)),
			None => Ok(None),
		}
	}

	fn save(&self, document: &Document) -> Result<(), StorageError> {
		if self.fail_writes {
			return Err(StorageError::Write {
				key: "memory".into(),
				reason: "quota exceeded".into(),
			});
		}
		*self.json.borrow_mut() = Some(serde_json::to_string(document)?);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_store_loads_default() {
		let store = MemoryStore::default();
		assert!(store.load().unwrap().is_none());
		assert_eq!(load_or_default(&store), Document::default());
	}

	#[test]
	fn corrupt_json_degrades_to_default() {
		let store = MemoryStore::with_raw("{not json");
		assert!(matches!(store.load(), Err(StorageError::Format(_))));
		assert_eq!(load_or_default(&store), Document::default());
	}

	#[test]
	fn failed_write_is_reported_not_raised() {
		let store = MemoryStore::default().read_only();
		assert!(!save_or_log(&store, &Document::default()));
		assert!(store.raw().is_none());
	}

	#[test]
	fn saved_document_loads_back() {
		let store = MemoryStore::default();
		let mut doc = Document::default();
		doc.settings["syncTime"] = "07:30".into();
		assert!(save_or_log(&store, &doc));
		assert_eq!(load_or_default(&store).settings["syncTime"], "07:30");
	}

	#[test]
	fn clones_share_contents() {
		let store = MemoryStore::default();
		let other = store.clone();
		store.save(&Document::default()).unwrap();
		assert!(other.raw().is_some());
	}
}
