// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistent string key-value capability.
//!
//! The SDK only persists the generated device identifier, but the store is a
//! plain string map so hosts can back it with whatever they already have.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

/// Errors from a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("store file is not valid JSON: {0}")]
	Parse(#[from] serde_json::Error),
}

/// String key-value storage that survives process restarts.
pub trait KeyValueStore: Send + Sync {
	fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;
	fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store. Values are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl KeyValueStore for MemoryStore {
	fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
		let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
		Ok(values.get(key).cloned())
	}

	fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
		let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
		values.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// Store persisted as a single JSON object in a file.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	write_lock: Mutex<()>,
}

impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			write_lock: Mutex::new(()),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
		match std::fs::read(&self.path) {
			Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
			Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
			Err(e) => Err(e.into()),
		}
	}

	fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent)?;
		}

		let json = serde_json::to_vec_pretty(values)?;
		let temp_path = self.path.with_extension("tmp");
		let mut file = OpenOptions::new()
			.write(true)
			.create(true)
			.truncate(true)
			.open(&temp_path)?;
		file.write_all(&json)?;
		file.sync_all()?;
		std::fs::rename(&temp_path, &self.path)?;

		debug!(path = %self.path.display(), entries = values.len(), "Key-value store saved");
		Ok(())
	}
}

impl KeyValueStore for FileStore {
	fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.load()?.remove(key))
	}

	fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
		let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
		let mut values = self.load()?;
		values.insert(key.to_string(), value.to_string());
		self.save(&values)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_store_roundtrip() {
		let store = MemoryStore::new();
		assert!(store.get_string("k").unwrap().is_none());
		store.set_string("k", "v").unwrap();
		assert_eq!(store.get_string("k").unwrap().as_deref(), Some("v"));
	}

	#[test]
	fn file_store_missing_file_reads_none() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path().join("store.json"));
		assert!(store.get_string("anything").unwrap().is_none());
	}

	#[test]
	fn file_store_persists_across_instances() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("store.json");

		FileStore::new(&path).set_string("mcs-deviceId", "abc").unwrap();
		FileStore::new(&path).set_string("other", "x").unwrap();

		let reopened = FileStore::new(&path);
		assert_eq!(
			reopened.get_string("mcs-deviceId").unwrap().as_deref(),
			Some("abc")
		);
		assert_eq!(reopened.get_string("other").unwrap().as_deref(), Some("x"));
		assert!(!path.with_extension("tmp").exists());
	}

	#[test]
	fn file_store_rejects_corrupt_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("store.json");
		std::fs::write(&path, "not json").unwrap();

		let result = FileStore::new(&path).get_string("k");
		assert!(matches!(result, Err(StoreError::Parse(_))));
	}
}
