// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object storage subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mcs::{McsClient, ObjectRef, StoreObject};
use tracing::info;

pub async fn collections(client: &McsClient) -> Result<()> {
	let collections = client
		.get_collection_list()
		.await
		.context("failed to list collections")?;

	if collections.is_empty() {
		println!("No collections.");
		return Ok(());
	}

	println!("{:<32} DESCRIPTION", "ID");
	for collection in collections {
		println!(
			"{:<32} {}",
			collection.id,
			collection.description.as_deref().unwrap_or("")
		);
	}
	Ok(())
}

pub async fn items(client: &McsClient, collection: &str) -> Result<()> {
	let items = client
		.get_item_list_in_collection(collection)
		.await
		.with_context(|| format!("failed to list items in '{collection}'"))?;

	println!("{}", serde_json::to_string_pretty(&items)?);
	Ok(())
}

/// Prints the raw body, or decodes it from base64 into `output`.
pub async fn get_item(
	client: &McsClient,
	collection: &str,
	item: &str,
	output: Option<&Path>,
) -> Result<()> {
	let response = client
		.get_item(&ObjectRef::new(collection, item))
		.await
		.with_context(|| format!("failed to fetch '{collection}/{item}'"))?;

	match output {
		Some(path) => {
			let bytes = decode_object(&response.body)?;
			std::fs::write(path, &bytes)
				.with_context(|| format!("failed to write {}", path.display()))?;
			info!(path = %path.display(), bytes = bytes.len(), "object written");
		}
		None => println!("{}", response.text()),
	}
	Ok(())
}

pub async fn store_item(
	client: &McsClient,
	collection: &str,
	file: &Path,
	name: Option<String>,
	content_type: String,
) -> Result<()> {
	let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
	let item_name = match name {
		Some(name) => name,
		None => file
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.context("--name is required when the file has no name")?,
	};

	let body = client
		.store_item(StoreObject {
			collection_id: collection.to_string(),
			item_name,
			base64_data: STANDARD.encode(&bytes),
			content_type,
		})
		.await
		.with_context(|| format!("failed to store into '{collection}'"))?;

	println!("{body}");
	Ok(())
}

pub async fn delete_item(client: &McsClient, collection: &str, item: &str) -> Result<()> {
	let message = client
		.delete_item(&ObjectRef::new(collection, item))
		.await
		.with_context(|| format!("failed to delete '{collection}/{item}'"))?;

	println!("{message}");
	Ok(())
}

/// Objects are stored as base64 text; surrounding whitespace is ignored.
fn decode_object(body: &[u8]) -> Result<Vec<u8>> {
	let text = std::str::from_utf8(body).context("object body is not UTF-8 text")?;
	STANDARD
		.decode(text.trim())
		.context("object body is not valid base64")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_object() {
		assert_eq!(decode_object(b"aGVsbG8=\n").unwrap(), b"hello");
	}

	#[test]
	fn test_decode_object_rejects_garbage() {
		assert!(decode_object(b"not base64!").is_err());
		assert!(decode_object(&[0xff, 0xfe]).is_err());
	}
}
