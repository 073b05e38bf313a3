// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object storage collections.

use mcs_core::headers::{content_types, names};
use mcs_core::{paths, CollectionSummary, Headers, Method, ObjectRef, StoreObject, DEFAULT_API_VERSION};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::McsClient;
use crate::error::{McsError, Result};
use crate::transport::HttpResponse;

/// Result reported by a successful delete.
pub const ITEM_DELETED: &str = "Item Deleted.";

/// Upper bound (exclusive) of the cache-busting `v` query parameter.
const CACHE_BUSTER_RANGE: u32 = 100_000;

impl McsClient {
	/// Lists the storage collections visible to the current user.
	pub async fn get_collection_list(&self) -> Result<Vec<CollectionSummary>> {
		let response = self
			.dispatch(
				Method::GET,
				self.url(paths::STORAGE_COLLECTIONS),
				self.storage_headers(),
				None,
			)
			.await?;

		let items = items_of(response.text())?;
		Ok(items
			.iter()
			.map(|item| CollectionSummary {
				id: item
					.get("id")
					.and_then(Value::as_str)
					.unwrap_or_default()
					.to_string(),
				description: item
					.get("description")
					.and_then(Value::as_str)
					.map(str::to_string),
			})
			.collect())
	}

	/// Lists the objects of a collection, as returned by the backend.
	pub async fn get_item_list_in_collection(&self, collection_id: &str) -> Result<Vec<Value>> {
		let response = self
			.dispatch(
				Method::GET,
				self.url(&paths::collection_objects(collection_id)),
				self.storage_headers(),
				None,
			)
			.await?;

		items_of(response.text())
	}

	/// Fetches a stored object. The body is returned untouched since objects
	/// may be arbitrary base64 payloads.
	#[instrument(skip(self), fields(collection_id = %object.collection_id, item_id = %object.item_id))]
	pub async fn get_item(&self, object: &ObjectRef) -> Result<HttpResponse> {
		self
			.dispatch(
				Method::GET,
				self.url(&paths::collection_object(&object.collection_id, &object.item_id)),
				self.storage_headers(),
				None,
			)
			.await
	}

	/// Uploads an object. `base64_data` is sent as the body as-is.
	#[instrument(skip(self, object), fields(collection_id = %object.collection_id, item_name = %object.item_name))]
	pub async fn store_item(&self, object: StoreObject) -> Result<String> {
		let headers = Headers::new()
			.with(names::BACKEND_ID, self.inner.backend_id.as_str())
			.with(names::AUTHORIZATION, self.authorization())
			.with(names::OBJECT_NAME, object.item_name.as_str())
			.with(names::CONTENT_TYPE, object.content_type.as_str());

		let response = self
			.dispatch(
				Method::POST,
				self.url(&paths::collection_objects(&object.collection_id)),
				headers,
				Some(object.base64_data),
			)
			.await?;

		Ok(response.text())
	}

	/// Deletes a stored object.
	///
	/// A random `v` query parameter keeps intermediaries from answering with
	/// a cached response.
	#[instrument(skip(self), fields(collection_id = %object.collection_id, item_id = %object.item_id))]
	pub async fn delete_item(&self, object: &ObjectRef) -> Result<&'static str> {
		let url = format!(
			"{}?v={}",
			self.url(&paths::collection_object(&object.collection_id, &object.item_id)),
			fastrand::u32(0..CACHE_BUSTER_RANGE)
		);
		let headers = Headers::new()
			.with(names::BACKEND_ID, self.inner.backend_id.as_str())
			.with(names::AUTHORIZATION, self.authorization());

		self.dispatch(Method::DELETE, url, headers, None).await?;

		debug!("Item deleted");
		Ok(ITEM_DELETED)
	}

	fn storage_headers(&self) -> Headers {
		Headers::new()
			.with(names::API_VERSION, DEFAULT_API_VERSION)
			.with(names::CONTENT_TYPE, content_types::JSON_UTF8)
			.with(names::BACKEND_ID, self.inner.backend_id.as_str())
			.with(names::AUTHORIZATION, self.authorization())
	}
}

/// Extracts the `items` array of a listing response.
fn items_of(body: String) -> Result<Vec<Value>> {
	let items = match serde_json::from_str::<Value>(&body) {
		Ok(Value::Object(mut map)) => match map.remove("items") {
			Some(Value::Array(items)) => Some(items),
			_ => None,
		},
		_ => None,
	};

	items.ok_or_else(|| McsError::unexpected(body))
}
