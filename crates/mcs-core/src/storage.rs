// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object storage types.

use serde::{Deserialize, Serialize};

/// A storage collection as listed by `GET /mobile/platform/storage/collections`.
///
/// Only the identifier and description are kept from each listed item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub description: Option<String>,
}

/// Addresses a single stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
	pub collection_id: String,
	pub item_id: String,
}

impl ObjectRef {
	pub fn new(collection_id: impl Into<String>, item_id: impl Into<String>) -> Self {
		Self {
			collection_id: collection_id.into(),
			item_id: item_id.into(),
		}
	}
}

/// An object to upload into a collection.
///
/// `base64_data` is sent as the request body verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreObject {
	pub collection_id: String,
	pub item_name: String,
	pub base64_data: String,
	pub content_type: String,
}
