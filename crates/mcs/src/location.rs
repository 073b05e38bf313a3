// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Location lookups for devices, places and assets.

use mcs_core::headers::content_types;
use mcs_core::{paths, LocationKind, LocationLookup, Method};
use tracing::instrument;

use crate::client::McsClient;
use crate::error::Result;

impl McsClient {
	/// Looks up a location collection entry and returns the raw body.
	#[instrument(skip(self))]
	pub async fn get_location_list(&self, kind: LocationKind, lookup: LocationLookup) -> Result<String> {
		let url = lookup.apply(&self.url(&paths::location(kind)));
		let response = self
			.dispatch(Method::GET, url, self.base_headers(content_types::JSON), None)
			.await?;
		Ok(response.text())
	}

	pub async fn get_device_locations_by_name(&self, name: &str) -> Result<String> {
		self
			.get_location_list(LocationKind::Devices, LocationLookup::ByName(name.to_string()))
			.await
	}

	pub async fn get_device_locations_by_id(&self, id: &str) -> Result<String> {
		self
			.get_location_list(LocationKind::Devices, LocationLookup::ById(id.to_string()))
			.await
	}

	pub async fn get_place_by_name(&self, name: &str) -> Result<String> {
		self
			.get_location_list(LocationKind::Places, LocationLookup::ByName(name.to_string()))
			.await
	}

	pub async fn get_place_by_id(&self, id: &str) -> Result<String> {
		self
			.get_location_list(LocationKind::Places, LocationLookup::ById(id.to_string()))
			.await
	}

	pub async fn get_asset_by_name(&self, name: &str) -> Result<String> {
		self
			.get_location_list(LocationKind::Assets, LocationLookup::ByName(name.to_string()))
			.await
	}

	pub async fn get_asset_by_id(&self, id: &str) -> Result<String> {
		self
			.get_location_list(LocationKind::Assets, LocationLookup::ById(id.to_string()))
			.await
	}
}
