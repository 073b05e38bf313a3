// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Location lookups.

/// The location resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
	Devices,
	Places,
	Assets,
}

impl LocationKind {
	/// Path segment under `/mobile/platform/location/`.
	pub const fn path_segment(self) -> &'static str {
		match self {
			LocationKind::Devices => "devices",
			LocationKind::Places => "places",
			LocationKind::Assets => "assets",
		}
	}
}

/// How a location resource is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationLookup {
	/// `?name=<value>` query against the collection.
	ByName(String),
	/// `/<value>` path segment addressing one resource.
	ById(String),
}

impl LocationLookup {
	/// Appends this lookup to a collection URL.
	///
	/// Values are appended as given; callers pre-encode reserved characters.
	pub fn apply(&self, collection_url: &str) -> String {
		match self {
			LocationLookup::ByName(name) => format!("{collection_url}?name={name}"),
			LocationLookup::ById(id) => format!("{collection_url}/{id}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn by_name_appends_query() {
		let url = LocationLookup::ByName("hq".into()).apply("https://x/mobile/platform/location/places");
		assert_eq!(url, "https://x/mobile/platform/location/places?name=hq");
	}

	#[test]
	fn by_id_appends_segment() {
		let url = LocationLookup::ById("42".into()).apply("https://x/mobile/platform/location/assets");
		assert_eq!(url, "https://x/mobile/platform/location/assets/42");
	}

	#[test]
	fn path_segments() {
		assert_eq!(LocationKind::Devices.path_segment(), "devices");
		assert_eq!(LocationKind::Places.path_segment(), "places");
		assert_eq!(LocationKind::Assets.path_segment(), "assets");
	}
}
