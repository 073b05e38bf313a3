// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Header names and the ordered header set sent with every request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// HTTP header names used by the backend.
///
/// Names are sent exactly as written here; the backend matches them
/// case-insensitively.
pub mod names {
	pub const BACKEND_ID: &str = "Oracle-Mobile-Backend-Id";
	pub const AUTHORIZATION: &str = "Authorization";
	pub const CONTENT_TYPE: &str = "Content-Type";
	pub const API_VERSION: &str = "oracle-mobile-api-version";
	pub const APPLICATION_KEY: &str = "oracle-mobile-application-key";
	pub const ANALYTICS_SESSION_ID: &str = "oracle-mobile-analytics-session-id";
	pub const DEVICE_ID: &str = "oracle-mobile-device-id";
	pub const OBJECT_NAME: &str = "Oracle-Mobile-Name";
}

/// Content type values.
pub mod content_types {
	pub const JSON: &str = "application/json";
	pub const JSON_UTF8: &str = "application/json; charset=utf-8";
}

/// Builds a basic-auth header value: `"Basic " + base64(username ":" password)`.
pub fn basic_auth(username: &str, password: &str) -> String {
	format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// An ordered set of request headers.
///
/// Inserting a name that is already present (compared case-insensitively)
/// replaces the existing value in place, so later writers win while the
/// original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a header.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self
			.0
			.iter_mut()
			.find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
		{
			Some(entry) => entry.1 = value,
			None => self.0.push((name, value)),
		}
	}

	/// Builder-style [`Headers::insert`].
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);
		self
	}

	/// Looks a header up by name, ignoring ASCII case.
	pub fn get(&self, name: &str) -> Option<&str> {
		self
			.0
			.iter()
			.find(|(existing, _)| existing.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut headers = Headers::new();
		for (name, value) in iter {
			headers.insert(name, value);
		}
		headers
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn basic_auth_matches_known_value() {
		assert_eq!(
			basic_auth("Aladdin", "open sesame"),
			"Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
		);
	}

	#[test]
	fn basic_auth_with_empty_password() {
		assert_eq!(basic_auth("joe", ""), "Basic am9lOg==");
	}

	#[test]
	fn insert_replaces_case_insensitively() {
		let mut headers = Headers::new()
			.with(names::CONTENT_TYPE, content_types::JSON)
			.with(names::AUTHORIZATION, "Basic a");
		headers.insert("authorization", "Basic b");

		assert_eq!(headers.len(), 2);
		assert_eq!(headers.get("AUTHORIZATION"), Some("Basic b"));
		let order: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
		assert_eq!(order, vec![names::CONTENT_TYPE, names::AUTHORIZATION]);
	}

	#[test]
	fn get_missing_returns_none() {
		let headers = Headers::new();
		assert!(headers.is_empty());
		assert!(headers.get(names::BACKEND_ID).is_none());
		assert!(!headers.contains(names::BACKEND_ID));
	}

	#[test]
	fn collect_from_pairs() {
		let headers: Headers = vec![("a", "1"), ("b", "2"), ("A", "3")].into_iter().collect();
		assert_eq!(headers.len(), 2);
		assert_eq!(headers.get("a"), Some("3"));
	}
}
