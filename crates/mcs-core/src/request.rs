// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Custom API request building blocks.

use serde::{Deserialize, Serialize};

use crate::Headers;

/// API version sent to custom APIs unless the caller picks another.
pub const DEFAULT_API_VERSION: &str = "1.0";

/// A precomputed URL and header set for a custom API endpoint, for callers
/// that issue the request themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
	pub url: String,
	pub headers: Headers,
}

/// A `key=value` query-string pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
	pub key: String,
	pub value: String,
}

impl QueryParam {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// A caller-supplied request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderParam {
	pub key: String,
	pub value: String,
}

impl HeaderParam {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// Joins parameters as `k1=v1&k2=v2`.
///
/// No percent-encoding is applied; values containing reserved characters
/// must be encoded by the caller.
pub fn build_query(params: &[QueryParam]) -> String {
	params
		.iter()
		.map(|p| format!("{}={}", p.key, p.value))
		.collect::<Vec<_>>()
		.join("&")
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn joins_without_trailing_ampersand() {
		let query = build_query(&[QueryParam::new("q", "ankara"), QueryParam::new("appid", "k1")]);
		assert_eq!(query, "q=ankara&appid=k1");
	}

	#[test]
	fn empty_params_give_empty_query() {
		assert_eq!(build_query(&[]), "");
	}

	#[test]
	fn values_are_not_encoded() {
		let query = build_query(&[QueryParam::new("q", "a%20b")]);
		assert_eq!(query, "q=a%20b");
	}

	proptest! {
		#[test]
		fn pair_count_matches_params(pairs in proptest::collection::vec(("[a-z]{1,8}", "[a-z0-9]{0,8}"), 1..10)) {
			let params: Vec<QueryParam> = pairs.iter().map(|(k, v)| QueryParam::new(k, v)).collect();
			let query = build_query(&params);

			prop_assert!(!query.ends_with('&'));
			prop_assert_eq!(query.split('&').count(), params.len());
			for (segment, param) in query.split('&').zip(&params) {
				prop_assert_eq!(segment, format!("{}={}", param.key, param.value));
			}
		}
	}
}
