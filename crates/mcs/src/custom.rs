// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Custom API proxy and application policies.

use mcs_core::headers::{content_types, names};
use mcs_core::{build_query, paths, HeaderParam, Method, QueryParam, RequestOptions, DEFAULT_API_VERSION};
use tracing::instrument;

use crate::client::{McsClient, Payload};
use crate::error::Result;

impl McsClient {
	/// URL and headers for a custom API endpoint, without sending anything.
	///
	/// Lets callers issue the request themselves, e.g. with a query string
	/// encoded differently from [`McsClient::api_caller_get`]. `version`
	/// defaults to `1.0`.
	pub fn create_request_options(
		&self,
		api_name: &str,
		endpoint_path: &str,
		version: Option<&str>,
	) -> RequestOptions {
		let headers = self
			.base_headers(content_types::JSON)
			.with(names::API_VERSION, version.unwrap_or(DEFAULT_API_VERSION));

		RequestOptions {
			url: self.url(&paths::custom_api(api_name, endpoint_path)),
			headers,
		}
	}

	/// Calls a custom API endpoint with GET and returns the raw body.
	///
	/// Parameters are joined as `key=value` pairs without URL-encoding;
	/// values containing reserved characters must be encoded by the caller.
	#[instrument(skip(self, parameters))]
	pub async fn api_caller_get(
		&self,
		api_name: &str,
		endpoint_name: &str,
		parameters: &[QueryParam],
	) -> Result<String> {
		let url = format!(
			"{}?{}",
			self.url(&paths::custom_api(api_name, endpoint_name)),
			build_query(parameters)
		);

		let response = self
			.dispatch(Method::GET, url, self.base_headers(content_types::JSON), None)
			.await?;
		Ok(response.text())
	}

	/// Calls a custom API endpoint with POST and returns the raw body.
	///
	/// `header_parameters` are applied after the standard headers and replace
	/// any of them that share a name.
	#[instrument(skip(self, body, header_parameters))]
	pub async fn api_caller_post(
		&self,
		api_name: &str,
		endpoint_name: &str,
		body: impl Into<Payload>,
		header_parameters: &[HeaderParam],
	) -> Result<String> {
		let mut headers = self.base_headers(content_types::JSON);
		for param in header_parameters {
			headers.insert(param.key.as_str(), param.value.as_str());
		}

		let body = body.into().into_body()?;
		let response = self
			.dispatch(
				Method::POST,
				self.url(&paths::custom_api(api_name, endpoint_name)),
				headers,
				Some(body),
			)
			.await?;
		Ok(response.text())
	}

	/// Fetches the client application policies and returns the raw body.
	pub async fn get_app_policies(&self) -> Result<String> {
		let response = self
			.dispatch(
				Method::GET,
				self.url(paths::APP_CONFIG),
				self.base_headers(content_types::JSON),
				None,
			)
			.await?;
		Ok(response.text())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn client() -> McsClient {
		McsClient::builder()
			.base_url("https://mcs.example.com/")
			.backend_id("backend-1")
			.anonymous_key("YW5vbjprZXk=")
			.build()
			.unwrap()
	}

	#[test]
	fn request_options_default_version() {
		let options = client().create_request_options("weather", "current", None);

		assert_eq!(options.url, "https://mcs.example.com/mobile/custom/weather/current");
		assert_eq!(options.headers.get("Content-Type"), Some("application/json"));
		assert_eq!(options.headers.get("Oracle-Mobile-Backend-Id"), Some("backend-1"));
		assert_eq!(options.headers.get("Authorization"), Some("Basic YW5vbjprZXk="));
		assert_eq!(options.headers.get("oracle-mobile-api-version"), Some("1.0"));
	}

	#[test]
	fn request_options_explicit_version() {
		let options = client().create_request_options("weather", "current", Some("2.0"));
		assert_eq!(options.headers.get("oracle-mobile-api-version"), Some("2.0"));
	}

	#[test]
	fn request_options_track_authorization() {
		let client = client();
		client.set_authorization("joe", "secret");
		let options = client.create_request_options("weather", "current", None);
		assert_eq!(options.headers.get("Authorization"), Some("Basic am9lOnNlY3JldA=="));
	}
}
