// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP transport seam.
//!
//! The client never talks to the network directly: it builds an
//! [`HttpRequest`] and hands it to a [`Transport`]. The default
//! [`ReqwestTransport`] routes any non-2xx status to the failure path, so an
//! operation that does not inspect the response body (deleting an object,
//! deregistering a device, location lookups) cannot report a backend error
//! as success.

use std::time::Duration;

use async_trait::async_trait;
use mcs_core::{Headers, Method};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// A fully built request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
	pub method: Method,
	pub url: String,
	pub headers: Headers,
	pub body: Option<String>,
}

/// A completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
	pub status: u16,
	pub headers: Headers,
	pub body: Vec<u8>,
}

impl HttpResponse {
	/// Response with status 200 and the given text body.
	pub fn ok(body: impl Into<String>) -> Self {
		Self {
			status: 200,
			headers: Headers::new(),
			body: body.into().into_bytes(),
		}
	}

	/// The body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Failures reported by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
	/// The request could not be sent or the response could not be read.
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The backend answered with a non-success status.
	#[error("server error ({status}): {body}")]
	Status { status: u16, body: String },

	/// A non-reqwest transport could not complete the exchange.
	#[error("transport unavailable: {0}")]
	Unavailable(String),
}

/// Performs one request/response exchange.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: Client,
}

impl ReqwestTransport {
	/// Builds a transport with the standard User-Agent and the given timeout.
	pub fn new(timeout: Duration) -> Result<Self, TransportError> {
		let client = mcs_common_http::new_client_with_timeout(timeout)?;
		Ok(Self { client })
	}

	/// Wraps an existing client.
	pub fn with_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Transport for ReqwestTransport {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
		let mut builder = self.client.request(request.method, &request.url);
		for (name, value) in request.headers.iter() {
			builder = builder.header(name, value);
		}
		if let Some(body) = request.body {
			builder = builder.body(body);
		}

		let response = builder.send().await?;
		let status = response.status();
		let headers: Headers = response
			.headers()
			.iter()
			.map(|(name, value)| {
				(
					name.as_str().to_string(),
					String::from_utf8_lossy(value.as_bytes()).into_owned(),
				)
			})
			.collect();
		let body = response.bytes().await?.to_vec();

		debug!(status = status.as_u16(), bytes = body.len(), "Response received");

		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				body: String::from_utf8_lossy(&body).into_owned(),
			});
		}

		Ok(HttpResponse {
			status: status.as_u16(),
			headers,
			body,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_is_lossy() {
		let response = HttpResponse {
			status: 200,
			headers: Headers::new(),
			body: vec![b'o', b'k', 0xff],
		};
		assert_eq!(response.text(), "ok\u{fffd}");
	}

	#[test]
	fn ok_response_has_status_200() {
		let response = HttpResponse::ok("{}");
		assert_eq!(response.status, 200);
		assert_eq!(response.text(), "{}");
	}

	#[test]
	fn reqwest_transport_builds() {
		assert!(ReqwestTransport::new(Duration::from_secs(1)).is_ok());
	}
}
