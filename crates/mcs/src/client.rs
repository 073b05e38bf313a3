// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backend client, its builder, and session state.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use mcs_core::headers::{content_types, names};
use mcs_core::{basic_auth, paths, AnalyticsEvent, Headers, Method, Platform};
use tracing::{debug, info, instrument};

use crate::batch::{AutoFlush, EventBuffer};
use crate::error::{McsError, Result};
use crate::identity;
use crate::push::{PushRegistrar, UnavailablePushRegistrar};
use crate::store::{KeyValueStore, MemoryStore};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
	/// Timeout for HTTP requests made by the default transport.
	pub(crate) request_timeout: Duration,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			request_timeout: Duration::from_secs(30),
		}
	}
}

/// Builder for constructing an [`McsClient`].
pub struct McsClientBuilder {
	base_url: Option<String>,
	backend_id: Option<String>,
	android_application_key: Option<String>,
	ios_application_key: Option<String>,
	anonymous_key: Option<String>,
	platform: Platform,
	config: ClientConfig,
	transport: Option<Arc<dyn Transport>>,
	push_registrar: Option<Arc<dyn PushRegistrar>>,
	key_value_store: Option<Arc<dyn KeyValueStore>>,
}

impl McsClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			base_url: None,
			backend_id: None,
			android_application_key: None,
			ios_application_key: None,
			anonymous_key: None,
			platform: Platform::current(),
			config: ClientConfig::default(),
			transport: None,
			push_registrar: None,
			key_value_store: None,
		}
	}

	/// Sets the backend base URL.
	///
	/// Example: `https://mobile.example.com:443`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the backend identifier sent with every request.
	pub fn backend_id(mut self, id: impl Into<String>) -> Self {
		self.backend_id = Some(id.into());
		self
	}

	/// Sets the application key reported by analytics on Android.
	pub fn android_application_key(mut self, key: impl Into<String>) -> Self {
		self.android_application_key = Some(key.into());
		self
	}

	/// Sets the application key reported by analytics on iOS.
	pub fn ios_application_key(mut self, key: impl Into<String>) -> Self {
		self.ios_application_key = Some(key.into());
		self
	}

	/// Sets the anonymous key, already base64-encoded as issued by the
	/// backend. Requests made before login (and after logout) authenticate
	/// with `Basic <anonymous key>`.
	pub fn anonymous_key(mut self, key: impl Into<String>) -> Self {
		self.anonymous_key = Some(key.into());
		self
	}

	/// Overrides the platform derived from the compile target.
	pub fn platform(mut self, platform: Platform) -> Self {
		self.platform = platform;
		self
	}

	/// Sets the HTTP request timeout of the default transport.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;
		self
	}

	/// Replaces the default reqwest-backed transport.
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Sets the push-registration capability. Without one, device
	/// registration fails with [`McsError::RegisterFailed`].
	pub fn push_registrar(mut self, registrar: Arc<dyn PushRegistrar>) -> Self {
		self.push_registrar = Some(registrar);
		self
	}

	/// Sets the store used to persist the device id. Defaults to an
	/// in-memory store, so nothing survives the process.
	///
	/// The device id is resolved once per process from the store of the first
	/// client that needs it; later clients share that id.
	pub fn key_value_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
		self.key_value_store = Some(store);
		self
	}

	/// Builds the McsClient.
	pub fn build(self) -> Result<McsClient> {
		let base_url = self
			.base_url
			.filter(|url| !url.trim().is_empty())
			.ok_or(McsError::InvalidBaseUrl)?;
		let backend_id = self
			.backend_id
			.filter(|id| !id.trim().is_empty())
			.ok_or(McsError::MissingBackendId)?;

		// Normalize base URL
		let base_url = base_url.trim_end_matches('/').to_string();

		let transport: Arc<dyn Transport> = match self.transport {
			Some(transport) => transport,
			None => Arc::new(ReqwestTransport::new(self.config.request_timeout)?),
		};

		let anonymous_key = self.anonymous_key.filter(|key| !key.is_empty());
		let authorization = anonymous_authorization(anonymous_key.as_deref());

		let inner = Arc::new(McsClientInner {
			base_url: base_url.clone(),
			backend_id,
			android_application_key: self.android_application_key,
			ios_application_key: self.ios_application_key,
			anonymous_key,
			platform: self.platform,
			transport,
			push_registrar: self
				.push_registrar
				.unwrap_or_else(|| Arc::new(UnavailablePushRegistrar)),
			store: self
				.key_value_store
				.unwrap_or_else(|| Arc::new(MemoryStore::new())),
			authorization: RwLock::new(authorization),
			device_token: RwLock::new(None),
			events: EventBuffer::new(),
			flush_lock: tokio::sync::Mutex::new(()),
			auto_flush: AutoFlush::new(),
		});

		info!(
			base_url = %base_url,
			platform = %self.platform,
			sdk_version = mcs_common_version::sdk_version(),
			"MCS client initialized"
		);

		Ok(McsClient { inner })
	}
}

impl Default for McsClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn anonymous_authorization(anonymous_key: Option<&str>) -> String {
	anonymous_key
		.map(|key| format!("Basic {key}"))
		.unwrap_or_default()
}

/// Internal client state.
pub(crate) struct McsClientInner {
	pub(crate) base_url: String,
	pub(crate) backend_id: String,
	android_application_key: Option<String>,
	ios_application_key: Option<String>,
	anonymous_key: Option<String>,
	pub(crate) platform: Platform,
	transport: Arc<dyn Transport>,
	pub(crate) push_registrar: Arc<dyn PushRegistrar>,
	store: Arc<dyn KeyValueStore>,
	authorization: RwLock<String>,
	pub(crate) device_token: RwLock<Option<String>>,
	pub(crate) events: EventBuffer,
	pub(crate) flush_lock: tokio::sync::Mutex<()>,
	pub(crate) auto_flush: AutoFlush,
}

/// Client for the mobile backend.
///
/// Cloning is cheap and every clone shares the same session state, event
/// buffer and auto-flush task.
///
/// # Example
///
/// ```ignore
/// use mcs::McsClient;
///
/// let client = McsClient::builder()
///     .base_url("https://mobile.example.com")
///     .backend_id("a1b2c3")
///     .android_application_key("android-key")
///     .anonymous_key("YW5vbjpzZWNyZXQ=")
///     .build()?;
///
/// client.login("joe", "secret").await?;
/// client.store_basic_event("app_opened");
/// client.flush_events().await?;
/// ```
#[derive(Clone)]
pub struct McsClient {
	pub(crate) inner: Arc<McsClientInner>,
}

impl McsClient {
	/// Creates a new builder for constructing an McsClient.
	pub fn builder() -> McsClientBuilder {
		McsClientBuilder::new()
	}

	/// Logs in by looking the user up with their own credentials.
	///
	/// On a JSON body with a non-null `id`, the credentials become the
	/// client's authorization and the raw body is returned. Any other body is
	/// returned as [`McsError::UnexpectedResponse`] and the authorization is
	/// left as it was.
	#[instrument(skip(self, password))]
	pub async fn login(&self, username: &str, password: &str) -> Result<String> {
		let credential = basic_auth(username, password);
		let headers = Headers::new()
			.with(names::API_VERSION, mcs_core::DEFAULT_API_VERSION)
			.with(names::CONTENT_TYPE, content_types::JSON_UTF8)
			.with(names::BACKEND_ID, self.inner.backend_id.as_str())
			.with(names::AUTHORIZATION, credential.as_str());

		let response = self
			.dispatch(Method::GET, self.url(&paths::user(username)), headers, None)
			.await?;
		let body = require_field(response.text(), "id")?;

		*self.write_authorization() = credential;
		info!("Logged in");

		Ok(body)
	}

	/// Drops the logged-in credentials, falling back to the anonymous key
	/// when one is configured.
	pub fn logout(&self) {
		*self.write_authorization() = anonymous_authorization(self.inner.anonymous_key.as_deref());
		info!("Logged out");
	}

	/// Uses the given credentials for subsequent requests without checking
	/// them against the backend.
	pub fn set_authorization(&self, username: &str, password: &str) {
		*self.write_authorization() = basic_auth(username, password);
		debug!("Authorization set without login");
	}

	/// Current `Authorization` header value; empty when neither logged in nor
	/// configured with an anonymous key.
	pub fn authorization(&self) -> String {
		self.inner
			.authorization
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	/// Platform the client reports as.
	pub fn platform(&self) -> Platform {
		self.inner.platform
	}

	/// Process-wide device identifier, read from or persisted to this client's
	/// store on first use.
	pub fn device_id(&self) -> &'static str {
		identity::device_id(self.inner.store.as_ref())
	}

	/// Application key for the client's platform, if configured.
	pub(crate) fn application_key(&self) -> Option<&str> {
		match self.inner.platform {
			Platform::Ios => self.inner.ios_application_key.as_deref(),
			Platform::Android => self.inner.android_application_key.as_deref(),
		}
	}

	/// Stops auto-flush and sends whatever is still buffered.
	///
	/// If the final send fails the events stay queued and the error is
	/// returned.
	pub async fn shutdown(&self) -> Result<()> {
		self.stop_auto_flush_events();
		self.flush_events().await?;
		info!("MCS client shutdown");
		Ok(())
	}

	pub(crate) fn url(&self, path: &str) -> String {
		format!("{}{}", self.inner.base_url, path)
	}

	/// `Content-Type`, backend id and the current authorization.
	pub(crate) fn base_headers(&self, content_type: &str) -> Headers {
		Headers::new()
			.with(names::CONTENT_TYPE, content_type)
			.with(names::BACKEND_ID, self.inner.backend_id.as_str())
			.with(names::AUTHORIZATION, self.authorization())
	}

	pub(crate) async fn dispatch(
		&self,
		method: Method,
		url: String,
		headers: Headers,
		body: Option<String>,
	) -> Result<HttpResponse> {
		debug!(method = %method, url = %url, "Sending request");

		let request = HttpRequest {
			method,
			url,
			headers,
			body,
		};
		Ok(self.inner.transport.send(request).await?)
	}

	fn write_authorization(&self) -> std::sync::RwLockWriteGuard<'_, String> {
		self.inner
			.authorization
			.write()
			.unwrap_or_else(PoisonError::into_inner)
	}
}

/// A request body that is either sent verbatim or serialized to JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
	Raw(String),
	Json(serde_json::Value),
	Events(Vec<AnalyticsEvent>),
}

impl Payload {
	pub(crate) fn into_body(self) -> Result<String> {
		match self {
			Payload::Raw(body) => Ok(body),
			Payload::Json(value) => Ok(serde_json::to_string(&value)?),
			Payload::Events(events) => Ok(serde_json::to_string(&events)?),
		}
	}
}

impl From<String> for Payload {
	fn from(body: String) -> Self {
		Payload::Raw(body)
	}
}

impl From<&str> for Payload {
	fn from(body: &str) -> Self {
		Payload::Raw(body.to_string())
	}
}

impl From<serde_json::Value> for Payload {
	fn from(value: serde_json::Value) -> Self {
		Payload::Json(value)
	}
}

impl From<Vec<AnalyticsEvent>> for Payload {
	fn from(events: Vec<AnalyticsEvent>) -> Self {
		Payload::Events(events)
	}
}

/// Returns `body` when it is a JSON object carrying a non-null `field`.
pub(crate) fn require_field(body: String, field: &str) -> Result<String> {
	let present = serde_json::from_str::<serde_json::Value>(&body)
		.map(|json| json.get(field).is_some_and(|value| !value.is_null()))
		.unwrap_or(false);

	if present {
		Ok(body)
	} else {
		Err(McsError::unexpected(body))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn builder() -> McsClientBuilder {
		McsClientBuilder::new()
			.base_url("https://mcs.example.com")
			.backend_id("backend-1")
	}

	#[test]
	fn test_builder_requires_base_url() {
		let result = McsClientBuilder::new().backend_id("backend-1").build();
		assert!(matches!(result, Err(McsError::InvalidBaseUrl)));
	}

	#[test]
	fn test_builder_rejects_blank_base_url() {
		let result = McsClientBuilder::new()
			.base_url("  ")
			.backend_id("backend-1")
			.build();
		assert!(matches!(result, Err(McsError::InvalidBaseUrl)));
	}

	#[test]
	fn test_builder_requires_backend_id() {
		let result = McsClientBuilder::new()
			.base_url("https://mcs.example.com")
			.build();
		assert!(matches!(result, Err(McsError::MissingBackendId)));
	}

	#[test]
	fn test_builder_normalizes_base_url() {
		let client = builder().base_url("https://mcs.example.com//").build().unwrap();
		assert_eq!(client.inner.base_url, "https://mcs.example.com");
		assert_eq!(
			client.url("/mobile/platform/appconfig/client"),
			"https://mcs.example.com/mobile/platform/appconfig/client"
		);
	}

	#[test]
	fn test_authorization_starts_empty_without_anonymous_key() {
		let client = builder().build().unwrap();
		assert_eq!(client.authorization(), "");
	}

	#[test]
	fn test_authorization_starts_anonymous() {
		let client = builder().anonymous_key("YW5vbjprZXk=").build().unwrap();
		assert_eq!(client.authorization(), "Basic YW5vbjprZXk=");
	}

	#[test]
	fn test_set_authorization_and_logout() {
		let client = builder().anonymous_key("YW5vbjprZXk=").build().unwrap();

		client.set_authorization("joe", "secret");
		assert_eq!(client.authorization(), "Basic am9lOnNlY3JldA==");

		client.logout();
		assert_eq!(client.authorization(), "Basic YW5vbjprZXk=");
		client.logout();
		assert_eq!(client.authorization(), "Basic YW5vbjprZXk=");
	}

	#[test]
	fn test_clones_share_session_state() {
		let client = builder().build().unwrap();
		let other = client.clone();
		client.set_authorization("joe", "secret");
		assert_eq!(other.authorization(), client.authorization());
	}

	#[test]
	fn test_application_key_follows_platform() {
		let android = builder()
			.platform(Platform::Android)
			.android_application_key("a-key")
			.ios_application_key("i-key")
			.build()
			.unwrap();
		let ios = builder()
			.platform(Platform::Ios)
			.android_application_key("a-key")
			.ios_application_key("i-key")
			.build()
			.unwrap();

		assert_eq!(android.application_key(), Some("a-key"));
		assert_eq!(ios.application_key(), Some("i-key"));
	}

	#[test]
	fn test_device_id_is_shared_between_clients() {
		let first = builder().build().unwrap();
		let second = builder().build().unwrap();
		assert_eq!(first.device_id(), first.device_id());
		assert_eq!(first.device_id(), second.device_id());
	}

	#[test]
	fn test_client_config_defaults() {
		let config = ClientConfig::default();
		assert_eq!(config.request_timeout, Duration::from_secs(30));
	}

	#[test]
	fn test_require_field() {
		assert!(require_field(r#"{"id":"u1"}"#.to_string(), "id").is_ok());
		assert!(require_field(r#"{"id":null}"#.to_string(), "id").is_err());
		assert!(require_field("{}".to_string(), "id").is_err());
		assert!(require_field("<html>".to_string(), "id").is_err());
		assert!(require_field("[1,2]".to_string(), "id").is_err());
	}

	#[test]
	fn test_payload_bodies() {
		assert_eq!(Payload::from("raw").into_body().unwrap(), "raw");
		assert_eq!(
			Payload::from(serde_json::json!({"a": 1})).into_body().unwrap(),
			r#"{"a":1}"#
		);
	}
}
