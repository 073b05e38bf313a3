// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcs::{
	HttpRequest, HttpResponse, KeyValueStore, McsClient, MemoryStore, Platform, PushRegistrar,
	Transport, TransportError,
};
use tokio::sync::Notify;

pub const BASE_URL: &str = "https://mcs.example.com";
pub const BACKEND_ID: &str = "backend-1";
pub const ANONYMOUS_KEY: &str = "YW5vbjprZXk=";

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport that records every request and answers from a closure.
///
/// When gated, each `send` waits for one `release()` after recording the
/// request, so tests can act while a request is in flight.
pub struct MockTransport {
	requests: Mutex<Vec<HttpRequest>>,
	responder: Box<Responder>,
	gate: Option<Arc<Notify>>,
	calls: AtomicUsize,
}

impl MockTransport {
	pub fn new<F>(responder: F) -> Arc<Self>
	where
		F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
	{
		Arc::new(Self {
			requests: Mutex::new(Vec::new()),
			responder: Box::new(responder),
			gate: None,
			calls: AtomicUsize::new(0),
		})
	}

	pub fn gated<F>(responder: F) -> Arc<Self>
	where
		F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
	{
		Arc::new(Self {
			requests: Mutex::new(Vec::new()),
			responder: Box::new(responder),
			gate: Some(Arc::new(Notify::new())),
			calls: AtomicUsize::new(0),
		})
	}

	/// Always answers 200 with the given body.
	pub fn replying(body: &'static str) -> Arc<Self> {
		Self::new(move |_| Ok(HttpResponse::ok(body)))
	}

	/// Always fails as if the connection was refused.
	pub fn failing() -> Arc<Self> {
		Self::new(|_| Err(TransportError::Unavailable("connection refused".to_string())))
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().unwrap().clone()
	}

	pub fn last_request(&self) -> HttpRequest {
		self.requests().pop().expect("no request recorded")
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Resolves once at least `count` requests have been recorded.
	pub async fn wait_for_calls(&self, count: usize) {
		while self.call_count() < count {
			tokio::task::yield_now().await;
		}
	}

	/// Lets one gated request complete.
	pub fn release(&self) {
		if let Some(gate) = &self.gate {
			gate.notify_one();
		}
	}
}

#[async_trait]
impl Transport for MockTransport {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
		self.requests.lock().unwrap().push(request.clone());
		self.calls.fetch_add(1, Ordering::SeqCst);

		if let Some(gate) = &self.gate {
			gate.notified().await;
		}

		(self.responder)(&request)
	}
}

pub fn builder(transport: Arc<MockTransport>) -> mcs::McsClientBuilder {
	McsClient::builder()
		.base_url(BASE_URL)
		.backend_id(BACKEND_ID)
		.android_application_key("android-key")
		.ios_application_key("ios-key")
		.anonymous_key(ANONYMOUS_KEY)
		.platform(Platform::Android)
		.transport(transport)
}

pub fn client(transport: Arc<MockTransport>) -> McsClient {
	builder(transport).build().unwrap()
}

pub fn client_with(
	transport: Arc<MockTransport>,
	registrar: Arc<dyn PushRegistrar>,
	store: Arc<dyn KeyValueStore>,
) -> McsClient {
	builder(transport)
		.push_registrar(registrar)
		.key_value_store(store)
		.build()
		.unwrap()
}

pub fn memory_store() -> Arc<MemoryStore> {
	Arc::new(MemoryStore::new())
}

pub fn body_json(request: &HttpRequest) -> serde_json::Value {
	serde_json::from_str(request.body.as_deref().unwrap_or("null")).unwrap()
}
