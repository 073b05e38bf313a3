// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics submission, the event batch buffer and periodic auto-flush.

use std::sync::Arc;
use std::time::Duration;

use mcs_core::headers::{content_types, names};
use mcs_core::{paths, AnalyticsEvent, Headers, Method};
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::client::{require_field, McsClient, Payload};
use crate::error::Result;
use crate::identity::session_id;

/// A submission to the analytics events endpoint.
///
/// Device and session ids default to the client's persisted device id and the
/// process-wide session id.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsRequest {
	pub device_id: Option<String>,
	pub session_id: Option<String>,
	pub body: Payload,
}

impl AnalyticsRequest {
	pub fn new(body: impl Into<Payload>) -> Self {
		Self {
			device_id: None,
			session_id: None,
			body: body.into(),
		}
	}

	pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
		self.device_id = Some(device_id.into());
		self
	}

	pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
		self.session_id = Some(session_id.into());
		self
	}
}

impl McsClient {
	/// Posts a body to the analytics events endpoint.
	///
	/// Succeeds when the response is JSON carrying a non-null `message`.
	pub async fn send_analytic(&self, request: AnalyticsRequest) -> Result<String> {
		let device_id = match request.device_id {
			Some(id) => id,
			None => self.device_id().to_string(),
		};
		let session_id = request
			.session_id
			.unwrap_or_else(|| session_id().to_string());

		let mut headers = Headers::new()
			.with(names::BACKEND_ID, self.inner.backend_id.as_str())
			.with(names::AUTHORIZATION, self.authorization())
			.with(names::CONTENT_TYPE, content_types::JSON_UTF8);
		if let Some(key) = self.application_key() {
			headers.insert(names::APPLICATION_KEY, key);
		}
		headers.insert(names::ANALYTICS_SESSION_ID, session_id);
		headers.insert(names::DEVICE_ID, device_id);

		let body = request.body.into_body()?;
		let response = self
			.dispatch(
				Method::POST,
				self.url(paths::ANALYTICS_EVENTS),
				headers,
				Some(body),
			)
			.await?;

		require_field(response.text(), "message")
	}

	/// Sends a single `custom` event stamped with the current time.
	pub async fn send_basic_event(&self, event_name: &str) -> Result<String> {
		let events = vec![AnalyticsEvent::custom(event_name)];
		self.send_analytic(AnalyticsRequest::new(events)).await
	}

	/// Queues a `custom` event for the next flush without sending it.
	pub fn store_basic_event(&self, event_name: &str) {
		self.inner.events.push(AnalyticsEvent::custom(event_name));
	}

	/// Sends every queued event as one batch.
	///
	/// The buffer is emptied before the request goes out, so events stored
	/// while it is in flight start a new batch. If the send fails the batch is
	/// put back ahead of them and the error is returned. Returns `Ok(None)`
	/// without any request when nothing is queued.
	///
	/// Flushes of one client run one at a time, so a failed batch is always
	/// restored before the next flush takes the buffer.
	pub async fn flush_events(&self) -> Result<Option<String>> {
		let _flushing = self.inner.flush_lock.lock().await;
		let batch = self.inner.events.take();
		if batch.is_empty() {
			return Ok(None);
		}

		let count = batch.len();
		debug!(count, "Flushing event batch");

		match self
			.send_analytic(AnalyticsRequest::new(batch.clone()))
			.await
		{
			Ok(body) => Ok(Some(body)),
			Err(e) => {
				warn!(count, error = %e, "Event flush failed, batch re-queued");
				self.inner.events.restore(batch);
				Err(e)
			}
		}
	}

	/// Flushes queued events every `period`, replacing any running auto-flush.
	///
	/// The first flush happens one period after the call. Failures are logged
	/// and the events stay queued for the next tick. Requires a running tokio
	/// runtime; without one nothing is started.
	pub fn start_auto_flush_events(&self, period: Duration) {
		let Ok(runtime) = Handle::try_current() else {
			warn!("No tokio runtime available, auto-flush not started");
			return;
		};

		let period = period.max(Duration::from_millis(1));
		let inner = Arc::downgrade(&self.inner);

		let handle = runtime.spawn(async move {
			let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

			loop {
				ticker.tick().await;
				let Some(inner) = inner.upgrade() else {
					break;
				};
				let client = McsClient { inner };
				// Detached so stopping auto-flush never cuts off a batch in flight.
				let flush = tokio::spawn(async move { client.flush_events().await });
				match flush.await {
					Ok(Ok(_)) => {}
					Ok(Err(e)) => error!(error = %e, "Auto-flush of analytics events failed"),
					Err(e) => error!(error = %e, "Auto-flush task panicked"),
				}
			}
		});

		self.inner.auto_flush.replace(handle);
		info!(period_ms = period.as_millis() as u64, "Auto-flush of analytics events started");
	}

	/// Cancels auto-flush. Does nothing when it is not running.
	pub fn stop_auto_flush_events(&self) {
		if self.inner.auto_flush.stop() {
			info!("Auto-flush of analytics events stopped");
		}
	}

	/// Whether an auto-flush task is currently held.
	pub fn auto_flush_events_started(&self) -> bool {
		self.inner.auto_flush.is_started()
	}

	/// Events queued for the next flush, oldest first.
	pub fn pending_events(&self) -> Vec<AnalyticsEvent> {
		self.inner.events.snapshot()
	}
}
