// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-side event batching and the periodic auto-flush handle.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use mcs_core::AnalyticsEvent;
use tokio::task::JoinHandle;

/// Period used by `start_auto_flush_events` when the caller has no preference.
pub const DEFAULT_AUTO_FLUSH_PERIOD: Duration = Duration::from_millis(15_000);

/// Ordered queue of analytics events awaiting a combined send.
///
/// Every operation takes the lock once and never holds it across an await,
/// so a snapshot is taken and cleared in a single step.
#[derive(Debug, Default)]
pub(crate) struct EventBuffer {
	events: Mutex<Vec<AnalyticsEvent>>,
}

impl EventBuffer {
	/// Creates an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an event.
	pub fn push(&self, event: AnalyticsEvent) {
		self.lock().push(event);
	}

	/// Removes and returns every queued event, oldest first.
	pub fn take(&self) -> Vec<AnalyticsEvent> {
		std::mem::take(&mut *self.lock())
	}

	/// Puts a previously taken batch back in front of anything queued since.
	pub fn restore(&self, mut batch: Vec<AnalyticsEvent>) {
		if batch.is_empty() {
			return;
		}
		let mut events = self.lock();
		batch.append(&mut events);
		*events = batch;
	}

	/// Copy of the queued events, oldest first.
	pub fn snapshot(&self) -> Vec<AnalyticsEvent> {
		self.lock().clone()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AnalyticsEvent>> {
		self.events.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

/// Holds the handle of the single periodic flush task of a client.
#[derive(Debug, Default)]
pub(crate) struct AutoFlush {
	handle: Mutex<Option<JoinHandle<()>>>,
}

impl AutoFlush {
	/// Creates a handle with no task running.
	pub fn new() -> Self {
		Self::default()
	}

	/// Tracks a newly spawned flush task, cancelling the one it replaces.
	pub fn replace(&self, handle: JoinHandle<()>) {
		if let Some(previous) = self.lock().replace(handle) {
			previous.abort();
		}
	}

	/// Cancels the flush task. Returns false when none was running.
	pub fn stop(&self) -> bool {
		match self.lock().take() {
			Some(handle) => {
				handle.abort();
				true
			}
			None => false,
		}
	}

	/// Whether a flush task handle is currently held.
	pub fn is_started(&self) -> bool {
		self.lock().is_some()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
		self.handle.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Drop for AutoFlush {
	fn drop(&mut self) {
		let handle = self
			.handle
			.get_mut()
			.unwrap_or_else(PoisonError::into_inner)
			.take();
		if let Some(handle) = handle {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn names(events: &[AnalyticsEvent]) -> Vec<String> {
		events.iter().map(|e| e.name.clone()).collect()
	}

	#[test]
	fn take_empties_buffer_and_keeps_order() {
		let buffer = EventBuffer::new();
		buffer.push(AnalyticsEvent::custom("a"));
		buffer.push(AnalyticsEvent::custom("b"));

		let batch = buffer.take();
		assert_eq!(names(&batch), vec!["a", "b"]);
		assert!(buffer.snapshot().is_empty());
	}

	#[test]
	fn restore_goes_before_newer_events() {
		let buffer = EventBuffer::new();
		buffer.push(AnalyticsEvent::custom("a"));
		buffer.push(AnalyticsEvent::custom("b"));
		let batch = buffer.take();

		buffer.push(AnalyticsEvent::custom("c"));
		buffer.restore(batch);

		assert_eq!(names(&buffer.snapshot()), vec!["a", "b", "c"]);
		assert_eq!(buffer.snapshot().len(), 3);
	}

	#[test]
	fn restore_empty_batch_is_noop() {
		let buffer = EventBuffer::new();
		buffer.push(AnalyticsEvent::custom("a"));
		buffer.restore(Vec::new());
		assert_eq!(names(&buffer.snapshot()), vec!["a"]);
	}

	#[tokio::test]
	async fn auto_flush_replace_aborts_previous() {
		let auto_flush = AutoFlush::new();
		assert!(!auto_flush.is_started());

		let first = tokio::spawn(std::future::pending::<()>());
		let first_abort = first.abort_handle();
		auto_flush.replace(first);
		auto_flush.replace(tokio::spawn(std::future::pending::<()>()));

		for _ in 0..100 {
			if first_abort.is_finished() {
				break;
			}
			tokio::task::yield_now().await;
		}
		assert!(first_abort.is_finished());
		assert!(auto_flush.is_started());

		assert!(auto_flush.stop());
		assert!(!auto_flush.is_started());
		assert!(!auto_flush.stop());
	}

	proptest! {
		#[test]
		fn take_then_restore_preserves_total_order(
			before in proptest::collection::vec("[a-z]{1,6}", 0..12),
			during in proptest::collection::vec("[a-z]{1,6}", 0..12),
		) {
			let buffer = EventBuffer::new();
			for name in &before {
				buffer.push(AnalyticsEvent::custom(name.clone()));
			}
			let batch = buffer.take();
			for name in &during {
				buffer.push(AnalyticsEvent::custom(name.clone()));
			}
			buffer.restore(batch);

			let expected: Vec<String> = before.iter().chain(during.iter()).cloned().collect();
			prop_assert_eq!(names(&buffer.snapshot()), expected);
		}
	}
}
