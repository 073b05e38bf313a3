// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics event records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Type tag for events produced by `send_basic_event` / `store_basic_event`.
pub const EVENT_TYPE_CUSTOM: &str = "custom";

/// A single analytics event as submitted to the events endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
	pub name: String,
	#[serde(rename = "type")]
	pub event_type: String,
	/// ISO-8601 UTC timestamp with millisecond precision, e.g.
	/// `2015-06-24T02:59:08.123Z`.
	pub timestamp: String,
}

impl AnalyticsEvent {
	/// Creates a `custom` event stamped with the current time.
	pub fn custom(name: impl Into<String>) -> Self {
		Self::custom_at(name, Utc::now())
	}

	/// Creates a `custom` event stamped with the given time.
	pub fn custom_at(name: impl Into<String>, at: DateTime<Utc>) -> Self {
		Self {
			name: name.into(),
			event_type: EVENT_TYPE_CUSTOM.to_string(),
			timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn custom_event_serializes_type_field() {
		let at = Utc.with_ymd_and_hms(2015, 6, 24, 2, 59, 8).unwrap();
		let event = AnalyticsEvent::custom_at("opened", at);
		let json = serde_json::to_value(&event).unwrap();

		assert_eq!(
			json,
			serde_json::json!({
				"name": "opened",
				"type": "custom",
				"timestamp": "2015-06-24T02:59:08.000Z"
			})
		);
	}

	#[test]
	fn timestamp_parses_as_rfc3339() {
		let event = AnalyticsEvent::custom("x");
		let parsed = DateTime::parse_from_rfc3339(&event.timestamp);
		assert!(parsed.is_ok());
		assert!(event.timestamp.ends_with('Z'));
	}
}
