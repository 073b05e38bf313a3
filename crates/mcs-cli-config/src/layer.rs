// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use serde::Deserialize;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub backend: Option<BackendLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

#[derive(Clone, Default, Deserialize)]
pub struct BackendLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub backend_id: Option<String>,
	#[serde(default)]
	pub android_application_key: Option<String>,
	#[serde(default)]
	pub ios_application_key: Option<String>,
	#[serde(default)]
	pub anonymous_key: Option<String>,
	#[serde(default)]
	pub platform: Option<String>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for BackendLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BackendLayer")
			.field("base_url", &self.base_url)
			.field("backend_id", &self.backend_id)
			.field("android_application_key", &self.android_application_key)
			.field("ios_application_key", &self.ios_application_key)
			.field(
				"anonymous_key",
				&self.anonymous_key.as_ref().map(|_| "[REDACTED]"),
			)
			.field("platform", &self.platform)
			.field("request_timeout_secs", &self.request_timeout_secs)
			.finish()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

impl ConfigLayer {
	/// Merge another layer on top of this one; values present in `other` win.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.backend, other.backend, BackendLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn replace_if_some<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}

impl BackendLayer {
	fn merge(&mut self, other: BackendLayer) {
		replace_if_some(&mut self.base_url, other.base_url);
		replace_if_some(&mut self.backend_id, other.backend_id);
		replace_if_some(
			&mut self.android_application_key,
			other.android_application_key,
		);
		replace_if_some(&mut self.ios_application_key, other.ios_application_key);
		replace_if_some(&mut self.anonymous_key, other.anonymous_key);
		replace_if_some(&mut self.platform, other.platform);
		replace_if_some(&mut self.request_timeout_secs, other.request_timeout_secs);
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		replace_if_some(&mut self.level, other.level);
		replace_if_some(&mut self.format, other.format);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_toml_layer() {
		let layer: ConfigLayer = toml::from_str(
			r#"
			[backend]
			base_url = "https://mcs.example.com"
			backend_id = "backend-1"
			platform = "ios"

			[logging]
			level = "debug"
			"#,
		)
		.unwrap();

		let backend = layer.backend.unwrap();
		assert_eq!(backend.base_url.as_deref(), Some("https://mcs.example.com"));
		assert_eq!(backend.platform.as_deref(), Some("ios"));
		assert!(backend.anonymous_key.is_none());
		assert_eq!(layer.logging.unwrap().level.as_deref(), Some("debug"));
	}

	#[test]
	fn test_merge_overrides_only_present_fields() {
		let mut base = ConfigLayer {
			backend: Some(BackendLayer {
				base_url: Some("https://a.example.com".into()),
				backend_id: Some("a".into()),
				..Default::default()
			}),
			logging: None,
		};
		let top = ConfigLayer {
			backend: Some(BackendLayer {
				backend_id: Some("b".into()),
				..Default::default()
			}),
			logging: Some(LoggingLayer {
				level: Some("warn".into()),
				format: None,
			}),
		};

		base.merge(top);

		let backend = base.backend.unwrap();
		assert_eq!(backend.base_url.as_deref(), Some("https://a.example.com"));
		assert_eq!(backend.backend_id.as_deref(), Some("b"));
		assert_eq!(base.logging.unwrap().level.as_deref(), Some("warn"));
	}

	#[test]
	fn test_debug_redacts_anonymous_key() {
		let layer = BackendLayer {
			anonymous_key: Some("c2VjcmV0".into()),
			..Default::default()
		};
		let debug = format!("{layer:?}");
		assert!(!debug.contains("c2VjcmV0"));
		assert!(debug.contains("[REDACTED]"));
	}
}
