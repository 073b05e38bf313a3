// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::time::Duration;

use mcs_core::Platform;
use zeroize::Zeroizing;

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Default HTTP timeout for backend requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The final, validated configuration for the MCS CLI.
#[derive(Debug, Clone)]
pub struct McsConfig {
	pub backend: BackendConfig,
	pub logging: LoggingConfig,

	/// Resolved XDG paths
	pub paths: PathsConfig,
}

#[derive(Clone)]
pub struct BackendConfig {
	pub base_url: String,
	pub backend_id: String,
	pub android_application_key: Option<String>,
	pub ios_application_key: Option<String>,
	pub anonymous_key: Option<Zeroizing<String>>,
	pub platform: Platform,
	pub request_timeout: Duration,
}

impl std::fmt::Debug for BackendConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BackendConfig")
			.field("base_url", &self.base_url)
			.field("backend_id", &self.backend_id)
			.field("android_application_key", &self.android_application_key)
			.field("ios_application_key", &self.ios_application_key)
			.field(
				"anonymous_key",
				&self.anonymous_key.as_ref().map(|_| "[REDACTED]"),
			)
			.field("platform", &self.platform)
			.field("request_timeout", &self.request_timeout)
			.finish()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	/// `EnvFilter` directive used when `RUST_LOG` is unset.
	pub level: String,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

impl McsConfig {
	/// Resolve defaults and validate a merged layer.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		let backend = build_backend_config(layer.backend)?;
		let logging = build_logging_config(layer.logging)?;

		Ok(Self {
			backend,
			logging,
			paths,
		})
	}
}

fn build_backend_config(layer: Option<BackendLayer>) -> Result<BackendConfig, ConfigError> {
	let layer = layer.unwrap_or_default();

	let base_url = required(layer.base_url, "backend.base_url")?;
	if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
		return Err(ConfigError::invalid_value(
			"backend.base_url",
			"must start with http:// or https://",
		));
	}
	let backend_id = required(layer.backend_id, "backend.backend_id")?;

	let platform = match layer.platform {
		Some(value) => value
			.parse::<Platform>()
			.map_err(|message| ConfigError::invalid_value("backend.platform", message))?,
		None => Platform::current(),
	};

	let request_timeout = match layer.request_timeout_secs {
		Some(0) => {
			return Err(ConfigError::invalid_value(
				"backend.request_timeout_secs",
				"must be greater than zero",
			))
		}
		Some(secs) => Duration::from_secs(secs),
		None => DEFAULT_REQUEST_TIMEOUT,
	};

	Ok(BackendConfig {
		base_url,
		backend_id,
		android_application_key: layer.android_application_key,
		ios_application_key: layer.ios_application_key,
		anonymous_key: layer.anonymous_key.map(Zeroizing::new),
		platform,
		request_timeout,
	})
}

fn build_logging_config(layer: Option<LoggingLayer>) -> Result<LoggingConfig, ConfigError> {
	let layer = layer.unwrap_or_default();

	let format = match layer.format.as_deref() {
		None | Some("pretty") | Some("text") => LogFormat::Pretty,
		Some("json") => LogFormat::Json,
		Some(other) => {
			return Err(ConfigError::invalid_value(
				"logging.format",
				format!("unknown format: {other}"),
			))
		}
	};

	Ok(LoggingConfig {
		level: layer.level.unwrap_or_else(|| "info".to_string()),
		format,
	})
}

fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
		.ok_or_else(|| ConfigError::missing_field(field))
}
