// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	UserFile = 30,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Return empty layer - defaults applied during finalization
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
}

impl FileSource {
	/// User config: ~/.config/mcs/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
		}
	}

	/// Custom file path with specified precedence
	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `MCS_<FIELD>`, e.g. `MCS_BASE_URL`, `MCS_BACKEND_ID`.
pub struct EnvSource {
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Reads the process environment at load time.
	pub fn process() -> Self {
		Self { vars: None }
	}

	/// Reads a fixed set of variables instead of the process environment.
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(
				vars
					.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		let mut layer = ConfigLayer::default();

		for (key, value) in vars {
			if !key.starts_with("MCS_") {
				continue;
			}

			let value = value.trim().to_string();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "processing env var");

			match key.as_str() {
				"MCS_BASE_URL" => backend(&mut layer).base_url = Some(value),
				"MCS_BACKEND_ID" => backend(&mut layer).backend_id = Some(value),
				"MCS_ANDROID_APPLICATION_KEY" => {
					backend(&mut layer).android_application_key = Some(value)
				}
				"MCS_IOS_APPLICATION_KEY" => backend(&mut layer).ios_application_key = Some(value),
				"MCS_ANONYMOUS_KEY" => backend(&mut layer).anonymous_key = Some(value),
				"MCS_PLATFORM" => backend(&mut layer).platform = Some(value),
				"MCS_REQUEST_TIMEOUT_SECS" => {
					let secs = value.parse().map_err(|_| {
						ConfigError::invalid_value("MCS_REQUEST_TIMEOUT_SECS", "expected whole seconds")
					})?;
					backend(&mut layer).request_timeout_secs = Some(secs);
				}
				"MCS_LOG_LEVEL" => logging(&mut layer).level = Some(value),
				"MCS_LOG_FORMAT" => logging(&mut layer).format = Some(value),
				_ => {
					// Unknown MCS_ variable (MCS_PASSWORD is read by the CLI), ignore
				}
			}
		}

		Ok(layer)
	}
}

fn backend(layer: &mut ConfigLayer) -> &mut BackendLayer {
	layer.backend.get_or_insert_with(BackendLayer::default)
}

fn logging(layer: &mut ConfigLayer) -> &mut LoggingLayer {
	layer.logging.get_or_insert_with(LoggingLayer::default)
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub base_url: Option<String>,
	pub backend_id: Option<String>,
	pub platform: Option<String>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub config_file: Option<PathBuf>,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = ConfigLayer::default();

		if let Some(ref base_url) = self.overrides.base_url {
			backend(&mut layer).base_url = Some(base_url.clone());
		}
		if let Some(ref backend_id) = self.overrides.backend_id {
			backend(&mut layer).backend_id = Some(backend_id.clone());
		}
		if let Some(ref platform) = self.overrides.platform {
			backend(&mut layer).platform = Some(platform.clone());
		}
		if let Some(ref level) = self.overrides.log_level {
			logging(&mut layer).level = Some(level.clone());
		}
		if let Some(ref format) = self.overrides.log_format {
			logging(&mut layer).format = Some(format.clone());
		}

		Ok(layer)
	}
}
