// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

/// Resolved XDG paths for the MCS client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/mcs/config.toml
	pub user_config_file: PathBuf,
	/// Data directory: ~/.local/share/mcs/
	pub data_dir: PathBuf,
}

impl PathsConfig {
	/// Get the config directory (parent of user_config_file)
	pub fn config_dir(&self) -> PathBuf {
		self
			.user_config_file
			.parent()
			.map(|p| p.to_path_buf())
			.unwrap_or_else(|| self.user_config_file.clone())
	}

	/// Key-value store holding the persisted device id.
	pub fn store_file(&self) -> PathBuf {
		self.data_dir.join("store.json")
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/mcs/config.toml"),
			data_dir: PathBuf::from("~/.local/share/mcs"),
		}
	}
}

/// Resolve XDG paths according to the Base Directory Specification.
///
/// Uses environment variables if set, otherwise falls back to defaults:
/// - XDG_CONFIG_HOME or ~/.config
/// - XDG_DATA_HOME or ~/.local/share
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let data_home = std::env::var_os("XDG_DATA_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/share"));

	tracing::debug!(
		config_home = %config_home.display(),
		data_home = %data_home.display(),
		"resolved XDG paths"
	);

	Ok(PathsConfig {
		user_config_file: config_home.join("mcs/config.toml"),
		data_dir: data_home.join("mcs"),
	})
}
