// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared build and version information for the MCS SDK and CLI.
//!
//! The SDK stamps every request with a User-Agent derived from these
//! compile-time constants, and the CLI prints them for `mcs --version`.

shadow_rs::shadow!(build);

#[cfg(feature = "serde")]
use serde::Serialize;

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
///
/// Derived at compile time from target configuration.
pub const PLATFORM: &str = env!("MCS_PLATFORM");

/// Core build information used by the SDK User-Agent and the CLI.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
	pub version: &'static str,
	pub git_sha: &'static str,
	pub build_timestamp: &'static str,
	pub platform: &'static str,
}

impl BuildInfo {
	/// Get the current build information (compile-time constants).
	#[allow(clippy::const_is_empty)]
	pub const fn current() -> Self {
		Self {
			version: build::PKG_VERSION,
			git_sha: if build::SHORT_COMMIT.is_empty() {
				"unknown"
			} else {
				build::SHORT_COMMIT
			},
			build_timestamp: build::BUILD_TIME,
			platform: PLATFORM,
		}
	}
}

/// Get the SDK version string.
pub const fn sdk_version() -> &'static str {
	build::PKG_VERSION
}
