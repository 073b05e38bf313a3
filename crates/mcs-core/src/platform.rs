// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mobile operating system family the client reports as.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The operating system family, which selects the push provider, the
/// platform tag in device registrations and the analytics application key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	Android,
	Ios,
}

impl Platform {
	/// The platform of the compile target. Anything that is not iOS reports
	/// as Android.
	pub const fn current() -> Self {
		if cfg!(target_os = "ios") {
			Platform::Ios
		} else {
			Platform::Android
		}
	}

	/// Push provider name used in device registrations.
	pub const fn notification_provider(self) -> &'static str {
		match self {
			Platform::Ios => "APNS",
			Platform::Android => "GCM",
		}
	}

	/// Platform tag used in the `mobileClient` registration object.
	pub const fn client_platform(self) -> &'static str {
		match self {
			Platform::Ios => "IOS",
			Platform::Android => "ANDROID",
		}
	}
}

impl Default for Platform {
	fn default() -> Self {
		Self::current()
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Platform::Android => write!(f, "android"),
			Platform::Ios => write!(f, "ios"),
		}
	}
}

impl FromStr for Platform {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"android" => Ok(Platform::Android),
			"ios" => Ok(Platform::Ios),
			other => Err(format!("unknown platform '{other}' (expected 'android' or 'ios')")),
		}
	}
}
