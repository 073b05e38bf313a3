// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Push-notification device registration payloads.

use serde::{Deserialize, Serialize};

use crate::Platform;

/// Body of `POST /mobile/platform/devices/register|deregister`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
	pub notification_token: String,
	pub notification_provider: String,
	pub mobile_client: MobileClient,
}

/// The application installation a token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileClient {
	/// Application package name.
	pub id: String,
	/// Application version; omitted on deregistration.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	pub platform: String,
}

impl DeviceRegistration {
	/// Registration body, carrying the application version.
	pub fn register(
		token: impl Into<String>,
		platform: Platform,
		package_name: impl Into<String>,
		version: impl Into<String>,
	) -> Self {
		Self {
			notification_token: token.into(),
			notification_provider: platform.notification_provider().to_string(),
			mobile_client: MobileClient {
				id: package_name.into(),
				version: Some(version.into()),
				platform: platform.client_platform().to_string(),
			},
		}
	}

	/// Deregistration body; no application version is sent.
	pub fn deregister(
		token: impl Into<String>,
		platform: Platform,
		package_name: impl Into<String>,
	) -> Self {
		Self {
			notification_token: token.into(),
			notification_provider: platform.notification_provider().to_string(),
			mobile_client: MobileClient {
				id: package_name.into(),
				version: None,
				platform: platform.client_platform().to_string(),
			},
		}
	}
}
