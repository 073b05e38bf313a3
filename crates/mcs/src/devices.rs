// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Push-notification device registration.

use std::sync::PoisonError;

use mcs_core::headers::content_types;
use mcs_core::{paths, DeviceRegistration, Method};
use tracing::{info, instrument, warn};

use crate::client::{require_field, McsClient};
use crate::error::{McsError, Result};

/// Result reported by a successful deregistration.
pub const DEVICE_DELETED: &str = "Device Deleted.";

impl McsClient {
	/// Obtains a push token and registers it with the backend.
	///
	/// The token is remembered as [`McsClient::device_token`] as soon as the
	/// registrar yields it, before the backend answers. If the registrar
	/// fails no request is made and [`McsError::RegisterFailed`] is returned.
	#[instrument(skip(self))]
	pub async fn register_device_token(&self, package_name: &str, version: &str) -> Result<String> {
		let token = match self.inner.push_registrar.register_for_push().await {
			Ok(token) => token,
			Err(e) => {
				warn!(error = %e, "Push registration failed");
				return Err(McsError::RegisterFailed);
			}
		};

		*self
			.inner
			.device_token
			.write()
			.unwrap_or_else(PoisonError::into_inner) = Some(token.clone());

		let registration =
			DeviceRegistration::register(token, self.inner.platform, package_name, version);
		let body = serde_json::to_string(&registration)?;

		let response = self
			.dispatch(
				Method::POST,
				self.url(paths::DEVICES_REGISTER),
				self.base_headers(content_types::JSON_UTF8),
				Some(body),
			)
			.await?;
		let body = require_field(response.text(), "id")?;

		info!("Device registered for push notifications");
		Ok(body)
	}

	/// Obtains a fresh push token and deregisters it.
	///
	/// The newly obtained token is sent, not the one stored by a previous
	/// registration. Any successful response counts, whatever its body.
	#[instrument(skip(self))]
	pub async fn deregister_device_token(&self, package_name: &str) -> Result<&'static str> {
		let token = match self.inner.push_registrar.register_for_push().await {
			Ok(token) => token,
			Err(e) => {
				warn!(error = %e, "Push registration failed");
				return Err(McsError::DeregisterFailed);
			}
		};

		let registration = DeviceRegistration::deregister(token, self.inner.platform, package_name);
		let body = serde_json::to_string(&registration)?;

		self
			.dispatch(
				Method::POST,
				self.url(paths::DEVICES_DEREGISTER),
				self.base_headers(content_types::JSON_UTF8),
				Some(body),
			)
			.await?;

		info!("Device deregistered from push notifications");
		Ok(DEVICE_DELETED)
	}

	/// Last token obtained by [`McsClient::register_device_token`].
	pub fn device_token(&self) -> Option<String> {
		self
			.inner
			.device_token
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}
}
