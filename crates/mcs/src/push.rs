// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Push-notification registration capability.

use async_trait::async_trait;
use thiserror::Error;

/// Why the platform could not hand out a push token.
#[derive(Debug, Error)]
pub enum PushError {
	#[error("push notifications are not available on this host")]
	Unavailable,

	#[error("push registration denied: {0}")]
	Denied(String),
}

/// Obtains an opaque device token from the platform push service.
///
/// A single attempt is made per call; the SDK does not retry.
#[async_trait]
pub trait PushRegistrar: Send + Sync {
	async fn register_for_push(&self) -> Result<String, PushError>;
}

/// Registrar for hosts without a push service. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePushRegistrar;

#[async_trait]
impl PushRegistrar for UnavailablePushRegistrar {
	async fn register_for_push(&self) -> Result<String, PushError> {
		Err(PushError::Unavailable)
	}
}

/// Registrar that hands out a token obtained out-of-band.
#[derive(Debug, Clone)]
pub struct StaticPushRegistrar {
	token: String,
}

impl StaticPushRegistrar {
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			token: token.into(),
		}
	}
}

#[async_trait]
impl PushRegistrar for StaticPushRegistrar {
	async fn register_for_push(&self) -> Result<String, PushError> {
		Ok(self.token.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn unavailable_registrar_fails() {
		let result = UnavailablePushRegistrar.register_for_push().await;
		assert!(matches!(result, Err(PushError::Unavailable)));
	}

	#[test]
	fn static_registrar_returns_token() {
		let registrar = StaticPushRegistrar::new("tok-1");
		let first = tokio_test::assert_ok!(tokio_test::block_on(registrar.register_for_push()));
		let second = tokio_test::assert_ok!(tokio_test::block_on(registrar.register_for_push()));
		assert_eq!(first, "tok-1");
		assert_eq!(second, "tok-1");
	}
}
