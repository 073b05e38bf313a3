// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the MCS SDK.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, McsError>;

/// MCS SDK errors.
#[derive(Debug, Error)]
pub enum McsError {
	/// The transport could not complete the exchange, or the backend
	/// answered with a non-success status.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The backend answered, but the body was not JSON or lacked the field
	/// that marks success. `body` is the raw response text.
	#[error("unexpected response: {body}")]
	UnexpectedResponse { body: String },

	/// The push-registration capability did not yield a token.
	#[error("Register failed.")]
	RegisterFailed,

	/// The push-registration capability did not yield a token while
	/// deregistering.
	#[error("Deregister failed.")]
	DeregisterFailed,

	/// Base URL is missing or blank.
	#[error("invalid base URL")]
	InvalidBaseUrl,

	/// Backend identifier is missing or blank.
	#[error("backend ID is required")]
	MissingBackendId,

	/// Failed to serialize a request body.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl McsError {
	/// Wraps a raw response body that did not meet expectations.
	pub fn unexpected(body: impl Into<String>) -> Self {
		Self::UnexpectedResponse { body: body.into() }
	}

	/// The raw response body carried by the error, if any.
	pub fn body(&self) -> Option<&str> {
		match self {
			McsError::UnexpectedResponse { body } => Some(body),
			McsError::Transport(TransportError::Status { body, .. }) => Some(body),
			_ => None,
		}
	}
}
