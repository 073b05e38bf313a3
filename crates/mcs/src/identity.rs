// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Device and session identifiers sent with analytics.

use std::sync::OnceLock;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::store::KeyValueStore;

/// Key under which the generated device id is persisted.
pub const DEVICE_ID_KEY: &str = "mcs-deviceId";

static SESSION_ID: OnceLock<String> = OnceLock::new();
static DEVICE_ID: OnceLock<String> = OnceLock::new();

/// Identifier of the current process lifetime. Generated on first use and
/// never persisted.
pub fn session_id() -> &'static str {
	SESSION_ID.get_or_init(|| Uuid::new_v4().to_string())
}

/// Device id shared by every client in the process.
///
/// The first call resolves it through `store`; the store argument of later
/// calls is not consulted.
pub fn device_id(store: &dyn KeyValueStore) -> &'static str {
	DEVICE_ID.get_or_init(|| resolve_device_id(store))
}

/// Reads the persisted device id, generating and persisting one if absent.
///
/// Store failures never fail the caller: the freshly generated id is used for
/// this process and persistence is retried on the next start.
pub fn resolve_device_id(store: &dyn KeyValueStore) -> String {
	match store.get_string(DEVICE_ID_KEY) {
		Ok(Some(id)) if !id.is_empty() => return id,
		Ok(_) => {}
		Err(e) => warn!(error = %e, "Failed to read persisted device id"),
	}

	let id = Uuid::new_v4().to_string();
	match store.set_string(DEVICE_ID_KEY, &id) {
		Ok(()) => debug!("Generated and persisted new device id"),
		Err(e) => warn!(error = %e, "Failed to persist device id"),
	}
	id
}
