// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Endpoint path templates, relative to the configured base URL.

use crate::LocationKind;

pub const DEVICES_REGISTER: &str = "/mobile/platform/devices/register";
pub const DEVICES_DEREGISTER: &str = "/mobile/platform/devices/deregister";
pub const ANALYTICS_EVENTS: &str = "/mobile/platform/analytics/events";
pub const STORAGE_COLLECTIONS: &str = "/mobile/platform/storage/collections";
pub const APP_CONFIG: &str = "/mobile/platform/appconfig/client";

pub fn user(username: &str) -> String {
	format!("/mobile/platform/users/{username}")
}

pub fn collection_objects(collection_id: &str) -> String {
	format!("{STORAGE_COLLECTIONS}/{collection_id}/objects")
}

pub fn collection_object(collection_id: &str, item_id: &str) -> String {
	format!("{STORAGE_COLLECTIONS}/{collection_id}/objects/{item_id}")
}

pub fn custom_api(api_name: &str, endpoint: &str) -> String {
	format!("/mobile/custom/{api_name}/{endpoint}")
}

pub fn location(kind: LocationKind) -> String {
	format!("/mobile/platform/location/{}", kind.path_segment())
}
