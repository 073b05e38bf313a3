// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for the MCS mobile backend.
//!
//! [`McsClient`] wraps the backend's REST endpoints: each operation builds a
//! URL and headers from the client's configuration and session, performs one
//! exchange through a [`Transport`], and validates the response.
//!
//! # Features
//!
//! - **Session**: login, logout and anonymous access via basic auth
//! - **Push registration**: device token registration through a [`PushRegistrar`]
//! - **Analytics**: direct submission plus a client-side event batch buffer
//!   with restore-on-failure and periodic auto-flush
//! - **Object storage**: collection listing, object upload, download and delete
//! - **Custom APIs and location lookups**: raw-body proxies
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use mcs::{McsClient, ObjectRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = McsClient::builder()
//!         .base_url("https://mobile.example.com")
//!         .backend_id("a1b2c3")
//!         .android_application_key("android-key")
//!         .anonymous_key("YW5vbjpzZWNyZXQ=")
//!         .build()?;
//!
//!     client.login("joe", "secret").await?;
//!
//!     client.start_auto_flush_events(Duration::from_secs(15));
//!     client.store_basic_event("app_opened");
//!
//!     let collections = client.get_collection_list().await?;
//!     let photo = client.get_item(&ObjectRef::new("photos", "a1")).await?;
//!
//!     client.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod analytics;
mod batch;
mod client;
mod custom;
mod devices;
mod error;
mod identity;
mod location;
mod push;
mod storage;
mod store;
mod transport;

pub use analytics::AnalyticsRequest;
pub use batch::DEFAULT_AUTO_FLUSH_PERIOD;
pub use client::{McsClient, McsClientBuilder, Payload};
pub use devices::DEVICE_DELETED;
pub use error::{McsError, Result};
pub use identity::{device_id, resolve_device_id, session_id, DEVICE_ID_KEY};
pub use push::{PushError, PushRegistrar, StaticPushRegistrar, UnavailablePushRegistrar};
pub use storage::ITEM_DELETED;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

// Re-export core types for convenience
pub use mcs_core::{
	AnalyticsEvent, CollectionSummary, DeviceRegistration, HeaderParam, Headers, LocationKind,
	LocationLookup, Method, ObjectRef, Platform, QueryParam, RequestOptions, StoreObject,
};
