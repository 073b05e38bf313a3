// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the MCS mobile backend SDK.
//!
//! This crate holds the request-construction vocabulary shared by the client
//! SDK (`mcs`) and the command-line harness (`mcs-cli`): header names and the
//! ordered header set, endpoint paths, platform selection, and the JSON
//! payloads the backend accepts and returns. Nothing here performs I/O.
//!
//! # Example
//!
//! ```
//! use mcs_core::{basic_auth, build_query, paths, QueryParam};
//!
//! assert_eq!(basic_auth("joe", "secret"), "Basic am9lOnNlY3JldA==");
//!
//! let query = build_query(&[QueryParam::new("q", "ankara"), QueryParam::new("appid", "k1")]);
//! assert_eq!(query, "q=ankara&appid=k1");
//!
//! assert_eq!(paths::user("joe"), "/mobile/platform/users/joe");
//! ```

pub mod device;
pub mod event;
pub mod headers;
pub mod location;
pub mod paths;
pub mod platform;
pub mod request;
pub mod storage;

pub use device::{DeviceRegistration, MobileClient};
pub use event::{AnalyticsEvent, EVENT_TYPE_CUSTOM};
pub use headers::{basic_auth, Headers};
pub use location::{LocationKind, LocationLookup};
pub use platform::Platform;
pub use request::{build_query, HeaderParam, QueryParam, RequestOptions, DEFAULT_API_VERSION};
pub use storage::{CollectionSummary, ObjectRef, StoreObject};

/// Re-exported so transports and callers agree on the method type.
pub use http::Method;
