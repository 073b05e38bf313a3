// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the MCS SDK.
//!
//! Every client built here carries the same User-Agent so backend request
//! logs can be traced back to an SDK build.

mod client;

pub use client::{builder, new_client_with_timeout, user_agent};
