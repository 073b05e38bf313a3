// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod common;

use common::{body_json, client, MockTransport, BACKEND_ID, BASE_URL};
use mcs::{HeaderParam, LocationKind, LocationLookup, McsError, Method, QueryParam};

#[tokio::test]
async fn api_get_joins_parameters() {
	let transport = MockTransport::replying(r#"{"temp":21}"#);
	let client = client(transport.clone());

	let body = client
		.api_caller_get(
			"weather",
			"current",
			&[QueryParam::new("q", "ankara"), QueryParam::new("appid", "k1")],
		)
		.await
		.unwrap();

	assert_eq!(body, r#"{"temp":21}"#);
	let request = transport.last_request();
	assert_eq!(request.method, Method::GET);
	assert_eq!(
		request.url,
		format!("{BASE_URL}/mobile/custom/weather/current?q=ankara&appid=k1")
	);
	assert_eq!(request.headers.get("Content-Type"), Some("application/json"));
	assert_eq!(request.headers.get("Oracle-Mobile-Backend-Id"), Some(BACKEND_ID));
}

#[tokio::test]
async fn api_get_returns_non_json_bodies() {
	let client = client(MockTransport::replying("plain text"));

	let body = client.api_caller_get("weather", "current", &[]).await.unwrap();

	assert_eq!(body, "plain text");
}

#[tokio::test]
async fn api_post_merges_header_parameters() {
	let transport = MockTransport::replying(r#"{"ok":true}"#);
	let client = client(transport.clone());

	client
		.api_caller_post(
			"orders",
			"create",
			serde_json::json!({"sku": "A-1", "qty": 2}),
			&[
				HeaderParam::new("X-Trace", "t-1"),
				HeaderParam::new("content-type", "application/vnd.orders+json"),
			],
		)
		.await
		.unwrap();

	let request = transport.last_request();
	assert_eq!(request.method, Method::POST);
	assert_eq!(request.url, format!("{BASE_URL}/mobile/custom/orders/create"));
	assert_eq!(request.headers.get("X-Trace"), Some("t-1"));
	assert_eq!(
		request.headers.get("Content-Type"),
		Some("application/vnd.orders+json")
	);
	assert_eq!(
		request.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case("content-type")).count(),
		1
	);
	assert_eq!(body_json(&request), serde_json::json!({"sku": "A-1", "qty": 2}));
}

#[tokio::test]
async fn api_post_sends_raw_string_body() {
	let transport = MockTransport::replying("");
	let client = client(transport.clone());

	client
		.api_caller_post("orders", "create", "sku=A-1", &[])
		.await
		.unwrap();

	assert_eq!(transport.last_request().body.as_deref(), Some("sku=A-1"));
}

#[tokio::test]
async fn app_policies_returns_raw_body() {
	let transport = MockTransport::replying(r#"{"timeout":30}"#);
	let client = client(transport.clone());

	let body = client.get_app_policies().await.unwrap();

	assert_eq!(body, r#"{"timeout":30}"#);
	assert_eq!(
		transport.last_request().url,
		format!("{BASE_URL}/mobile/platform/appconfig/client")
	);
}

#[tokio::test]
async fn location_lookups_build_expected_urls() {
	let transport = MockTransport::replying("[]");
	let client = client(transport.clone());

	client.get_device_locations_by_name("truck").await.unwrap();
	client.get_device_locations_by_id("7").await.unwrap();
	client.get_place_by_name("hq").await.unwrap();
	client.get_place_by_id("8").await.unwrap();
	client.get_asset_by_name("forklift").await.unwrap();
	client.get_asset_by_id("9").await.unwrap();

	let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
	let base = format!("{BASE_URL}/mobile/platform/location");
	assert_eq!(
		urls,
		vec![
			format!("{base}/devices?name=truck"),
			format!("{base}/devices/7"),
			format!("{base}/places?name=hq"),
			format!("{base}/places/8"),
			format!("{base}/assets?name=forklift"),
			format!("{base}/assets/9"),
		]
	);
}

#[tokio::test]
async fn location_list_returns_body_unconditionally() {
	let client = client(MockTransport::replying(r#"{"message":"nothing here"}"#));

	let body = client
		.get_location_list(LocationKind::Places, LocationLookup::ById("1".to_string()))
		.await
		.unwrap();

	assert_eq!(body, r#"{"message":"nothing here"}"#);
}

#[tokio::test]
async fn location_list_surfaces_transport_errors() {
	let client = client(MockTransport::failing());

	let err = client.get_place_by_id("1").await.unwrap_err();

	assert!(matches!(err, McsError::Transport(_)));
}
