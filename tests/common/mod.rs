//! Shared helpers for integration tests backed by `httpmock`.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use zuora_query::{
	Credentials, Endpoints, ReqwestZuoraClient, ZuoraClient,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	reqwest::Client,
};

pub const CLIENT_ID: &str = "zuora-client";
pub const CLIENT_SECRET: &str = "zuora-secret";
pub const ACCESS_TOKEN: &str = "test-access-token";

pub fn credentials() -> Credentials {
	Credentials::new(CLIENT_ID, CLIENT_SECRET).expect("Test credentials should be valid.")
}

pub fn endpoints(server: &MockServer) -> Endpoints {
	Endpoints::from_base_str(&server.base_url()).expect("Mock base URL should build endpoints.")
}

/// Starts a mock server after pinning the process-wide rustls crypto provider.
///
/// With the `kms` feature both `ring` and `aws-lc-rs` are linked, and the HTTPS listener inside
/// `httpmock` cannot pick one on its own.
pub async fn mock_server() -> MockServer {
	let _ = rustls::crypto::ring::default_provider().install_default();

	MockServer::start_async().await
}

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Registers a token endpoint that issues [`ACCESS_TOKEN`] for the test credentials.
pub async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.form_urlencoded_tuple("grant_type", "client_credentials")
				.form_urlencoded_tuple("client_id", CLIENT_ID)
				.form_urlencoded_tuple("client_secret", CLIENT_SECRET);
			then.status(200).header("content-type", "application/json").body(
				json!({
					"access_token": ACCESS_TOKEN,
					"token_type": "bearer",
					"expires_in": 3599,
					"scope": "entity.1a2b user.3c4d",
					"jti": "5e6f"
				})
				.to_string(),
			);
		})
		.await
}

/// Registers a `/v1/action/query` page for `query_string`.
pub async fn mock_query<'a>(
	server: &'a MockServer,
	query_string: &str,
	response: Value,
) -> httpmock::Mock<'a> {
	let query_string = query_string.to_owned();

	server
		.mock_async(move |when, then| {
			when.method(POST)
				.path("/v1/action/query")
				.header("authorization", format!("Bearer {ACCESS_TOKEN}"))
				.json_body(json!({ "queryString": query_string }));
			then.status(200).header("content-type", "application/json").body(response.to_string());
		})
		.await
}

/// Registers a `/v1/action/queryMore` page for `locator`.
pub async fn mock_query_more<'a>(
	server: &'a MockServer,
	locator: &str,
	response: Value,
) -> httpmock::Mock<'a> {
	let locator = locator.to_owned();

	server
		.mock_async(move |when, then| {
			when.method(POST)
				.path("/v1/action/queryMore")
				.header("authorization", format!("Bearer {ACCESS_TOKEN}"))
				.json_body(json!({ "queryLocator": locator }));
			then.status(200).header("content-type", "application/json").body(response.to_string());
		})
		.await
}

pub fn records(ids: &[&str]) -> Value {
	Value::Array(ids.iter().map(|id| json!({ "Id": id })).collect())
}

/// Connects a reqwest-backed client to the mock server.
pub async fn connect(server: &MockServer) -> ReqwestZuoraClient {
	ZuoraClient::connect_with(
		endpoints(server),
		credentials(),
		test_reqwest_http_client(),
		Arc::new(ReqwestTransportErrorMapper),
	)
	.await
	.expect("Client should connect against the mock token endpoint.")
}
