mod common;

// std
use std::num::NonZeroU32;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use zuora_query::{Error, Query, QueryLocator, error::QueryError};

#[tokio::test]
async fn single_page_result_issues_no_query_more() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let query_mock = mock_query(
		&server,
		"SELECT Id FROM Subscription",
		json!({ "records": records(&["S1", "S2"]), "size": 2, "done": true }),
	)
	.await;
	let query_more_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/action/queryMore");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = connect(&server).await;
	let records = client
		.fetch_all(&Query::new("Subscription"))
		.await
		.expect("Single page query should succeed.");

	assert_eq!(records.len(), 2);
	assert_eq!(records[0]["Id"], "S1");
	assert_eq!(records[1]["Id"], "S2");

	query_mock.assert_calls_async(1).await;
	query_more_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn follows_query_locators_until_exhausted() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let first = mock_query(
		&server,
		"SELECT Id FROM Account",
		json!({ "records": records(&["A1", "A2"]), "queryLocator": "L1", "done": false }),
	)
	.await;
	let second = mock_query_more(
		&server,
		"L1",
		json!({ "records": records(&["A3"]), "queryLocator": "L2", "done": false }),
	)
	.await;
	let third =
		mock_query_more(&server, "L2", json!({ "records": records(&["A4"]), "done": true })).await;
	let client = connect(&server).await;
	let records = client
		.fetch_all(&Query::new("Account"))
		.await
		.expect("Paginated query should succeed.");
	let ids = records.iter().map(|record| record["Id"].clone()).collect::<Vec<_>>();

	assert_eq!(ids, vec![json!("A1"), json!("A2"), json!("A3"), json!("A4")]);

	first.assert_calls_async(1).await;
	second.assert_calls_async(1).await;
	third.assert_calls_async(1).await;
}

#[tokio::test]
async fn list_subscriptions_selects_requested_columns() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let query_mock = mock_query(
		&server,
		"SELECT AccountId FROM Subscription",
		json!({ "records": [{ "AccountId": "acc-1" }, { "AccountId": "acc-2" }], "done": true }),
	)
	.await;
	let client = connect(&server).await;
	let records =
		client.list_subscriptions(["AccountId"]).await.expect("Listing subscriptions should succeed.");

	assert_eq!(records.len(), 2);
	assert_eq!(records[1]["AccountId"], "acc-2");

	query_mock.assert_async().await;
}

#[tokio::test]
async fn empty_result_without_records_field_is_empty() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let query_mock =
		mock_query(&server, "SELECT Id FROM Subscription", json!({ "size": 0, "done": true }))
			.await;
	let client = connect(&server).await;
	let records = client
		.list_subscriptions(Vec::<String>::new())
		.await
		.expect("Empty result should succeed.");

	assert!(records.is_empty());

	query_mock.assert_async().await;
}

#[tokio::test]
async fn fetch_page_returns_locator_without_following_it() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let query_mock = mock_query(
		&server,
		"SELECT A,B FROM T",
		json!({ "records": [{ "A": 1, "B": "x" }], "queryLocator": "next-1", "size": 1 }),
	)
	.await;
	let client = connect(&server).await;
	let page = client
		.fetch_page(&Query::new("T").select(["A", "B"]))
		.await
		.expect("Single page fetch should succeed.");

	assert_eq!(page.records.len(), 1);
	assert_eq!(page.records[0]["A"], 1);
	assert_eq!(page.query_locator, Some(QueryLocator::new("next-1")));
	assert_eq!(page.size, Some(1));
	assert!(!page.is_terminal());

	query_mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_query_surfaces_status_and_request_id() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let query_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/action/query");
			then.status(401)
				.header("content-type", "application/json")
				.header("Zuora-Request-Id", "req-401")
				.body(json!({ "message": "Authentication error" }).to_string());
		})
		.await;
	let client = connect(&server).await;
	let err = client
		.fetch_all(&Query::new("Subscription"))
		.await
		.expect_err("Expired tokens should fail the query.");

	match err {
		Error::Query(QueryError::Status { endpoint, status, message, request_id }) => {
			assert_eq!(endpoint, "query");
			assert_eq!(status, 401);
			assert!(message.contains("Authentication error"), "Unexpected message: {message}.");
			assert_eq!(request_id.as_deref(), Some("req-401"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	query_mock.assert_async().await;
}

#[tokio::test]
async fn fault_payload_is_a_query_error() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let query_mock = mock_query(
		&server,
		"SELECT Id FROM Nope",
		json!({ "faultcode": "fns:INVALID_TYPE", "faultstring": "invalid ZOQL: Nope" }),
	)
	.await;
	let client = connect(&server).await;
	let err = client
		.fetch_all(&Query::new("Nope"))
		.await
		.expect_err("Fault payloads should fail the query.");

	match err {
		Error::Query(QueryError::Fault { endpoint, code, message }) => {
			assert_eq!(endpoint, "query");
			assert_eq!(code, "fns:INVALID_TYPE");
			assert_eq!(message, "invalid ZOQL: Nope");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	query_mock.assert_async().await;
}

#[tokio::test]
async fn malformed_page_is_a_parse_error() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let query_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/action/query");
			then.status(200).header("content-type", "application/json").body("not json");
		})
		.await;
	let client = connect(&server).await;
	let err = client
		.fetch_page(&Query::new("Subscription"))
		.await
		.expect_err("Non-JSON bodies should fail to decode.");

	assert!(
		matches!(err, Error::Query(QueryError::Parse { endpoint: "query", .. })),
		"Unexpected error: {err:?}."
	);

	query_mock.assert_async().await;
}

#[tokio::test]
async fn repeating_locator_stops_at_page_limit() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let first = mock_query(
		&server,
		"SELECT Id FROM Subscription",
		json!({ "records": records(&["S1"]), "queryLocator": "loop" }),
	)
	.await;
	let more =
		mock_query_more(&server, "loop", json!({ "records": records(&["S2"]), "queryLocator": "loop" }))
			.await;
	let client = connect(&server).await.with_max_pages(NonZeroU32::new(2));
	let err = client
		.list_subscriptions(["Id"])
		.await
		.expect_err("A server that never stops paging should hit the bound.");

	assert!(
		matches!(err, Error::Query(QueryError::PageLimitExceeded { limit: 2 })),
		"Unexpected error: {err:?}."
	);

	first.assert_calls_async(1).await;
	more.assert_calls_async(1).await;
}

#[tokio::test]
async fn pager_keeps_pages_fetched_before_a_failure() {
	let server = mock_server().await;
	let _token = mock_token(&server).await;
	let _first = mock_query(
		&server,
		"SELECT Id FROM Subscription",
		json!({ "records": records(&["S1", "S2"]), "queryLocator": "L1" }),
	)
	.await;
	let more = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/action/queryMore");
			then.status(500).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = connect(&server).await;
	let query = Query::new("Subscription");
	let mut pager = client.pages(&query);
	let mut kept = Vec::new();
	let err = loop {
		match pager.next_page().await {
			Ok(Some(page)) => kept.extend(page.records),
			Ok(None) => panic!("The failing page should end the sequence with an error."),
			Err(err) => break err,
		}
	};

	assert_eq!(kept.len(), 2);
	assert_eq!(pager.pages_fetched(), 1);
	assert!(pager.is_done());
	assert!(
		matches!(err, Error::Query(QueryError::Status { endpoint: "queryMore", status: 500, .. })),
		"Unexpected error: {err:?}."
	);
	assert!(matches!(pager.next_page().await, Ok(None)));

	more.assert_calls_async(1).await;
}
