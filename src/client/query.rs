//! Query, queryMore, and the full-table loop built on one shared POST helper.

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	client::{QueryPager, ZuoraClient},
	error::{ConfigError, QueryError},
	http::{self, HttpTransport, ResponseMetadataSlot},
	oauth::TransportErrorMapper,
	obs::{self, OpKind},
	query::{
		Query, QueryLocator, QueryMoreRequest, QueryPage, QueryRequest, Record,
		SUBSCRIPTION_TABLE, decode_page,
	},
};

const BODY_PREVIEW_LIMIT: usize = 256;
const JSON: &str = "application/json";

impl<C, M> ZuoraClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the first page of `query` from `/v1/action/query`.
	pub async fn fetch_page(&self, query: &Query) -> Result<QueryPage> {
		let query_string = query.query_string();

		obs::observe(OpKind::Query, "fetch_page", async {
			self.post(OpKind::Query, &self.endpoints.query, &QueryRequest {
				query_string: &query_string,
			})
			.await
		})
		.await
	}

	/// Fetches the page identified by `locator` from `/v1/action/queryMore`.
	pub async fn fetch_next_page(&self, locator: &QueryLocator) -> Result<QueryPage> {
		obs::observe(OpKind::QueryMore, "fetch_next_page", async {
			self.post(OpKind::QueryMore, &self.endpoints.query_more, &QueryMoreRequest {
				query_locator: locator,
			})
			.await
		})
		.await
	}

	/// Fetches every page of `query` and concatenates the records in server order.
	///
	/// Issues one query call plus one queryMore call per following page. A failure part-way
	/// through discards the records gathered so far; drive [`ZuoraClient::pages`] directly to
	/// keep them.
	pub async fn fetch_all(&self, query: &Query) -> Result<Vec<Record>> {
		obs::observe(OpKind::QueryAll, "fetch_all", async {
			let mut pager = self.pages(query);
			let mut records = Vec::new();

			while let Some(page) = pager.next_page().await? {
				records.extend(page.records);
			}

			Ok(records)
		})
		.await
	}

	/// Fetches every `Subscription` record with the given columns (`Id` when empty).
	pub async fn list_subscriptions<I, S>(&self, columns: I) -> Result<Vec<Record>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fetch_all(&Query::new(SUBSCRIPTION_TABLE).select(columns)).await
	}

	/// Returns the lazy page sequence for `query`, bounded by [`ZuoraClient::max_pages`].
	pub fn pages(&self, query: &Query) -> QueryPager<'_, C, M> {
		QueryPager::new(self, query.clone())
	}

	/// POSTs a JSON body with the bearer token and decodes the answer as a page.
	async fn post<B>(&self, op: OpKind, url: &Url, body: &B) -> Result<QueryPage>
	where
		B: Serialize,
	{
		let payload = serde_json::to_vec(body).map_err(ConfigError::from)?;
		let request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(AUTHORIZATION, self.token.authorization_header())
			.header(CONTENT_TYPE, JSON)
			.header(ACCEPT, JSON)
			.body(payload)
			.map_err(ConfigError::from)?;
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone());
		let response = handle.call(request).await.map_err(|err| {
			self.transport_mapper.map_transport_error(op, slot.take().as_ref(), err)
		})?;
		let status = response.status();

		if !status.is_success() {
			return Err(QueryError::Status {
				endpoint: op.as_str(),
				status: status.as_u16(),
				message: body_preview(response.body()),
				request_id: http::request_id(response.headers()),
			}
			.into());
		}

		let page = decode_page(op.as_str(), response.body())?;

		obs::record_page_records(op, page.records.len());

		Ok(page)
	}
}

fn body_preview(body: &[u8]) -> String {
	String::from_utf8_lossy(body).trim().chars().take(BODY_PREVIEW_LIMIT).collect()
}
