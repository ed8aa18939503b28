//! Lazy, bounded page sequence behind [`ZuoraClient::fetch_all`].

// std
use std::num::NonZeroU32;
// self
use crate::{
	_prelude::*,
	client::ZuoraClient,
	error::QueryError,
	http::HttpTransport,
	oauth::TransportErrorMapper,
	obs::{self, OpKind},
	query::{Query, QueryLocator, QueryPage},
};

enum PagerState {
	Start(Query),
	Next(QueryLocator),
	Done,
}

/// Pages of one query, fetched one request at a time.
///
/// The first call to [`QueryPager::next_page`] issues the query; later calls follow the query
/// locator until a page arrives without one. The sequence is finite and cannot be restarted,
/// and after an error it yields nothing further. When the client has a page bound, asking for
/// a page past it fails with [`QueryError::PageLimitExceeded`] without issuing a request.
pub struct QueryPager<'a, C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: &'a ZuoraClient<C, M>,
	state: PagerState,
	pages_fetched: u32,
}
impl<'a, C, M> QueryPager<'a, C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn new(client: &'a ZuoraClient<C, M>, query: Query) -> Self {
		Self { client, state: PagerState::Start(query), pages_fetched: 0 }
	}

	/// Fetches the next page, or returns `None` once the terminal page has been yielded.
	pub async fn next_page(&mut self) -> Result<Option<QueryPage>> {
		let state = std::mem::replace(&mut self.state, PagerState::Done);

		if matches!(state, PagerState::Done) {
			return Ok(None);
		}
		if let Some(limit) = limit_reached(self.client.max_pages(), self.pages_fetched) {
			return Err(QueryError::PageLimitExceeded { limit }.into());
		}

		let (kind, page) = match state {
			PagerState::Start(query) => (OpKind::Query, self.client.fetch_page(&query).await?),
			PagerState::Next(locator) =>
				(OpKind::QueryMore, self.client.fetch_next_page(&locator).await?),
			PagerState::Done => return Ok(None),
		};

		self.pages_fetched = self.pages_fetched.saturating_add(1);

		obs::trace_page(kind, self.pages_fetched, page.records.len(), !page.is_terminal());

		if let Some(locator) = &page.query_locator {
			self.state = PagerState::Next(locator.clone());
		}

		Ok(Some(page))
	}

	/// Number of pages fetched so far.
	pub fn pages_fetched(&self) -> u32 {
		self.pages_fetched
	}

	/// Returns true once the terminal page has been yielded or an error ended the sequence.
	pub fn is_done(&self) -> bool {
		matches!(self.state, PagerState::Done)
	}
}
impl<C, M> Debug for QueryPager<'_, C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("QueryPager")
			.field("pages_fetched", &self.pages_fetched)
			.field("done", &self.is_done())
			.finish()
	}
}

fn limit_reached(max_pages: Option<NonZeroU32>, pages_fetched: u32) -> Option<u32> {
	max_pages.map(NonZeroU32::get).filter(|limit| pages_fetched >= *limit)
}
