//! Zuora API client: one token per client, single-page queries, and full-table pagination.

pub mod pager;

mod query;

pub use pager::*;

// std
use std::num::NonZeroU32;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials},
	endpoint::Endpoints,
	http::HttpTransport,
	oauth::{TokenFacade, TransportErrorMapper},
	obs::{self, OpKind},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// Page bound applied by [`ZuoraClient::fetch_all`] unless overridden.
pub const DEFAULT_MAX_PAGES: NonZeroU32 = match NonZeroU32::new(10_000) {
	Some(limit) => limit,
	None => panic!("The default page bound must be non-zero."),
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestZuoraClient = ZuoraClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Authenticated Zuora REST client.
///
/// The access token is acquired while connecting and kept, unchanged, for the client's
/// lifetime. There is no refresh: once the token expires every call fails with the server's
/// authorization error and a new client must be connected.
pub struct ZuoraClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	endpoints: Endpoints,
	credentials: Credentials,
	token: AccessToken,
	max_pages: Option<NonZeroU32>,
}
impl<C, M> ZuoraClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges `credentials` for a token through the caller-provided transport + mapper pair.
	///
	/// Fails without building a client when the token endpoint is unreachable, rejects the
	/// credentials, or answers without an access token.
	pub async fn connect_with(
		endpoints: Endpoints,
		credentials: Credentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let http_client = http_client.into();
		let transport_mapper = mapper.into();
		let token = obs::observe(OpKind::Token, "connect", async {
			TokenFacade::new(
				&endpoints,
				&credentials,
				http_client.as_ref(),
				transport_mapper.as_ref(),
			)?
			.exchange_client_credentials()
			.await
		})
		.await?;

		Ok(Self {
			http_client,
			transport_mapper,
			endpoints,
			credentials,
			token,
			max_pages: Some(DEFAULT_MAX_PAGES),
		})
	}

	/// Overrides the page bound used by [`ZuoraClient::fetch_all`] and [`QueryPager`].
	///
	/// `None` removes the bound; a server that never stops returning query locators then
	/// keeps the loop running forever.
	pub fn with_max_pages(mut self, max_pages: Option<NonZeroU32>) -> Self {
		self.max_pages = max_pages;

		self
	}

	/// Token captured while connecting.
	pub fn access_token(&self) -> &AccessToken {
		&self.token
	}

	/// Endpoints this client talks to.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Current page bound.
	pub fn max_pages(&self) -> Option<NonZeroU32> {
		self.max_pages
	}
}
#[cfg(feature = "reqwest")]
impl ZuoraClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Connects to the production tenant with a default reqwest transport.
	pub async fn connect(credentials: Credentials) -> Result<Self> {
		Self::connect_to(Endpoints::production()?, credentials).await
	}

	/// Connects to `endpoints` with a default reqwest transport.
	pub async fn connect_to(endpoints: Endpoints, credentials: Credentials) -> Result<Self> {
		Self::connect_with(
			endpoints,
			credentials,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
		.await
	}
}
impl<C, M> Debug for ZuoraClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ZuoraClient")
			.field("endpoints", &self.endpoints)
			.field("client_id", &self.credentials.client_id())
			.field("token", &self.token)
			.field("max_pages", &self.max_pages)
			.finish()
	}
}
