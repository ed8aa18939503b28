//! Client-credentials exchange on top of the `oauth2` crate, plus transport error mapping.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials},
	endpoint::Endpoints,
	error::{AuthError, ConfigError, TransportError},
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
	obs::OpKind,
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(
		&self,
		op: OpKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		_op: OpKind,
		_meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) if inner.is_builder() =>
				ConfigError::from(*inner).into(),
			HttpClientError::Reqwest(inner) => TransportError::from(*inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { message }.into(),
			_ => TransportError::Other { message: "unclassified transport failure".into() }.into(),
		}
	}
}

/// Performs the client-credentials grant against the Zuora token endpoint.
///
/// Zuora expects `client_id` and `client_secret` in the form body, so the facade always uses
/// [`AuthType::RequestBody`].
pub(crate) struct TokenFacade<'a, C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	http_client: &'a C,
	error_mapper: &'a M,
}
impl<'a, C, M> TokenFacade<'a, C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn new(
		endpoints: &Endpoints,
		credentials: &Credentials,
		http_client: &'a C,
		error_mapper: &'a M,
	) -> Result<Self> {
		let token_url = TokenUrl::new(endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(credentials.client_secret().expose().to_owned()))
			.set_auth_type(AuthType::RequestBody)
			.set_token_uri(token_url);

		Ok(Self { oauth_client, http_client, error_mapper })
	}

	pub(crate) async fn exchange_client_credentials(&self) -> Result<AccessToken> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let err = match self
			.oauth_client
			.exchange_client_credentials()
			.request_async(&instrumented)
			.await
		{
			Ok(response) => return Ok(map_token_response(response)),
			Err(err) => err,
		};
		let meta = meta.take();
		let succeeded = meta.as_ref().and_then(|value| value.status).is_some_and(is_success);
		let recovered = match &err {
			RequestTokenError::Parse(_, body) if succeeded => decode_untyped_token(body),
			_ => None,
		};

		if let Some(token) = recovered {
			return Ok(token);
		}

		Err(map_request_error(meta, err, self.error_mapper))
	}
}

/// Token body lacking the `token_type` member, accepted on a 2xx status as a bearer token.
#[derive(Deserialize)]
struct UntypedTokenResponse {
	access_token: String,
	#[serde(default)]
	expires_in: Option<u64>,
	#[serde(default)]
	scope: Option<String>,
}

fn decode_untyped_token(body: &[u8]) -> Option<AccessToken> {
	let response = serde_json::from_slice::<UntypedTokenResponse>(body).ok()?;

	Some(build_token(response.access_token, None, response.expires_in, response.scope))
}

fn map_token_response(response: BasicTokenResponse) -> AccessToken {
	let scope = response
		.scopes()
		.map(|scopes| scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" "));

	build_token(
		response.access_token().secret().to_owned(),
		Some(response.token_type().as_ref().to_owned()),
		response.expires_in().map(|expires_in| expires_in.as_secs()),
		scope,
	)
}

fn build_token(
	secret: String,
	token_type: Option<String>,
	expires_in_secs: Option<u64>,
	scope: Option<String>,
) -> AccessToken {
	let mut token = AccessToken::new(secret, OffsetDateTime::now_utc());

	if let Some(token_type) = token_type {
		token.token_type = token_type;
	}
	if let Some(secs) = expires_in_secs {
		token = token.with_expires_in(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}

	token.scope = scope;

	token
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let status = meta.as_ref().and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response, status),
		RequestTokenError::Request(error) =>
			mapper.map_transport_error(OpKind::Token, meta.as_ref(), error),
		RequestTokenError::Parse(_, _) if status.is_some_and(|code| !is_success(code)) =>
			AuthError::Rejected {
				reason: format!("token endpoint answered with HTTP {}", status.unwrap_or_default()),
				status,
			}
			.into(),
		RequestTokenError::Parse(source, _body) =>
			AuthError::MalformedResponse { source, status }.into(),
		RequestTokenError::Other(message) =>
			AuthError::UnexpectedResponse { message, status }.into(),
	}
}

fn map_server_response_error(response: BasicErrorResponse, status: Option<u16>) -> Error {
	let reason = match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_owned(),
	};

	AuthError::Rejected { reason, status }.into()
}

fn is_success(status: u16) -> bool {
	(200..300).contains(&status)
}
