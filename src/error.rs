//! Client-level error types shared across authentication, queries, and decryption.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Every failure propagates to the caller as soon as it happens; nothing is retried.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token acquisition failed; no client was constructed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Query or queryMore call failed.
	#[error(transparent)]
	Query(#[from] QueryError),
	/// Ciphertext could not be decoded or decrypted.
	#[error(transparent)]
	Decrypt(#[from] DecryptError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// JSON request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
	/// Endpoint URL cannot be parsed or joined.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint URL uses a scheme other than `http`/`https`.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Credential field was empty.
	#[error("The {field} credential must not be empty.")]
	EmptyCredential {
		/// Credential field label.
		field: &'static str,
	},
	/// Required environment variable is unset.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable is set but its value is not valid unicode.
	#[error("Environment variable `{name}` is not valid unicode.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token endpoint failures raised while constructing a client.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint rejected the credentials or answered with a non-success status.
	#[error("Token endpoint rejected the client credentials: {reason}.")]
	Rejected {
		/// Provider-supplied or status-derived reason string.
		reason: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint answered with a body that is not a token response.
	#[error("Token endpoint returned a malformed token response.")]
	MalformedResponse {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint answered in a way the exchange could not interpret.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Query and queryMore failures.
#[derive(Debug, ThisError)]
pub enum QueryError {
	/// Endpoint answered with a non-success HTTP status.
	#[error("The {endpoint} endpoint returned HTTP {status}: {message}.")]
	Status {
		/// Endpoint label (`query` or `queryMore`).
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
		/// Preview of the response body.
		message: String,
		/// Value of the `Zuora-Request-Id` response header, if any.
		request_id: Option<String>,
	},
	/// Endpoint answered with JSON that does not decode into a page.
	#[error("The {endpoint} endpoint returned malformed JSON.")]
	Parse {
		/// Endpoint label (`query` or `queryMore`).
		endpoint: &'static str,
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Endpoint answered with a Zuora fault payload.
	#[error("The {endpoint} endpoint returned fault {code}: {message}.")]
	Fault {
		/// Endpoint label (`query` or `queryMore`).
		endpoint: &'static str,
		/// Zuora `faultcode`.
		code: String,
		/// Zuora `faultstring`.
		message: String,
	},
	/// Server kept returning query locators past the configured page bound.
	#[error("Pagination exceeded the limit of {limit} pages.")]
	PageLimitExceeded {
		/// Configured page bound.
		limit: u32,
	},
}

/// Ciphertext decoding and key-management failures.
#[derive(Debug, ThisError)]
pub enum DecryptError {
	/// Input is not valid base64.
	#[error("Ciphertext is not valid base64.")]
	InvalidBase64(#[from] base64::DecodeError),
	/// Key-management service rejected the decrypt call.
	#[error("Key-management service rejected the decrypt request.")]
	Service {
		/// Service-specific failure.
		#[source]
		source: BoxError,
	},
	/// Key-management service answered without a plaintext.
	#[error("Key-management service returned no plaintext.")]
	MissingPlaintext,
	/// Plaintext is not valid UTF-8.
	#[error("Decrypted plaintext is not valid UTF-8.")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),
}
impl DecryptError {
	/// Wraps a key-management service failure.
	pub fn service(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Service { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Zuora API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Zuora API.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure it could not classify.
	#[error("HTTP client error occurred while calling the Zuora API: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
