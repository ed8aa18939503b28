//! Zuora REST endpoint set derived from a tenant's base URL.

// self
use crate::{_prelude::*, auth::credentials, error::ConfigError};

/// Production REST base URL.
pub const PRODUCTION_BASE_URL: &str = "https://rest.zuora.com";
/// Environment variable overriding the REST base URL.
pub const BASE_URL_ENV: &str = "ZUORA_REST_URL";

const TOKEN_PATH: &str = "oauth/token";
const QUERY_PATH: &str = "v1/action/query";
const QUERY_MORE_PATH: &str = "v1/action/queryMore";

/// Token, query, and queryMore endpoints used by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// OAuth token endpoint (`/oauth/token`).
	pub token: Url,
	/// First-page query endpoint (`/v1/action/query`).
	pub query: Url,
	/// Continuation endpoint (`/v1/action/queryMore`).
	pub query_more: Url,
}
impl Endpoints {
	/// Endpoints of the production tenant at `https://rest.zuora.com`.
	pub fn production() -> Result<Self, ConfigError> {
		Self::from_base_str(PRODUCTION_BASE_URL)
	}

	/// Derives the endpoint set from a base URL such as `https://rest.apisandbox.zuora.com`.
	pub fn from_base_url(base: &Url) -> Result<Self, ConfigError> {
		let mut base = base.clone();

		// `Url::join` replaces the last segment unless the path ends with a slash.
		if !base.path().ends_with('/') {
			base.set_path(&format!("{}/", base.path()));
		}

		let join =
			|path: &str| base.join(path).map_err(|source| ConfigError::InvalidEndpoint { source });
		let endpoints = Self {
			token: join(TOKEN_PATH)?,
			query: join(QUERY_PATH)?,
			query_more: join(QUERY_MORE_PATH)?,
		};

		endpoints.validate()?;

		Ok(endpoints)
	}

	/// Parses `base` and derives the endpoint set from it.
	pub fn from_base_str(base: &str) -> Result<Self, ConfigError> {
		let base = Url::parse(base).map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Self::from_base_url(&base)
	}

	/// Uses `ZUORA_REST_URL` when set, production otherwise.
	///
	/// A value that is set but not valid unicode is an error rather than a fallback.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_env_value(credentials::read_env(BASE_URL_ENV))
	}

	fn from_env_value(value: Result<String, ConfigError>) -> Result<Self, ConfigError> {
		match value {
			Ok(base) => Self::from_base_str(&base),
			Err(ConfigError::MissingEnv { .. }) => Self::production(),
			Err(err) => Err(err),
		}
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_endpoint("token", &self.token)?;
		validate_endpoint("query", &self.query)?;
		validate_endpoint("queryMore", &self.query_more)
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn production_endpoints_match_zuora_paths() {
		let endpoints = Endpoints::production().expect("Production endpoints should build.");

		assert_eq!(endpoints.token.as_str(), "https://rest.zuora.com/oauth/token");
		assert_eq!(endpoints.query.as_str(), "https://rest.zuora.com/v1/action/query");
		assert_eq!(endpoints.query_more.as_str(), "https://rest.zuora.com/v1/action/queryMore");
	}

	#[test]
	fn base_url_with_path_prefix_is_preserved() {
		let endpoints = Endpoints::from_base_str("http://127.0.0.1:8080/zuora")
			.expect("Prefixed base URL should build.");

		assert_eq!(endpoints.query.as_str(), "http://127.0.0.1:8080/zuora/v1/action/query");
	}

	#[test]
	fn only_an_unset_override_falls_back_to_production() {
		let fallback = Endpoints::from_env_value(Err(ConfigError::MissingEnv { name: BASE_URL_ENV }))
			.expect("An unset override should select production.");

		assert_eq!(fallback, Endpoints::production().expect("Production endpoints should build."));
		assert!(matches!(
			Endpoints::from_env_value(Err(ConfigError::InvalidEnv { name: BASE_URL_ENV })),
			Err(ConfigError::InvalidEnv { name: BASE_URL_ENV })
		));
		assert_eq!(
			Endpoints::from_env_value(Ok("http://127.0.0.1:9".into()))
				.expect("A set override should be used.")
				.token
				.as_str(),
			"http://127.0.0.1:9/oauth/token"
		);
	}

	#[test]
	fn rejects_non_http_schemes() {
		let err = Endpoints::from_base_str("ftp://rest.zuora.com")
			.expect_err("Non-HTTP schemes should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { endpoint: "token", .. }));
		assert!(matches!(
			Endpoints::from_base_str("not a url"),
			Err(ConfigError::InvalidEndpoint { .. })
		));
	}
}
