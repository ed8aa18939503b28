//! OAuth client credentials issued by Zuora for an API user.

// std
use std::env::VarError;
// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Environment variable holding the OAuth client identifier.
pub const CLIENT_ID_ENV: &str = "client_id";
/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_ENV: &str = "client_secret";

/// Immutable `(client_id, client_secret)` pair used for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: Secret,
}
impl Credentials {
	/// Creates a credential pair, rejecting empty fields.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let client_id = client_id.into();
		let client_secret = Secret::new(client_secret);

		if client_id.trim().is_empty() {
			return Err(ConfigError::EmptyCredential { field: "client_id" });
		}
		if client_secret.is_empty() {
			return Err(ConfigError::EmptyCredential { field: "client_secret" });
		}

		Ok(Self { client_id, client_secret })
	}

	/// Reads the pair from the `client_id` and `client_secret` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::new(read_env(CLIENT_ID_ENV)?, read_env(CLIENT_SECRET_ENV)?)
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret.
	pub fn client_secret(&self) -> &Secret {
		&self.client_secret
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

pub(crate) fn read_env(name: &'static str) -> Result<String, ConfigError> {
	env_value(name, std::env::var(name))
}

fn env_value(name: &'static str, value: Result<String, VarError>) -> Result<String, ConfigError> {
	value.map_err(|err| match err {
		VarError::NotPresent => ConfigError::MissingEnv { name },
		VarError::NotUnicode(_) => ConfigError::InvalidEnv { name },
	})
}
