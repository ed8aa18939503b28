//! Access token captured once when a client connects.

// self
use crate::{_prelude::*, auth::Secret};

/// Bearer token returned by the client-credentials exchange.
///
/// The token is never refreshed; a client keeps using it for its whole lifetime and calls
/// made after expiry fail with the server's authorization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Bearer secret attached to every query request.
	pub secret: Secret,
	/// Token type reported by the token endpoint (Zuora answers `bearer`).
	pub token_type: String,
	/// Instant the token was received.
	pub issued_at: OffsetDateTime,
	/// Expiry computed from `expires_in`, when the endpoint reported one.
	pub expires_at: Option<OffsetDateTime>,
	/// Space-delimited scope string granted by the endpoint, if any.
	pub scope: Option<String>,
}
impl AccessToken {
	/// Creates a token issued at `issued_at` with no expiry or scope information.
	pub fn new(secret: impl Into<String>, issued_at: OffsetDateTime) -> Self {
		Self {
			secret: Secret::new(secret),
			token_type: "bearer".into(),
			issued_at,
			expires_at: None,
			scope: None,
		}
	}

	/// Sets the expiry relative to [`AccessToken::issued_at`]; out-of-range values leave the
	/// token without an expiry.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_at = self.issued_at.checked_add(expires_in);

		self
	}

	/// Returns true once `now` reaches the reported expiry; tokens without one never expire.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| now >= expires_at)
	}

	/// Value of the `Authorization` header for this token.
	pub(crate) fn authorization_header(&self) -> String {
		format!("Bearer {}", self.secret.expose())
	}
}
