//! Query result pages, records, and continuation cursors.

// self
use crate::{_prelude::*, error::QueryError};

/// One record: field name to value, shaped entirely by the server and the selected columns.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Opaque continuation cursor returned while more results exist.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryLocator(String);
impl QueryLocator {
	/// Wraps a cursor value received from the server.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw cursor value.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for QueryLocator {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for QueryLocator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "QueryLocator({})", self.0)
	}
}
impl Display for QueryLocator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// One page returned by `query` or `queryMore`.
///
/// A page without a [`QueryLocator`] is the terminal page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
	/// Records in server order. Zuora omits the field for empty results.
	#[serde(default)]
	pub records: Vec<Record>,
	/// Cursor for the next page, absent on the terminal page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query_locator: Option<QueryLocator>,
	/// Server-reported record count of this page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<u64>,
	/// Server-reported completion flag.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub done: Option<bool>,
}
impl QueryPage {
	/// Returns true when no continuation cursor is present.
	pub fn is_terminal(&self) -> bool {
		self.query_locator.is_none()
	}
}

/// Body sent to `/v1/action/query`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest<'a> {
	pub(crate) query_string: &'a str,
}

/// Body sent to `/v1/action/queryMore`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryMoreRequest<'a> {
	pub(crate) query_locator: &'a QueryLocator,
}

/// Raw response shape, covering both pages and fault payloads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQueryResponse {
	#[serde(default)]
	records: Vec<Record>,
	#[serde(default)]
	query_locator: Option<String>,
	#[serde(default)]
	size: Option<u64>,
	#[serde(default)]
	done: Option<bool>,
	#[serde(default, rename = "faultcode")]
	fault_code: Option<String>,
	#[serde(default, rename = "faultstring")]
	fault_string: Option<String>,
}

/// Decodes a successful response body into a page.
///
/// An empty cursor string counts as no cursor. Fault payloads become [`QueryError::Fault`].
pub(crate) fn decode_page(endpoint: &'static str, body: &[u8]) -> Result<QueryPage, QueryError> {
	let raw: RawQueryResponse =
		serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(body))
			.map_err(|source| QueryError::Parse { endpoint, source })?;

	if raw.fault_code.is_some() || raw.fault_string.is_some() {
		return Err(QueryError::Fault {
			endpoint,
			code: raw.fault_code.unwrap_or_default(),
			message: raw.fault_string.unwrap_or_default(),
		});
	}

	Ok(QueryPage {
		records: raw.records,
		query_locator: raw.query_locator.filter(|value| !value.is_empty()).map(QueryLocator),
		size: raw.size,
		done: raw.done,
	})
}
