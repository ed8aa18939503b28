//! `SELECT … FROM …` query strings for the `/v1/action/query` endpoint.
//!
//! # Trust boundary
//!
//! Table and column names are interpolated verbatim. Nothing is quoted, escaped, or checked
//! against an allow-list, so callers must never build a [`Query`] from untrusted input.

// self
use crate::_prelude::*;

/// Column selected when a query names no columns.
pub const DEFAULT_COLUMN: &str = "Id";
/// Table queried by [`crate::ZuoraClient::list_subscriptions`].
pub const SUBSCRIPTION_TABLE: &str = "Subscription";

/// A `SELECT <columns> FROM <table>` query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
	table: String,
	columns: Vec<String>,
}
impl Query {
	/// Creates a query against `table` selecting only `Id`.
	pub fn new(table: impl Into<String>) -> Self {
		Self { table: table.into(), columns: Vec::new() }
	}

	/// Replaces the selected columns; an empty list falls back to `Id`.
	pub fn select<I, S>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.columns = columns.into_iter().map(Into::into).collect();

		self
	}

	/// Queried table name.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Selected columns, with the `Id` default applied.
	pub fn columns(&self) -> Vec<&str> {
		if self.columns.is_empty() {
			vec![DEFAULT_COLUMN]
		} else {
			self.columns.iter().map(String::as_str).collect()
		}
	}

	/// Renders the query string sent as `queryString`.
	pub fn query_string(&self) -> String {
		self.to_string()
	}
}
impl Display for Query {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "SELECT {} FROM {}", self.columns().join(","), self.table)
	}
}
