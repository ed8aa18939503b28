//! Minimal Zuora REST client: one client-credentials token per client, ZOQL queries against a
//! named table, and `queryLocator` pagination until the table is exhausted.
//!
//! A separate [`kms`] helper decrypts base64-encoded key-management ciphertexts.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod kms;
pub mod oauth;
pub mod obs;
pub mod query;

pub use auth::{AccessToken, Credentials};
pub use client::*;
pub use endpoint::Endpoints;
pub use error::{Error, Result};
pub use query::{Query, QueryLocator, QueryPage, Record};

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(feature = "cli")] use {color_eyre as _, tokio as _, tracing_subscriber as _};
#[cfg(test)] use {aws_smithy_mocks as _, httpmock as _, rustls as _};
#[cfg(all(test, not(feature = "kms")))] use aws_sdk_kms as _;
