//! Fetches every subscription's `AccountId` and prints how many records came back.
//!
//! Reads `client_id` and `client_secret` from the environment, plus the optional
//! `ZUORA_REST_URL` base-URL override. Log output is filtered through `RUST_LOG`.

// crates.io
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use zuora_query::{Credentials, Endpoints, ReqwestZuoraClient};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let client =
		ReqwestZuoraClient::connect_to(Endpoints::from_env()?, Credentials::from_env()?).await?;
	let subscriptions = client.list_subscriptions(["AccountId"]).await?;

	println!("{}", subscriptions.len());

	Ok(())
}
