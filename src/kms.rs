//! Base64 ciphertext decryption through a key-management service.
//!
//! [`decrypt_base64`] works with any [`Decryptor`]; with the `kms` feature, [`KmsDecryptor`]
//! and [`kms_decrypt`] submit the ciphertext blob to AWS KMS using the ambient AWS
//! configuration (environment, profile, or instance role). Nothing is cached or retried.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	error::DecryptError,
	obs::{self, OpKind},
};

/// Boxed future returned by [`Decryptor::decrypt`].
pub type DecryptFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Vec<u8>, DecryptError>> + 'a + Send>>;

/// Key-management backend able to turn a ciphertext blob back into plaintext bytes.
pub trait Decryptor
where
	Self: Send + Sync,
{
	/// Submits `ciphertext` to the service and returns the recovered plaintext.
	fn decrypt(&self, ciphertext: Vec<u8>) -> DecryptFuture<'_>;
}

/// Decodes `encoded` as standard base64, decrypts it with `decryptor`, and returns UTF-8 text.
pub async fn decrypt_base64<D>(decryptor: &D, encoded: &str) -> Result<String>
where
	D: ?Sized + Decryptor,
{
	obs::observe(OpKind::Decrypt, "decrypt_base64", async {
		let ciphertext = STANDARD.decode(encoded.trim()).map_err(DecryptError::from)?;
		let plaintext = decryptor.decrypt(ciphertext).await?;

		String::from_utf8(plaintext).map_err(|err| Error::from(DecryptError::from(err)))
	})
	.await
}

/// AWS KMS backed [`Decryptor`].
#[cfg(feature = "kms")]
#[derive(Clone, Debug)]
pub struct KmsDecryptor {
	client: aws_sdk_kms::Client,
}
#[cfg(feature = "kms")]
impl KmsDecryptor {
	/// Builds a decryptor from the ambient AWS configuration.
	pub async fn from_env() -> Self {
		let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

		Self::with_client(aws_sdk_kms::Client::new(&config))
	}

	/// Wraps an existing KMS client.
	pub fn with_client(client: aws_sdk_kms::Client) -> Self {
		Self { client }
	}
}
#[cfg(feature = "kms")]
impl Decryptor for KmsDecryptor {
	fn decrypt(&self, ciphertext: Vec<u8>) -> DecryptFuture<'_> {
		Box::pin(async move {
			let output = self
				.client
				.decrypt()
				.ciphertext_blob(aws_sdk_kms::primitives::Blob::new(ciphertext))
				.send()
				.await
				.map_err(|err| DecryptError::service(aws_sdk_kms::Error::from(err)))?;

			output
				.plaintext
				.map(aws_sdk_kms::primitives::Blob::into_inner)
				.ok_or(DecryptError::MissingPlaintext)
		})
	}
}

/// Decrypts a base64-encoded AWS KMS ciphertext blob into UTF-8 text.
#[cfg(feature = "kms")]
pub async fn kms_decrypt(encoded: &str) -> Result<String> {
	decrypt_base64(&KmsDecryptor::from_env().await, encoded).await
}
