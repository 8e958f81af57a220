//! Token lookup contract used by the notification flow.
//!
//! The crate never persists or refreshes tokens. Whatever issues tokens (typically the
//! caller's OAuth callback handler, using [`RawTokenResponse::access_token`]) registers
//! them here, and the notification flow resolves them by user. [`MemoryTokenStore`] is
//! provided for tests and demos; production callers plug in their own backend.
//!
//! [`RawTokenResponse::access_token`]: crate::auth::RawTokenResponse::access_token

pub mod memory;

pub use memory::MemoryTokenStore;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, UserId},
};

/// Future returned by [`TokenStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for per-user access tokens.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Fetches the token registered for `user`, if any.
	fn fetch<'a>(&'a self, user: &'a UserId) -> StoreFuture<'a, Option<AccessToken>>;

	/// Registers or replaces the token for `user`.
	fn save(&self, user: UserId, token: AccessToken) -> StoreFuture<'_, ()>;

	/// Removes the token for `user`, returning the previous value.
	fn remove<'a>(&'a self, user: &'a UserId) -> StoreFuture<'a, Option<AccessToken>>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Token store backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
