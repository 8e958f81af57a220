//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, UserId},
	store::{StoreError, StoreFuture, TokenStore},
};

type TokenMap = Arc<RwLock<HashMap<UserId, AccessToken>>>;

/// Storage backend that keeps tokens in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore(TokenMap);
impl MemoryTokenStore {
	/// Registers a token synchronously; handy for seeding fixtures.
	pub fn insert(&self, user: UserId, token: AccessToken) {
		self.0.write().insert(user, token);
	}

	/// Number of registered tokens.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Whether no tokens are registered.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn fetch_now(map: TokenMap, user: UserId) -> Result<Option<AccessToken>, StoreError> {
		Ok(map.read().get(&user).cloned())
	}

	fn remove_now(map: TokenMap, user: UserId) -> Result<Option<AccessToken>, StoreError> {
		Ok(map.write().remove(&user))
	}
}
impl TokenStore for MemoryTokenStore {
	fn fetch<'a>(&'a self, user: &'a UserId) -> StoreFuture<'a, Option<AccessToken>> {
		let map = self.0.clone();
		let user = user.to_owned();

		Box::pin(async move { Self::fetch_now(map, user) })
	}

	fn save(&self, user: UserId, token: AccessToken) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().insert(user, token);

			Ok(())
		})
	}

	fn remove<'a>(&'a self, user: &'a UserId) -> StoreFuture<'a, Option<AccessToken>> {
		let map = self.0.clone();
		let user = user.to_owned();

		Box::pin(async move { Self::remove_now(map, user) })
	}
}
