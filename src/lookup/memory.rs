//! In-memory [`OptionLookup`] used by tests and demos.

// self
use crate::{
	_prelude::*,
	auth::OptionId,
	lookup::{LookupFuture, OptionLookup, ProductOption},
};

/// Thread-safe option catalog kept in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryOptionLookup(Arc<RwLock<HashMap<OptionId, ProductOption>>>);
impl MemoryOptionLookup {
	/// Adds or replaces an option.
	pub fn insert(&self, option: ProductOption) {
		self.0.write().insert(option.id, option);
	}
}
impl FromIterator<ProductOption> for MemoryOptionLookup {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = ProductOption>,
	{
		let map = iter.into_iter().map(|option| (option.id, option)).collect();

		Self(Arc::new(RwLock::new(map)))
	}
}
impl OptionLookup for MemoryOptionLookup {
	fn get_option(&self, id: OptionId) -> LookupFuture<'_, Option<ProductOption>> {
		let found = self.0.read().get(&id).cloned();

		Box::pin(async move { Ok(found) })
	}
}
