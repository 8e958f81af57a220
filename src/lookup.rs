//! Option lookup contract consumed by the notification flow.
//!
//! Options are owned by the surrounding application; the crate only reads their display
//! name. Lookups return an explicit `Option` so a missing entry becomes
//! [`Error::OptionNotFound`](crate::error::Error::OptionNotFound) instead of a panic.

pub mod memory;

pub use memory::MemoryOptionLookup;

// self
use crate::{_prelude::*, auth::OptionId};

/// Future returned by [`OptionLookup`] methods.
pub type LookupFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LookupError>> + 'a + Send>>;

/// Read-only access to product options.
pub trait OptionLookup
where
	Self: Send + Sync,
{
	/// Fetches the option with `id`, or `None` when it does not exist.
	fn get_option(&self, id: OptionId) -> LookupFuture<'_, Option<ProductOption>>;
}

/// Product option as seen by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
	/// Option identifier.
	pub id: OptionId,
	/// Display name substituted into notifications.
	pub name: String,
}
impl ProductOption {
	/// Creates a new option.
	pub fn new(id: u64, name: impl Into<String>) -> Self {
		Self { id: OptionId::new(id), name: name.into() }
	}
}

/// Error type produced by [`OptionLookup`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum LookupError {
	/// Backend-level failure for the lookup service.
	#[error("Option lookup failed: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
