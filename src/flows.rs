//! Client facade and the two provider flows it drives.

pub mod notification;
pub mod token_exchange;

pub use notification::*;

// self
use crate::{
	_prelude::*,
	config::KakaoConfig,
	http::KakaoHttpClient,
	lookup::OptionLookup,
	oauth::TransportErrorMapper,
	provider::{KakaoStrategy, ProviderStrategy},
	store::TokenStore,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestKakaoClient = KakaoClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Issues token exchanges and order notifications against one Kakao application.
///
/// The client owns the transport, the immutable configuration, and the collaborator
/// handles so each flow only builds its request and interprets the response. Calls never
/// share mutable state; clone the client freely across tasks.
#[derive(Clone)]
pub struct KakaoClient<C, M>
where
	C: ?Sized + KakaoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Application key and endpoint configuration.
	pub config: Arc<KakaoConfig>,
	/// Strategy that classifies non-2xx responses.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// Source of option display names.
	pub options: Arc<dyn OptionLookup>,
	/// Source of per-user access tokens.
	pub tokens: Arc<dyn TokenStore>,
}
impl<C, M> KakaoClient<C, M>
where
	C: ?Sized + KakaoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: KakaoConfig,
		options: Arc<dyn OptionLookup>,
		tokens: Arc<dyn TokenStore>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config: Arc::new(config),
			strategy: Arc::new(KakaoStrategy),
			options,
			tokens,
		}
	}

	/// Replaces the response classification strategy.
	pub fn with_strategy(mut self, strategy: Arc<dyn ProviderStrategy>) -> Self {
		self.strategy = strategy;

		self
	}
}
#[cfg(feature = "reqwest")]
impl KakaoClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new client for the provided configuration and collaborators.
	///
	/// The client provisions its own reqwest-backed transport, configured not to follow
	/// redirects.
	pub fn new(
		config: KakaoConfig,
		options: Arc<dyn OptionLookup>,
		tokens: Arc<dyn TokenStore>,
	) -> Result<Self> {
		Ok(Self::with_http_client(
			config,
			options,
			tokens,
			ReqwestHttpClient::without_redirects()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}
}
impl<C, M> Debug for KakaoClient<C, M>
where
	C: ?Sized + KakaoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("KakaoClient")
			.field("token_endpoint", &self.config.endpoints.token.as_str())
			.field("message_endpoint", &self.config.endpoints.message.as_str())
			.field("redirect_uri", &self.config.redirect_uri.as_str())
			.finish()
	}
}
