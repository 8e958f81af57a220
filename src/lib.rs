//! Kakao OAuth code exchange and "send to me" order notifications over a pluggable async
//! transport, with typed failures and transport-aware observability.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod lookup;
pub mod message;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::KakaoConfig,
		flows::KakaoClient,
		http::ReqwestHttpClient,
		lookup::{MemoryOptionLookup, OptionLookup},
		oauth::ReqwestTransportErrorMapper,
		provider::{KakaoStrategy, ProviderStrategy},
		store::{MemoryTokenStore, TokenStore},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = KakaoClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`KakaoClient`] backed by in-memory collaborators, the default provider
	/// strategy, and the reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		config: KakaoConfig,
	) -> (ReqwestTestClient, Arc<MemoryOptionLookup>, Arc<MemoryTokenStore>) {
		let options_backend = Arc::new(MemoryOptionLookup::default());
		let tokens_backend = Arc::new(MemoryTokenStore::default());
		let options: Arc<dyn OptionLookup> = options_backend.clone();
		let tokens: Arc<dyn TokenStore> = tokens_backend.clone();
		let strategy: Arc<dyn ProviderStrategy> = Arc::new(KakaoStrategy);
		let http_client = test_reqwest_http_client();
		let mapper = Arc::new(ReqwestTransportErrorMapper);
		let client = KakaoClient::with_http_client(config, options, tokens, http_client, mapper)
			.with_strategy(strategy);

		(client, options_backend, tokens_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))]
use {color_eyre as _, httpmock as _, tokio as _, tracing_subscriber as _};
