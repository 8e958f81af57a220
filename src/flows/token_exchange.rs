//! Authorization code exchange.
//!
//! [`KakaoClient::exchange_code`] posts the four-field form to the token endpoint once and
//! hands back the body untouched. Failures never reach the caller as errors: each one is
//! logged with its [`FailureKind`](crate::error::FailureKind) label (`access_denied`,
//! `client_error`, or `transport`) and collapsed into `None`. Callers that want the error
//! itself use [`KakaoClient::try_exchange_code`].

// self
use crate::{
	_prelude::*,
	auth::RawTokenResponse,
	flows::KakaoClient,
	http::KakaoHttpClient,
	oauth::{self, TokenRequest, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::Endpoint,
};

impl<C, M> KakaoClient<C, M>
where
	C: ?Sized + KakaoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges `code` for a token, returning `None` when no token was obtained.
	pub async fn exchange_code(&self, code: &str) -> Option<RawTokenResponse> {
		self.try_exchange_code(code).await.ok()
	}

	/// Exchanges `code` for a token and returns the classified failure on error.
	///
	/// The failure is logged and counted before it is returned.
	pub async fn try_exchange_code(&self, code: &str) -> Result<RawTokenResponse> {
		const KIND: FlowKind = FlowKind::TokenExchange;

		let span = FlowSpan::new(KIND, "exchange_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = TokenRequest::new(&self.config, code)
					.to_http_request(&self.config.endpoints.token)?;
				let response = oauth::dispatch(
					self.http_client.as_ref(),
					self.transport_mapper.as_ref(),
					self.strategy.as_ref(),
					Endpoint::Token,
					request,
				)
				.await?;

				Ok(RawTokenResponse::new(response.body, response.status))
			})
			.await;

		match &result {
			Ok(response) => {
				obs::log_flow_success(KIND, response.status);
				obs::record_flow_outcome(KIND, FlowOutcome::Success);
			},
			Err(err) => {
				obs::log_flow_failure(KIND, err);
				obs::record_flow_failure(KIND, err.kind());
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);
			},
		}

		result
	}
}
