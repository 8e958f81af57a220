//! Order notification memos.
//!
//! [`KakaoClient::send_order_notification`] resolves the user's access token, looks up the
//! ordered option's name, renders the fixed order-complete text, and posts it once to the
//! memo endpoint. Every outcome is surfaced: a missing token or option, a provider
//! rejection, and a transport failure each come back as a distinct [`Error`]. Sending the
//! same order twice posts two memos.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		HeaderValue, Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, UserId},
	error::ConfigError,
	flows::KakaoClient,
	http::KakaoHttpClient,
	lookup::OptionLookup,
	message::{MemoRequest, OrderNotification, TextTemplate},
	oauth::{self, JSON_CONTENT_TYPE, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::Endpoint,
	store::TokenStore,
};

/// Outcome of a delivered memo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageReceipt {
	/// HTTP status returned by the memo endpoint.
	pub status: u16,
	/// Provider `result_code`, when the body carried one.
	pub result_code: Option<i64>,
	/// Instant the response was read.
	pub sent_at: OffsetDateTime,
}
impl MessageReceipt {
	fn from_body(status: u16, body: &str) -> Self {
		#[derive(Deserialize)]
		struct ResultBody {
			result_code: Option<i64>,
		}

		let result_code =
			serde_json::from_str::<ResultBody>(body).ok().and_then(|parsed| parsed.result_code);

		Self { status, result_code, sent_at: OffsetDateTime::now_utc() }
	}
}

impl<C, M> KakaoClient<C, M>
where
	C: ?Sized + KakaoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends the order-complete memo on behalf of `user`.
	///
	/// The user's token comes from the configured [`TokenStore`]; an unknown user fails
	/// with [`Error::TokenNotFound`] before any request is made.
	pub async fn send_order_notification(
		&self,
		user: &UserId,
		order: &OrderNotification,
	) -> Result<MessageReceipt> {
		const KIND: FlowKind = FlowKind::MessageSend;

		let span = FlowSpan::new(KIND, "send_order_notification");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = <dyn TokenStore>::fetch(self.tokens.as_ref(), user)
					.await?
					.ok_or_else(|| Error::TokenNotFound { user: user.clone() })?;

				self.deliver(&token, order).await
			})
			.await;

		Self::observe(KIND, &result);

		result
	}

	/// Sends the order-complete memo with an explicit access token.
	pub async fn send_order_notification_with_token(
		&self,
		token: &AccessToken,
		order: &OrderNotification,
	) -> Result<MessageReceipt> {
		const KIND: FlowKind = FlowKind::MessageSend;

		let span = FlowSpan::new(KIND, "send_order_notification_with_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.deliver(token, order)).await;

		Self::observe(KIND, &result);

		result
	}

	/// Renders the memo text for `order` using the option lookup collaborator.
	pub async fn render_order_text(&self, order: &OrderNotification) -> Result<String> {
		let option = <dyn OptionLookup>::get_option(self.options.as_ref(), order.option_id)
			.await?
			.ok_or(Error::OptionNotFound { option_id: order.option_id })?;

		Ok(order.format_text(&option.name))
	}

	async fn deliver(
		&self,
		token: &AccessToken,
		order: &OrderNotification,
	) -> Result<MessageReceipt> {
		let text = self.render_order_text(order).await?;
		let memo =
			MemoRequest { template_object: TextTemplate::new(text, self.config.web_url.clone()) };
		let request = build_memo_request(&self.config.endpoints.message, token, &memo)?;
		let response = oauth::dispatch(
			self.http_client.as_ref(),
			self.transport_mapper.as_ref(),
			self.strategy.as_ref(),
			Endpoint::Message,
			request,
		)
		.await?;

		Ok(MessageReceipt::from_body(response.status, &response.body))
	}

	fn observe(kind: FlowKind, result: &Result<MessageReceipt>) {
		match result {
			Ok(receipt) => {
				obs::log_flow_success(kind, receipt.status);
				obs::record_flow_outcome(kind, FlowOutcome::Success);
			},
			Err(err) => {
				obs::log_flow_failure(kind, err);
				obs::record_flow_failure(kind, err.kind());
				obs::record_flow_outcome(kind, FlowOutcome::Failure);
			},
		}
	}
}

fn build_memo_request(
	endpoint: &Url,
	token: &AccessToken,
	memo: &MemoRequest,
) -> Result<HttpRequest> {
	let mut authorization = HeaderValue::from_str(&token.bearer())
		.map_err(|_| ConfigError::InvalidHeader { header: "authorization" })?;

	authorization.set_sensitive(true);

	let request = Request::builder()
		.method(Method::POST)
		.uri(endpoint.as_str())
		.header(AUTHORIZATION, authorization)
		.header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
		.header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE))
		.body(memo.to_json().map_err(ConfigError::from)?)
		.map_err(ConfigError::from)?;

	Ok(request)
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::HeaderName;
	// self
	use super::*;

	#[test]
	fn memo_request_carries_bearer_and_json_headers() {
		let endpoint = Url::parse("https://kapi.kakao.com/v2/api/talk/memo/default/send")
			.expect("Failed to parse memo endpoint.");
		let web_url = Url::parse("http://yourwebsite.com").expect("Failed to parse memo link.");
		let memo = MemoRequest { template_object: TextTemplate::new("hello", web_url) };
		let request = build_memo_request(&endpoint, &AccessToken::new("user-token"), &memo)
			.expect("Memo request should build.");
		let header =
			|name: HeaderName| request.headers().get(name).and_then(|value| value.to_str().ok());

		assert_eq!(request.method(), Method::POST);
		assert_eq!(header(AUTHORIZATION), Some("Bearer user-token"));
		assert_eq!(header(CONTENT_TYPE), Some(JSON_CONTENT_TYPE));
		assert!(
			request.headers().get(AUTHORIZATION).is_some_and(HeaderValue::is_sensitive),
			"Authorization header must be marked sensitive."
		);
	}

	#[test]
	fn tokens_with_control_characters_are_rejected() {
		let endpoint =
			Url::parse("https://kapi.kakao.com/memo").expect("Failed to parse memo endpoint.");
		let web_url = Url::parse("http://yourwebsite.com").expect("Failed to parse memo link.");
		let memo = MemoRequest { template_object: TextTemplate::new("hello", web_url) };
		let err = build_memo_request(&endpoint, &AccessToken::new("bad\ntoken"), &memo)
			.expect_err("Control characters must not reach the header.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::InvalidHeader { header: "authorization" })
		));
	}

	#[test]
	fn receipt_reads_result_code_leniently() {
		assert_eq!(MessageReceipt::from_body(200, "{\"result_code\":0}").result_code, Some(0));
		assert_eq!(MessageReceipt::from_body(200, "").result_code, None);
	}
}
