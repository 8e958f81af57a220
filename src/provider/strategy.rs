//! Provider strategy hooks that classify failed calls.
//!
//! Implementations turn a non-2xx response into a [`ProviderErrorKind`] without tying the
//! flows to any particular HTTP client.

// self
use crate::_prelude::*;

/// Provider endpoint a call was made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// OAuth token endpoint.
	Token,
	/// Memo messaging endpoint.
	Message,
}
impl Endpoint {
	/// Returns a stable label suitable for error messages and log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Token => "token",
			Endpoint::Message => "message",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Strategy hook that classifies failed provider responses.
///
/// Implementors are required to be `Send + Sync`, and the hook uses crate-owned data
/// types so downstream crates never depend on reqwest-specific structures.
pub trait ProviderStrategy: Send + Sync {
	/// Maps a non-2xx response into the crate taxonomy.
	fn classify_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind;
}

/// Canonical provider error categories used by strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderErrorKind {
	/// Provider refused the call on authorization-policy grounds.
	AccessDenied,
	/// Any other client-side (4xx) failure.
	Client,
	/// Status the client cannot act on (5xx, 3xx, 1xx).
	Unexpected,
}

/// Context passed to provider strategies when classifying failures.
///
/// Only primitive data is kept (status code, provider error fields, body preview) so
/// strategies stay decoupled from any HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderErrorContext {
	/// Endpoint that produced the failure.
	pub endpoint: Endpoint,
	/// HTTP status code returned by the provider.
	pub http_status: u16,
	/// OAuth `error` field (token endpoint).
	pub oauth_error: Option<String>,
	/// OAuth `error_description` field (token endpoint).
	pub error_description: Option<String>,
	/// Kakao `error_code` field such as `KOE320` (token endpoint).
	pub error_code: Option<String>,
	/// Kakao API `code` field such as `-401` (message endpoint).
	pub api_code: Option<i64>,
	/// Kakao API `msg` field (message endpoint).
	pub api_message: Option<String>,
	/// Preview of the response body.
	pub body_preview: String,
}
impl ProviderErrorContext {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Creates a context for a bare status with no body.
	pub fn new(endpoint: Endpoint, http_status: u16) -> Self {
		Self {
			endpoint,
			http_status,
			oauth_error: None,
			error_description: None,
			error_code: None,
			api_code: None,
			api_message: None,
			body_preview: String::new(),
		}
	}

	/// Builds a context from a response body, reading provider error fields when the body is
	/// JSON.
	pub fn from_response(endpoint: Endpoint, http_status: u16, body: &str) -> Self {
		let mut ctx = Self::new(endpoint, http_status).with_body_preview(body);

		if let Ok(fields) = serde_json::from_str::<ErrorFields>(body) {
			ctx.oauth_error = fields.error;
			ctx.error_description = fields.error_description;
			ctx.error_code = fields.error_code;
			ctx.api_code = fields.code;
			ctx.api_message = fields.msg;
		}

		ctx
	}

	/// Adds the OAuth error code string returned by the provider.
	pub fn with_oauth_error(mut self, error: impl Into<String>) -> Self {
		self.oauth_error = Some(error.into());

		self
	}

	/// Adds a body preview, truncated to a bounded length.
	pub fn with_body_preview(mut self, body: impl Into<String>) -> Self {
		self.body_preview = truncate_preview(body.into());

		self
	}

	/// Best human-readable reason available for the failure.
	pub fn reason(&self) -> String {
		self.error_description
			.as_deref()
			.or(self.api_message.as_deref())
			.or(self.oauth_error.as_deref())
			.filter(|value| !value.is_empty())
			.map(str::to_owned)
			.unwrap_or_else(|| {
				if self.body_preview.is_empty() {
					format!("HTTP {}", self.http_status)
				} else {
					self.body_preview.clone()
				}
			})
	}
}

#[derive(Deserialize)]
struct ErrorFields {
	error: Option<String>,
	error_description: Option<String>,
	error_code: Option<String>,
	code: Option<i64>,
	msg: Option<String>,
}

/// Default strategy for Kakao endpoints.
///
/// An OAuth `access_denied` error or HTTP 403 is an access denial; every other 4xx is a
/// client error; anything else is unexpected.
#[derive(Debug, Default)]
pub struct KakaoStrategy;
impl Display for KakaoStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("kakao-strategy")
	}
}
impl ProviderStrategy for KakaoStrategy {
	fn classify_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind {
		if ctx.oauth_error.as_deref().is_some_and(|err| err.eq_ignore_ascii_case("access_denied")) {
			return ProviderErrorKind::AccessDenied;
		}

		match ctx.http_status {
			403 => ProviderErrorKind::AccessDenied,
			400..=499 => ProviderErrorKind::Client,
			_ => ProviderErrorKind::Unexpected,
		}
	}
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= ProviderErrorContext::BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= ProviderErrorContext::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn forbidden_and_access_denied_errors_are_access_denials() {
		let strategy = KakaoStrategy;
		let forbidden = ProviderErrorContext::new(Endpoint::Token, 403);
		let denied =
			ProviderErrorContext::new(Endpoint::Token, 400).with_oauth_error("access_denied");

		assert_eq!(strategy.classify_error(&forbidden), ProviderErrorKind::AccessDenied);
		assert_eq!(strategy.classify_error(&denied), ProviderErrorKind::AccessDenied);
	}

	#[test]
	fn other_statuses_split_into_client_and_unexpected() {
		let strategy = KakaoStrategy;

		for status in [400, 401, 404, 429] {
			let ctx = ProviderErrorContext::new(Endpoint::Message, status);

			assert_eq!(strategy.classify_error(&ctx), ProviderErrorKind::Client);
		}
		for status in [302, 500, 503] {
			let ctx = ProviderErrorContext::new(Endpoint::Message, status);

			assert_eq!(strategy.classify_error(&ctx), ProviderErrorKind::Unexpected);
		}
	}

	#[test]
	fn response_fields_feed_the_reason() {
		let token = ProviderErrorContext::from_response(
			Endpoint::Token,
			400,
			r#"{"error":"invalid_grant","error_description":"authorization code not found","error_code":"KOE320"}"#,
		);

		assert_eq!(token.oauth_error.as_deref(), Some("invalid_grant"));
		assert_eq!(token.error_code.as_deref(), Some("KOE320"));
		assert_eq!(token.reason(), "authorization code not found");

		let message = ProviderErrorContext::from_response(
			Endpoint::Message,
			401,
			r#"{"msg":"this access token does not exist","code":-401}"#,
		);

		assert_eq!(message.api_code, Some(-401));
		assert_eq!(message.reason(), "this access token does not exist");

		let plain = ProviderErrorContext::from_response(Endpoint::Message, 502, "Bad Gateway");

		assert_eq!(plain.reason(), "Bad Gateway");
		assert_eq!(ProviderErrorContext::new(Endpoint::Token, 500).reason(), "HTTP 500");
	}

	#[test]
	fn body_preview_is_truncated() {
		let long = "x".repeat(1_000);
		let ctx = ProviderErrorContext::from_response(Endpoint::Token, 500, &long);

		assert_eq!(ctx.body_preview.chars().count(), ProviderErrorContext::BODY_PREVIEW_LIMIT + 1);
		assert!(ctx.body_preview.ends_with('…'));
	}
}
