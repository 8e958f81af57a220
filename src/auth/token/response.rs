//! Verbatim token endpoint responses.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Body returned by the token endpoint, kept exactly as the provider sent it.
///
/// The exchange never inspects the body. Callers that only need the access token can use
/// [`RawTokenResponse::access_token`]; everything else is available through
/// [`RawTokenResponse::as_str`].
#[derive(Clone, PartialEq, Eq)]
pub struct RawTokenResponse {
	body: String,
	/// HTTP status that accompanied the body.
	pub status: u16,
	/// Instant the response was read.
	pub received_at: OffsetDateTime,
}
impl RawTokenResponse {
	/// Wraps a response body received with `status`.
	pub fn new(body: impl Into<String>, status: u16) -> Self {
		Self { body: body.into(), status, received_at: OffsetDateTime::now_utc() }
	}

	/// Returns the body without modification.
	pub fn as_str(&self) -> &str {
		&self.body
	}

	/// Consumes the response and returns the body.
	pub fn into_body(self) -> String {
		self.body
	}

	/// Parses the `access_token` field out of the JSON body.
	pub fn access_token(&self) -> Result<AccessToken, TokenFieldError> {
		let de = &mut serde_json::Deserializer::from_str(&self.body);
		let fields: TokenFields = serde_path_to_error::deserialize(de)?;

		Ok(AccessToken::new(fields.access_token))
	}
}
impl AsRef<str> for RawTokenResponse {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Debug for RawTokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RawTokenResponse")
			.field("status", &self.status)
			.field("received_at", &self.received_at)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Failure raised when the token body lacks a usable `access_token`.
#[derive(Debug, ThisError)]
#[error("Token response does not contain a usable access_token.")]
pub struct TokenFieldError(#[from] serde_path_to_error::Error<serde_json::Error>);

#[derive(Deserialize)]
struct TokenFields {
	access_token: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn body_is_kept_verbatim() {
		let body = "{\"access_token\":\"abc\",  \"token_type\":\"bearer\"}";
		let response = RawTokenResponse::new(body, 200);

		assert_eq!(response.as_str(), body);
		assert_eq!(response.clone().into_body(), body);
		assert!(!format!("{response:?}").contains("abc"), "Debug output must not leak the body.");
	}

	#[test]
	fn access_token_is_extracted_on_demand() {
		let response = RawTokenResponse::new(
			"{\"token_type\":\"bearer\",\"access_token\":\"kakao-token\",\"expires_in\":21599}",
			200,
		);

		assert_eq!(
			response.access_token().expect("Token field should parse.").expose(),
			"kakao-token"
		);
		assert!(RawTokenResponse::new("{\"access_token\":7}", 200).access_token().is_err());
		assert!(RawTokenResponse::new("not json", 200).access_token().is_err());
	}
}
