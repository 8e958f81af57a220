//! Immutable Kakao client configuration and its validating builder.
//!
//! [`KakaoConfig`] carries the application key and every URL the client talks to. It is
//! `Serialize + Deserialize` so the surrounding application can load it from whichever
//! format it prefers, and every field has a default matching the public Kakao endpoints
//! except the application key.

// self
use crate::_prelude::*;

/// Default token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://kauth.kakao.com/oauth/token";
/// Default "send to me" memo endpoint.
pub const DEFAULT_MESSAGE_ENDPOINT: &str = "https://kapi.kakao.com/v2/api/talk/memo/default/send";
/// Default redirect URI registered for the authorization code flow.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
/// Default link attached to every text memo; sent as `http://yourwebsite.com/`.
pub const DEFAULT_WEB_URL: &str = "http://yourwebsite.com";

/// Errors raised while constructing or validating configuration.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigBuildError {
	/// Application key is empty.
	#[error("Application key cannot be empty.")]
	EmptyAppKey,
	/// Application key contains whitespace.
	#[error("Application key contains whitespace.")]
	AppKeyContainsWhitespace,
	/// A configured URL is not an HTTP(S) URL.
	#[error("The {field} URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which field failed validation.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// A URL literal could not be parsed.
	#[error("The {field} URL is invalid: {url}.")]
	InvalidUrl {
		/// Which field failed validation.
		field: &'static str,
		/// Raw value that failed to parse.
		url: String,
	},
}

/// Provider endpoints called by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KakaoEndpoints {
	/// OAuth token endpoint used by the code exchange.
	pub token: Url,
	/// Messaging endpoint used by order notifications.
	pub message: Url,
}

/// Immutable configuration injected into [`KakaoClient`](crate::flows::KakaoClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KakaoConfig {
	/// Application (REST API) key sent as `client_id`.
	pub app_key: String,
	/// Endpoint definitions.
	pub endpoints: KakaoEndpoints,
	/// Redirect URI sent with the token exchange.
	pub redirect_uri: Url,
	/// Link attached to text memos, sent in its normalized [`Url`] form.
	pub web_url: Url,
}
impl KakaoConfig {
	/// Creates a new builder seeded with the application key.
	pub fn builder(app_key: impl Into<String>) -> KakaoConfigBuilder {
		KakaoConfigBuilder::new(app_key)
	}

	/// Validates invariants for the configuration.
	///
	/// Deserialized values bypass the builder, so callers loading configuration from a file
	/// should run this before handing it to the client.
	pub fn validate(&self) -> Result<(), ConfigBuildError> {
		if self.app_key.is_empty() {
			return Err(ConfigBuildError::EmptyAppKey);
		}
		if self.app_key.chars().any(char::is_whitespace) {
			return Err(ConfigBuildError::AppKeyContainsWhitespace);
		}

		validate_url("token", &self.endpoints.token)?;
		validate_url("message", &self.endpoints.message)?;
		validate_url("redirect_uri", &self.redirect_uri)?;
		validate_url("web_url", &self.web_url)?;

		Ok(())
	}
}

/// Builder for [`KakaoConfig`] values.
#[derive(Debug)]
pub struct KakaoConfigBuilder {
	/// Application key.
	pub app_key: String,
	/// Optional token endpoint override.
	pub token_endpoint: Option<Url>,
	/// Optional message endpoint override.
	pub message_endpoint: Option<Url>,
	/// Optional redirect URI override.
	pub redirect_uri: Option<Url>,
	/// Optional memo link override.
	pub web_url: Option<Url>,
}
impl KakaoConfigBuilder {
	/// Creates a new builder seeded with the application key.
	pub fn new(app_key: impl Into<String>) -> Self {
		Self {
			app_key: app_key.into(),
			token_endpoint: None,
			message_endpoint: None,
			redirect_uri: None,
			web_url: None,
		}
	}

	/// Overrides the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the message endpoint.
	pub fn message_endpoint(mut self, url: Url) -> Self {
		self.message_endpoint = Some(url);

		self
	}

	/// Overrides the redirect URI.
	pub fn redirect_uri(mut self, url: Url) -> Self {
		self.redirect_uri = Some(url);

		self
	}

	/// Overrides the link attached to memos.
	///
	/// The link is sent in its [`Url`] serialization, so a bare origin gains a trailing
	/// slash: `https://shop.example.com` goes out as `https://shop.example.com/`. Paths
	/// and queries are sent as written.
	pub fn web_url(mut self, url: Url) -> Self {
		self.web_url = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<KakaoConfig, ConfigBuildError> {
		let token = or_default("token", self.token_endpoint, DEFAULT_TOKEN_ENDPOINT)?;
		let message = or_default("message", self.message_endpoint, DEFAULT_MESSAGE_ENDPOINT)?;
		let redirect_uri = or_default("redirect_uri", self.redirect_uri, DEFAULT_REDIRECT_URI)?;
		let web_url = or_default("web_url", self.web_url, DEFAULT_WEB_URL)?;
		let config = KakaoConfig {
			app_key: self.app_key,
			endpoints: KakaoEndpoints { token, message },
			redirect_uri,
			web_url,
		};

		config.validate()?;

		Ok(config)
	}
}

fn or_default(
	field: &'static str,
	value: Option<Url>,
	fallback: &str,
) -> Result<Url, ConfigBuildError> {
	match value {
		Some(url) => Ok(url),
		None => Url::parse(fallback)
			.map_err(|_| ConfigBuildError::InvalidUrl { field, url: fallback.to_owned() }),
	}
}

fn validate_url(field: &'static str, url: &Url) -> Result<(), ConfigBuildError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigBuildError::UnsupportedScheme { field, url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn builder_fills_public_defaults() {
		let config = KakaoConfig::builder("app-key").build().expect("Defaults should validate.");

		assert_eq!(config.app_key, "app-key");
		assert_eq!(config.endpoints.token.as_str(), DEFAULT_TOKEN_ENDPOINT);
		assert_eq!(config.endpoints.message.as_str(), DEFAULT_MESSAGE_ENDPOINT);
		assert_eq!(config.redirect_uri.as_str(), DEFAULT_REDIRECT_URI);
		assert_eq!(config.web_url.as_str(), "http://yourwebsite.com/");
	}

	#[test]
	fn builder_rejects_bad_keys_and_schemes() {
		assert_eq!(KakaoConfig::builder("").build(), Err(ConfigBuildError::EmptyAppKey));
		assert_eq!(
			KakaoConfig::builder("app key").build(),
			Err(ConfigBuildError::AppKeyContainsWhitespace)
		);

		let err = KakaoConfig::builder("app-key")
			.web_url(url("ftp://files.example.com/order"))
			.build()
			.expect_err("Non-HTTP memo links should be rejected.");

		assert!(matches!(err, ConfigBuildError::UnsupportedScheme { field: "web_url", .. }));
	}

	#[test]
	fn memo_links_use_normalized_url_form() {
		let origin = KakaoConfig::builder("app-key")
			.web_url(url("https://shop.example.com"))
			.build()
			.expect("Origin links should validate.");
		let path = KakaoConfig::builder("app-key")
			.web_url(url("https://shop.example.com/orders/42?ref=memo"))
			.build()
			.expect("Path links should validate.");

		assert_eq!(origin.web_url.as_str(), "https://shop.example.com/");
		assert_eq!(path.web_url.as_str(), "https://shop.example.com/orders/42?ref=memo");
	}

	#[test]
	fn deserialized_config_can_be_validated() {
		let raw = r#"{
			"app_key": "from-file",
			"endpoints": {
				"token": "http://127.0.0.1:9000/oauth/token",
				"message": "http://127.0.0.1:9000/v2/api/talk/memo/default/send"
			},
			"redirect_uri": "http://localhost:8080/callback",
			"web_url": "https://shop.example.com/orders"
		}"#;
		let config: KakaoConfig = serde_json::from_str(raw).expect("Config should deserialize.");

		assert!(config.validate().is_ok());
		assert_eq!(config.web_url.as_str(), "https://shop.example.com/orders");
	}
}
