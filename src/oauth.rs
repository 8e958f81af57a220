//! Request primitives shared by both flows: the token form, transport error mapping, and
//! the single-call dispatcher that classifies provider responses.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest,
	http::{
		HeaderValue, Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	config::KakaoConfig,
	error::{ConfigError, TransportError},
	http::KakaoHttpClient,
	provider::{Endpoint, ProviderErrorContext, ProviderErrorKind, ProviderStrategy},
};

/// `Content-Type` used by the token exchange.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// `Content-Type` used by the memo call.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(&self, endpoint: Endpoint, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, endpoint: Endpoint, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(endpoint, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::Other { endpoint: endpoint.as_str(), message }.into(),
			_ => TransportError::Other {
				endpoint: endpoint.as_str(),
				message: "unrecognized transport failure".into(),
			}
			.into(),
		}
	}
}

/// Form parameters of an authorization code exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenRequest<'a> {
	/// Application key sent as `client_id`.
	pub client_id: &'a str,
	/// Redirect URI registered for the application.
	pub redirect_uri: &'a str,
	/// Authorization code supplied by the caller.
	pub code: &'a str,
}
impl<'a> TokenRequest<'a> {
	/// Grant type sent with every exchange.
	pub const GRANT_TYPE: &'static str = "authorization_code";

	/// Builds the exchange parameters for `code` from the configuration.
	pub fn new(config: &'a KakaoConfig, code: &'a str) -> Self {
		Self { client_id: &config.app_key, redirect_uri: config.redirect_uri.as_str(), code }
	}

	/// Encodes the four parameters as an `application/x-www-form-urlencoded` body.
	pub fn to_form(&self) -> String {
		form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", Self::GRANT_TYPE)
			.append_pair("client_id", self.client_id)
			.append_pair("redirect_uri", self.redirect_uri)
			.append_pair("code", self.code)
			.finish()
	}

	/// Builds the outbound HTTP request.
	pub fn to_http_request(&self, endpoint: &Url) -> Result<HttpRequest> {
		let request = Request::builder()
			.method(Method::POST)
			.uri(endpoint.as_str())
			.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
			.header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE))
			.body(self.to_form().into_bytes())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}

/// Successful (2xx) provider response with its body decoded as UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProviderResponse {
	pub(crate) status: u16,
	pub(crate) body: String,
}

/// Issues exactly one request and classifies anything other than a 2xx response.
pub(crate) async fn dispatch<C, M>(
	http_client: &C,
	mapper: &M,
	strategy: &dyn ProviderStrategy,
	endpoint: Endpoint,
	request: HttpRequest,
) -> Result<ProviderResponse>
where
	C: ?Sized + KakaoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let handle = http_client.handle();
	let response = handle
		.call(request)
		.await
		.map_err(|err| mapper.map_transport_error(endpoint, err))?;
	let status = response.status();
	let body = response.into_body();

	if status.is_success() {
		let body = String::from_utf8(body).map_err(|source| TransportError::InvalidBody {
			endpoint: endpoint.as_str(),
			source,
		})?;

		return Ok(ProviderResponse { status: status.as_u16(), body });
	}

	// Error statuses classify on the status line; the body only feeds the reason.
	Err(map_status_error(strategy, endpoint, status.as_u16(), &String::from_utf8_lossy(&body)))
}

/// Converts a non-2xx response into a crate error via the provider strategy.
pub(crate) fn map_status_error(
	strategy: &dyn ProviderStrategy,
	endpoint: Endpoint,
	status: u16,
	body: &str,
) -> Error {
	let ctx = ProviderErrorContext::from_response(endpoint, status, body);

	match strategy.classify_error(&ctx) {
		ProviderErrorKind::AccessDenied => Error::AccessDenied { status, reason: ctx.reason() },
		ProviderErrorKind::Client => Error::Client { status, reason: ctx.reason() },
		ProviderErrorKind::Unexpected => TransportError::UnexpectedStatus {
			endpoint: endpoint.as_str(),
			status,
			body_preview: ctx.body_preview,
		}
		.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(endpoint: Endpoint, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(endpoint.as_str(), err).into();
	}

	TransportError::network(endpoint.as_str(), err).into()
}
