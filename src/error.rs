//! Crate-level error types shared across flows, collaborators, and transports.

// self
use crate::{_prelude::*, auth::OptionId, auth::UserId};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout) or an unexpected upstream response.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Option lookup collaborator failed.
	#[error(transparent)]
	Lookup(#[from] crate::lookup::LookupError),
	/// Token store collaborator failed.
	#[error(transparent)]
	Storage(#[from] crate::store::StoreError),

	/// Provider rejected the request due to its authorization policy.
	#[error("Provider denied access ({status}): {reason}.")]
	AccessDenied {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Provider answered with a client-side (4xx) error other than an access denial.
	#[error("Provider rejected the request ({status}): {reason}.")]
	Client {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Option lookup returned nothing for the requested identifier.
	#[error("Option {option_id} does not exist.")]
	OptionNotFound {
		/// Identifier that failed to resolve.
		option_id: OptionId,
	},
	/// No access token is registered for the user.
	#[error("No access token is registered for user {user}.")]
	TokenNotFound {
		/// User whose token was requested.
		user: UserId,
	},
}
impl Error {
	/// Returns the failure category used in log fields and metric labels.
	pub fn kind(&self) -> FailureKind {
		match self {
			Self::Config(_) => FailureKind::Config,
			Self::Transport(_) => FailureKind::Transport,
			Self::Lookup(_) | Self::OptionNotFound { .. } => FailureKind::LookupFailure,
			Self::Storage(_) => FailureKind::Storage,
			Self::AccessDenied { .. } => FailureKind::AccessDenied,
			Self::Client { .. } => FailureKind::ClientError,
			Self::TokenNotFound { .. } => FailureKind::TokenMissing,
		}
	}

	/// Returns the HTTP status behind the failure, when the provider answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::AccessDenied { status, .. }
			| Self::Client { status, .. }
			| Self::Transport(TransportError::UnexpectedStatus { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Coarse failure categories surfaced to logs and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
	/// Provider refused the request on policy grounds.
	AccessDenied,
	/// Any other 4xx-class response.
	ClientError,
	/// Network, timeout, malformed response, or other unexpected failure.
	Transport,
	/// Option lookup failed or found nothing.
	LookupFailure,
	/// No token could be resolved for the user.
	TokenMissing,
	/// Configuration or request construction failure.
	Config,
	/// Token store backend failure.
	Storage,
}
impl FailureKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureKind::AccessDenied => "access_denied",
			FailureKind::ClientError => "client_error",
			FailureKind::Transport => "transport",
			FailureKind::LookupFailure => "lookup_failure",
			FailureKind::TokenMissing => "token_missing",
			FailureKind::Config => "config",
			FailureKind::Storage => "storage",
		}
	}
}
impl Display for FailureKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Header value contains bytes that cannot be sent.
	#[error("Header `{header}` contains an invalid value.")]
	InvalidHeader {
		/// Header name that failed validation.
		header: &'static str,
	},
	/// JSON payload could not be serialized.
	#[error("Request payload could not be serialized.")]
	Serialize(#[from] serde_json::Error),
	/// Configuration failed validation.
	#[error(transparent)]
	Invalid(#[from] crate::config::ConfigBuildError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures and responses the provider should never produce.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint label (`token` or `message`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete before the transport deadline.
	#[error("Request to {endpoint} timed out.")]
	Timeout {
		/// Endpoint label (`token` or `message`).
		endpoint: &'static str,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Provider answered with a status outside the 2xx and 4xx ranges.
	#[error("The {endpoint} endpoint returned an unexpected status {status}: {body_preview}.")]
	UnexpectedStatus {
		/// Endpoint label (`token` or `message`).
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
		/// Truncated response body.
		body_preview: String,
	},
	/// Response body is not valid UTF-8.
	#[error("The {endpoint} endpoint returned a body that is not valid UTF-8.")]
	InvalidBody {
		/// Endpoint label (`token` or `message`).
		endpoint: &'static str,
		/// Decoding failure.
		#[source]
		source: std::string::FromUtf8Error,
	},
	/// Transport failed in a way the mapper could not classify further.
	#[error("HTTP client error occurred while calling {endpoint}: {message}.")]
	Other {
		/// Endpoint label (`token` or `message`).
		endpoint: &'static str,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Timeout { endpoint, source: Box::new(src) }
	}
}
