//! Crate-level error types shared across the exchange, transport, and profile layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used for transport and host-supplied failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Request-token state could not be restored for a callback.
	#[error(transparent)]
	Session(#[from] SessionError),
	/// Provider profile response could not be parsed.
	#[error(transparent)]
	ProfileParse(#[from] ProfileParseError),

	/// Provider interaction failed (token exchange or profile fetch).
	#[error("{message}")]
	InternalOAuth {
		/// Stage-specific summary, e.g. `Failed to fetch user profile.`.
		message: &'static str,
		/// Underlying transport or provider failure.
		#[source]
		source: TransportError,
	},
	/// The host verification callback reported an error.
	#[error("Verification callback failed.")]
	Verify {
		/// Host-supplied failure.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps a transport failure with a stage-specific message.
	pub fn internal_oauth(message: &'static str, source: impl Into<TransportError>) -> Self {
		Self::InternalOAuth { message, source: source.into() }
	}

	/// Returns true when the error originates from the provider or the network.
	pub fn is_internal_oauth(&self) -> bool {
		matches!(self, Self::InternalOAuth { .. })
	}
}

/// Configuration and validation failures raised at construction time.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Consumer key is missing or empty.
	#[error("Consumer key is required.")]
	MissingConsumerKey,
	/// Consumer secret is missing or empty.
	#[error("Consumer secret is required.")]
	MissingConsumerSecret,
	/// Descriptor builder was not given a required endpoint.
	#[error("Missing {endpoint} endpoint.")]
	MissingEndpoint {
		/// Which endpoint is missing.
		endpoint: &'static str,
	},
	/// An endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An endpoint URL uses a scheme other than HTTP(S).
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Callback URL is relative and no request origin was available to resolve it.
	#[error("Callback URL `{callback}` is relative and the request carries no origin.")]
	UnresolvableCallback {
		/// Configured callback value.
		callback: String,
	},
	/// Callback URL cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Request-token session failures raised while handling a callback.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum SessionError {
	/// Callback reached the exchange without an `oauth_token` query parameter.
	#[error("Callback request carries no `oauth_token`.")]
	MissingCallbackToken,
	/// No request-token pair was stored for the returned `oauth_token`.
	#[error("Failed to find request token `{token}` in session `{session_key}`.")]
	MissingRequestToken {
		/// Session key the pair was expected under.
		session_key: String,
		/// Request token returned by the provider.
		token: String,
	},
}

/// Profile response parsing failures. Every variant carries the original body.
#[derive(Debug, ThisError)]
pub enum ProfileParseError {
	/// Body is not valid JSON.
	#[error("Profile response is not valid JSON.")]
	Json {
		/// Raw response body.
		raw: String,
		/// JSON syntax failure.
		#[source]
		source: serde_json::Error,
	},
	/// Body is valid JSON but not an object.
	#[error("Profile response is not a JSON object.")]
	NotAnObject {
		/// Raw response body.
		raw: String,
	},
	/// Body is missing required fields or has unexpected types.
	#[error("Profile response has an unexpected shape.")]
	Shape {
		/// Raw response body.
		raw: String,
		/// Structured parsing failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ProfileParseError {
	/// Returns the raw body that failed to parse.
	pub fn raw(&self) -> &str {
		match self {
			Self::Json { raw, .. } | Self::NotAnObject { raw } | Self::Shape { raw, .. } => raw,
		}
	}
}

/// Transport-level and provider-side failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success status.
	#[error("Provider responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, kept for diagnostics.
		body: String,
	},
	/// Token endpoint response lacks `oauth_token` or `oauth_token_secret`.
	#[error("Token endpoint response is missing `{field}`.")]
	MalformedTokenResponse {
		/// Missing field name.
		field: &'static str,
		/// Response body, kept for diagnostics.
		body: String,
	},
	/// Request URL cannot be parsed.
	#[error("Request URL is invalid.")]
	InvalidUrl(#[from] url::ParseError),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// HTTP status returned by the provider, when available.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn internal_oauth_keeps_transport_source() {
		let err = Error::internal_oauth(
			"Failed to fetch user profile.",
			TransportError::Status { status: 500, body: "boom".into() },
		);

		assert!(err.is_internal_oauth());
		assert_eq!(err.to_string(), "Failed to fetch user profile.");

		let source = StdError::source(&err).expect("Wrapped error should expose its source.");

		assert_eq!(source.to_string(), "Provider responded with HTTP 500.");
	}

	#[test]
	fn config_errors_name_the_offending_endpoint() {
		let err = ConfigError::UnsupportedScheme {
			endpoint: "request_token",
			url: "ftp://api.example.com/request".into(),
		};

		assert_eq!(
			err.to_string(),
			"The request_token endpoint must use http or https: ftp://api.example.com/request."
		);
		assert_eq!(
			Error::from(ConfigError::MissingConsumerKey).to_string(),
			"Consumer key is required."
		);
	}

	#[test]
	fn parse_errors_expose_raw_body() {
		let err = ProfileParseError::NotAnObject { raw: "[]".into() };

		assert_eq!(err.raw(), "[]");
		assert!(!Error::from(err).is_internal_oauth());
	}
}
