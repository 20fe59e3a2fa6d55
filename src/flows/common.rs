//! Request, option, and outcome types shared by the exchange and provider adapters.

// self
use crate::{_prelude::*, auth::ScopeOption, error::ConfigError};

/// `oauth_callback` value used when no callback URL is configured (out-of-band).
pub const OUT_OF_BAND_CALLBACK: &str = "oob";

/// The parts of an incoming HTTP request the exchange reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthRequest {
	/// Decoded query parameters.
	pub query: BTreeMap<String, String>,
	/// Origin (`scheme://host[:port]`) used to resolve relative callback URLs.
	pub origin: Option<Url>,
}
impl AuthRequest {
	/// Captures the query and origin of a full request URL.
	pub fn from_url(url: &Url) -> Self {
		let query = url.query_pairs().into_owned().collect();
		let origin = Url::parse(&url.origin().ascii_serialization()).ok();

		Self { query, origin }
	}

	/// Adds or replaces a query parameter.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(key.into(), value.into());

		self
	}

	/// Sets the request origin.
	pub fn with_origin(mut self, origin: Url) -> Self {
		self.origin = Some(origin);

		self
	}

	/// Returns a query parameter by name.
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query.get(key).map(String::as_str)
	}

	/// Returns true when the request is the provider redirect carrying `oauth_token`.
	pub fn is_callback(&self) -> bool {
		self.query_param("oauth_token").is_some()
	}
}

/// Per-attempt options supplied by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthOptions {
	/// Requested authorization scope.
	pub scope: Option<ScopeOption>,
	/// Callback URL overriding the configured one for this attempt.
	pub callback_url: Option<String>,
}
impl AuthOptions {
	/// Sets the requested scope.
	pub fn with_scope(mut self, scope: impl Into<ScopeOption>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Overrides the callback URL for this attempt.
	pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
		self.callback_url = Some(callback_url.into());

		self
	}
}

/// Terminal result of an authentication attempt, handed back to the host.
///
/// Runtime failures are carried in [`AuthOutcome::Error`] rather than returned as `Err`, so
/// the host always receives one of the four outcomes.
#[derive(Debug)]
pub enum AuthOutcome<U> {
	/// Send the user agent to this URL.
	Redirect(Url),
	/// The verification callback accepted the user.
	Success(U),
	/// Authentication failed without an error.
	Fail(FailReason),
	/// Authentication failed with an error.
	Error(Error),
}
impl<U> AuthOutcome<U> {
	/// Returns true for [`AuthOutcome::Success`].
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	/// Returns true for [`AuthOutcome::Fail`].
	pub fn is_fail(&self) -> bool {
		matches!(self, Self::Fail(_))
	}
}

/// Why an attempt ended in [`AuthOutcome::Fail`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailReason {
	/// The user refused authorization at the provider.
	Denied {
		/// Provider-supplied problem code, e.g. `user_refused`.
		problem: String,
	},
	/// The verification callback rejected the profile.
	Rejected,
}

/// Resolves the `oauth_callback` value for a request-token call.
pub(crate) fn resolve_callback(
	callback: Option<&str>,
	origin: Option<&Url>,
) -> Result<String, ConfigError> {
	let Some(callback) = callback else {
		return Ok(OUT_OF_BAND_CALLBACK.into());
	};

	match Url::parse(callback) {
		Ok(_) => Ok(callback.to_owned()),
		Err(url::ParseError::RelativeUrlWithoutBase) => {
			let origin = origin
				.ok_or_else(|| ConfigError::UnresolvableCallback { callback: callback.into() })?;

			origin
				.join(callback)
				.map(String::from)
				.map_err(|source| ConfigError::InvalidCallback { source })
		},
		Err(source) => Err(ConfigError::InvalidCallback { source }),
	}
}
