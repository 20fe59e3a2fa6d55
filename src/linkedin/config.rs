//! Host-supplied LinkedIn configuration with endpoint defaults.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	linkedin::{self, fields},
	oauth::SignatureMethod,
	provider::ProviderDescriptor,
};

/// Strategy configuration. Immutable once handed to
/// [`LinkedInStrategy`](crate::linkedin::LinkedInStrategy).
///
/// Deserializable so hosts can load it from their own config layer; every field except the
/// consumer credentials has a LinkedIn default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInConfig {
	/// Identifies the application to LinkedIn.
	#[serde(default)]
	pub consumer_key: String,
	/// Proves ownership of the consumer key.
	#[serde(default)]
	pub consumer_secret: TokenSecret,
	/// Where LinkedIn redirects after authorization; may be relative to the request origin.
	#[serde(default)]
	pub callback_url: Option<String>,
	/// Request-token endpoint.
	#[serde(default = "default_request_token_url")]
	pub request_token_url: String,
	/// Access-token endpoint.
	#[serde(default = "default_access_token_url")]
	pub access_token_url: String,
	/// User-authorization endpoint.
	#[serde(default = "default_user_authorization_url")]
	pub user_authorization_url: String,
	/// Profile endpoint base, before the field selector.
	#[serde(default = "default_profile_url")]
	pub profile_url: String,
	/// Session key namespacing pending request tokens.
	#[serde(default = "default_session_key")]
	pub session_key: String,
	/// Abstract profile fields to request; `None` requests id and name only.
	#[serde(default)]
	pub profile_fields: Option<Vec<String>>,
	/// Signature method used for every signed call.
	#[serde(default)]
	pub signature_method: SignatureMethod,
}
impl LinkedInConfig {
	/// Creates a configuration with LinkedIn defaults for everything but the credentials.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: TokenSecret::new(consumer_secret),
			callback_url: None,
			request_token_url: default_request_token_url(),
			access_token_url: default_access_token_url(),
			user_authorization_url: default_user_authorization_url(),
			profile_url: default_profile_url(),
			session_key: default_session_key(),
			profile_fields: None,
			signature_method: SignatureMethod::default(),
		}
	}

	/// Sets the callback URL.
	pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
		self.callback_url = Some(callback_url.into());

		self
	}

	/// Sets the abstract profile fields to request.
	pub fn with_profile_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.profile_fields = Some(fields.into_iter().map(Into::into).collect());

		self
	}

	/// Overrides the request-token endpoint.
	pub fn with_request_token_url(mut self, url: impl Into<String>) -> Self {
		self.request_token_url = url.into();

		self
	}

	/// Overrides the access-token endpoint.
	pub fn with_access_token_url(mut self, url: impl Into<String>) -> Self {
		self.access_token_url = url.into();

		self
	}

	/// Overrides the user-authorization endpoint.
	pub fn with_user_authorization_url(mut self, url: impl Into<String>) -> Self {
		self.user_authorization_url = url.into();

		self
	}

	/// Overrides the profile endpoint base.
	pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
		self.profile_url = url.into();

		self
	}

	/// Overrides the session key.
	pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
		self.session_key = session_key.into();

		self
	}

	/// Builds the validated endpoint descriptor.
	pub fn descriptor(&self) -> Result<ProviderDescriptor, ConfigError> {
		ProviderDescriptor::builder(linkedin::PROVIDER_ID)
			.request_token_endpoint(&self.request_token_url)
			.access_token_endpoint(&self.access_token_url)
			.user_authorization_endpoint(&self.user_authorization_url)
			.build()
	}

	/// Field selector derived from [`profile_fields`](Self::profile_fields).
	pub fn field_selector(&self) -> String {
		match &self.profile_fields {
			Some(names) => fields::build_field_selector(names),
			None => fields::DEFAULT_FIELD_SELECTOR.to_owned(),
		}
	}

	/// Full profile request URL: `<profile_url>:(<selector>)?format=json`.
	pub fn profile_request_url(&self) -> Result<Url, ConfigError> {
		let url = format!("{}:({})?format=json", self.profile_url, self.field_selector());

		Url::parse(&url)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "profile", source })
	}
}

fn default_request_token_url() -> String {
	linkedin::REQUEST_TOKEN_URL.into()
}

fn default_access_token_url() -> String {
	linkedin::ACCESS_TOKEN_URL.into()
}

fn default_user_authorization_url() -> String {
	linkedin::USER_AUTHORIZATION_URL.into()
}

fn default_profile_url() -> String {
	linkedin::PROFILE_URL.into()
}

fn default_session_key() -> String {
	linkedin::SESSION_KEY.into()
}
