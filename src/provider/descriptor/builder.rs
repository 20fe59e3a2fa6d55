// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{ProviderDescriptor, ProviderEndpoints},
};

/// Builder for [`ProviderDescriptor`] values.
///
/// Endpoints may be supplied as already parsed [`Url`]s or as strings; strings are parsed
/// during [`build`](Self::build) so configuration errors surface in one place.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: String,
	/// Request-token endpoint.
	pub request_token_endpoint: Option<String>,
	/// Access-token endpoint.
	pub access_token_endpoint: Option<String>,
	/// User-authorization endpoint.
	pub user_authorization_endpoint: Option<String>,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			request_token_endpoint: None,
			access_token_endpoint: None,
			user_authorization_endpoint: None,
		}
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: impl AsRef<str>) -> Self {
		self.request_token_endpoint = Some(url.as_ref().to_owned());

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: impl AsRef<str>) -> Self {
		self.access_token_endpoint = Some(url.as_ref().to_owned());

		self
	}

	/// Sets the user-authorization endpoint.
	pub fn user_authorization_endpoint(mut self, url: impl AsRef<str>) -> Self {
		self.user_authorization_endpoint = Some(url.as_ref().to_owned());

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ConfigError> {
		let request_token = parse_endpoint("request_token", self.request_token_endpoint)?;
		let access_token = parse_endpoint("access_token", self.access_token_endpoint)?;
		let user_authorization =
			parse_endpoint("user_authorization", self.user_authorization_endpoint)?;

		Ok(ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { request_token, access_token, user_authorization },
		})
	}
}

fn parse_endpoint(name: &'static str, value: Option<String>) -> Result<Url, ConfigError> {
	let value = value.ok_or(ConfigError::MissingEndpoint { endpoint: name })?;
	let url = Url::parse(&value)
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint: name, source })?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		_ => Err(ConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}
