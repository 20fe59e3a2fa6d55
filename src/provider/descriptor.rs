//! Provider descriptor data structures shared by the exchange.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Endpoint issuing unauthorized request tokens.
	pub request_token: Url,
	/// Endpoint exchanging authorized request tokens for access tokens.
	pub access_token: Url,
	/// Page the user is redirected to in order to authorize the request token.
	pub user_authorization: Url,
}

/// Immutable provider descriptor consumed by the exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Provider identifier, e.g. `linkedin`.
	pub id: String,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: impl Into<String>) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Builds the user-authorization redirect for an issued request token.
	pub fn authorize_url(&self, request_token: &str) -> Url {
		let mut url = self.endpoints.user_authorization.clone();

		url.query_pairs_mut().append_pair("oauth_token", request_token);

		url
	}
}
