//! Provider strategy hooks that customize the generic OAuth 1.0a exchange.
//!
//! Implementations decorate the request-token phase and interpret callback query
//! parameters without tying the exchange to any particular HTTP client.

// self
use crate::{_prelude::*, flows::AuthOptions};

/// Strategy hook set consulted by [`OAuth1Exchange`](crate::flows::OAuth1Exchange) and
/// [`OAuth1Client`](crate::oauth::OAuth1Client).
///
/// Every hook has a default that leaves the standard protocol untouched, so a provider
/// overrides only what it needs. The hooks work on plain maps and strings so
/// implementations remain HTTP client agnostic.
pub trait ProviderStrategy: Send + Sync {
	/// Returns the provider's "user refused authorization" signal, if the callback carries one.
	///
	/// A `Some` value short-circuits the exchange before any token or store access.
	fn denial_reason(&self, _query: &BTreeMap<String, String>) -> Option<String> {
		None
	}

	/// Extra parameters contributed to the request-token call.
	fn request_token_params(&self, _options: &AuthOptions) -> BTreeMap<String, String> {
		BTreeMap::new()
	}

	/// Rewrites the request-token URL and parameters right before signing.
	///
	/// Entries left in `params` are sent in the signed form body; anything moved into `url`
	/// is signed as a query parameter instead.
	fn augment_request_token(&self, _url: &mut String, _params: &mut BTreeMap<String, String>) {}
}

/// Strategy that follows the standard protocol with no provider quirks.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::ScopeOption;

	#[test]
	fn default_hooks_leave_the_protocol_untouched() {
		let strategy = DefaultProviderStrategy;
		let query = BTreeMap::from([("oauth_problem".to_owned(), "user_refused".to_owned())]);
		let options = AuthOptions::default().with_scope(ScopeOption::from("r_basicprofile"));
		let mut url = "https://api.example.com/oauth/request_token".to_owned();
		let mut params = BTreeMap::from([("scope".to_owned(), "r_basicprofile".to_owned())]);

		strategy.augment_request_token(&mut url, &mut params);

		assert_eq!(strategy.denial_reason(&query), None);
		assert!(strategy.request_token_params(&options).is_empty());
		assert_eq!(url, "https://api.example.com/oauth/request_token");
		assert_eq!(params.len(), 1);
	}
}
