//! Generic OAuth 1.0a exchange driven by provider strategy hooks.

pub mod common;

mod callback;
mod initiate;

pub use common::*;

// self
use crate::{
	_prelude::*,
	http::OAuth1HttpClient,
	oauth::{OAuth1Client, TokenResponse},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{ProviderDescriptor, ProviderStrategy},
	store::SessionStore,
};

/// Three-phase OAuth 1.0a exchange (request token, user authorization, access token).
///
/// The exchange owns the signing client, endpoint descriptor, session store, and the
/// provider strategy whose hooks customize denial detection and the request-token call.
/// Provider adapters compose it instead of re-implementing the protocol.
pub struct OAuth1Exchange<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	/// Signing transport client.
	pub client: OAuth1Client<C>,
	/// Provider endpoints.
	pub descriptor: ProviderDescriptor,
	/// Provider-specific hooks.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// Store holding request-token pairs between redirect and callback.
	pub store: Arc<dyn SessionStore>,
	/// Key namespacing this provider's pending request tokens.
	pub session_key: String,
	/// Callback URL sent as `oauth_callback`; may be relative to the request origin.
	pub callback_url: Option<String>,
}
impl<C> OAuth1Exchange<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	/// Assembles an exchange from its collaborators.
	pub fn new(
		client: OAuth1Client<C>,
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		store: Arc<dyn SessionStore>,
		session_key: impl Into<String>,
	) -> Self {
		let session_key = session_key.into();

		Self { client, descriptor, strategy, store, session_key, callback_url: None }
	}

	/// Sets the default callback URL.
	pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
		self.callback_url = Some(callback_url.into());

		self
	}

	/// Advances the exchange for an incoming request.
	///
	/// Denial is checked first, before any store or network access. A request carrying
	/// `oauth_token` is treated as the provider callback; anything else starts a new
	/// exchange.
	pub async fn authorize(
		&self,
		request: &AuthRequest,
		options: &AuthOptions,
	) -> Result<ExchangeStep> {
		if let Some(reason) = self.strategy.denial_reason(&request.query) {
			FlowSpan::new(FlowKind::Callback, "authorize").note("User refused authorization.");
			obs::record_flow_outcome(FlowKind::Callback, FlowOutcome::Denied);

			return Ok(ExchangeStep::Denied { reason });
		}

		if request.is_callback() {
			self.handle_callback(request).await.map(ExchangeStep::Authorized)
		} else {
			self.initiate(request, options).await.map(ExchangeStep::Redirect)
		}
	}
}
impl<C> Debug for OAuth1Exchange<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth1Exchange")
			.field("client", &self.client)
			.field("descriptor", &self.descriptor)
			.field("session_key", &self.session_key)
			.field("callback_url", &self.callback_url)
			.finish()
	}
}

/// Result of advancing the exchange by one request.
#[derive(Debug)]
pub enum ExchangeStep {
	/// The callback carried the provider's denial signal.
	Denied {
		/// Provider-supplied reason, e.g. `user_refused`.
		reason: String,
	},
	/// The user must be redirected to authorize the request token.
	Redirect(Url),
	/// The callback completed and an access-token pair was issued.
	Authorized(TokenResponse),
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::ScriptedHttpClient,
		error::{SessionError, TransportError},
		provider::DefaultProviderStrategy,
		store::MemoryStore,
	};

	struct RefusingStrategy;
	impl ProviderStrategy for RefusingStrategy {
		fn denial_reason(&self, query: &BTreeMap<String, String>) -> Option<String> {
			query.get("denied").cloned()
		}
	}

	fn exchange(
		http: Arc<ScriptedHttpClient>,
		store: Arc<MemoryStore>,
		strategy: Arc<dyn ProviderStrategy>,
	) -> OAuth1Exchange<ScriptedHttpClient> {
		let client =
			OAuth1Client::new("ABC123", "secret", http).expect("Client fixture should build.");
		let descriptor = ProviderDescriptor::builder("mock")
			.request_token_endpoint("https://api.example.com/oauth/request_token")
			.access_token_endpoint("https://api.example.com/oauth/access_token")
			.user_authorization_endpoint("https://www.example.com/oauth/authorize")
			.build()
			.expect("Descriptor fixture should build.");

		OAuth1Exchange::new(client, descriptor, strategy, store, "oauth:mock")
	}

	fn callback() -> AuthRequest {
		AuthRequest::default().with_query("oauth_token", "req").with_query("oauth_verifier", "v")
	}

	#[tokio::test]
	async fn denial_short_circuits_before_any_io() {
		let http = Arc::new(ScriptedHttpClient::default());
		let store = Arc::new(MemoryStore::default());
		let exchange = exchange(http.clone(), store, Arc::new(RefusingStrategy));
		let step = exchange
			.authorize(&callback().with_query("denied", "nope"), &AuthOptions::default())
			.await
			.expect("Denial should not be an error.");

		assert!(matches!(step, ExchangeStep::Denied { ref reason } if reason == "nope"));
		assert!(http.requests().is_empty());
	}

	#[tokio::test]
	async fn initiate_parks_the_pair_and_callback_consumes_it() {
		let http = Arc::new(
			ScriptedHttpClient::default()
				.reply(200, "oauth_token=req&oauth_token_secret=req-secret")
				.reply(200, "oauth_token=acc&oauth_token_secret=acc-secret"),
		);
		let store = Arc::new(MemoryStore::default());
		let exchange = exchange(http.clone(), store.clone(), Arc::new(DefaultProviderStrategy))
			.with_callback_url("/auth/mock/callback");
		let request = AuthRequest::default()
			.with_origin(Url::parse("https://app.example.com").expect("Origin should parse."));
		let step = exchange
			.authorize(&request, &AuthOptions::default())
			.await
			.expect("Initiate should succeed.");

		assert!(matches!(
			step,
			ExchangeStep::Redirect(ref url)
				if url.as_str() == "https://www.example.com/oauth/authorize?oauth_token=req"
		));
		assert_eq!(store.len(), 1);
		assert!(http.requests()[0].authorization.contains(
			"oauth_callback=\"https%3A%2F%2Fapp.example.com%2Fauth%2Fmock%2Fcallback\""
		));

		let step = exchange
			.authorize(&callback(), &AuthOptions::default())
			.await
			.expect("Callback should succeed.");

		assert!(matches!(
			step,
			ExchangeStep::Authorized(ref response) if response.pair.token == "acc"
		));
		assert!(store.is_empty());

		let err = exchange
			.authorize(&callback(), &AuthOptions::default())
			.await
			.expect_err("Replayed callback should fail.");

		assert!(matches!(err, Error::Session(SessionError::MissingRequestToken { .. })));
	}

	#[tokio::test]
	async fn provider_failures_are_wrapped_per_phase() {
		let http = Arc::new(
			ScriptedHttpClient::default()
				.fail(TransportError::Status { status: 500, body: "boom".into() }),
		);
		let store = Arc::new(MemoryStore::default());
		let exchange = exchange(http, store, Arc::new(DefaultProviderStrategy));
		let err = exchange
			.initiate(&AuthRequest::default(), &AuthOptions::default())
			.await
			.expect_err("Request token failure should propagate.");

		assert!(err.is_internal_oauth());
		assert_eq!(err.to_string(), "Failed to obtain request token.");

		let err = exchange
			.handle_callback(&AuthRequest::default())
			.await
			.expect_err("Callback without token should fail.");

		assert!(matches!(err, Error::Session(SessionError::MissingCallbackToken)));
	}

	#[tokio::test]
	async fn access_token_failure_still_consumes_the_pair() {
		let http =
			Arc::new(ScriptedHttpClient::default().reply(401, "oauth_problem=token_rejected"));
		let store = Arc::new(MemoryStore::default());
		let exchange = exchange(http, store.clone(), Arc::new(DefaultProviderStrategy));

		store
			.save(
				crate::store::StoreKey::new("oauth:mock", "req"),
				crate::store::RequestTokenRecord::new(crate::auth::TokenPair::new("req", "s")),
			)
			.await
			.expect("Seeding the store should succeed.");

		let err = exchange.handle_callback(&callback()).await.expect_err("401 should fail.");

		assert_eq!(err.to_string(), "Failed to obtain access token.");
		assert!(store.is_empty());
	}
}
