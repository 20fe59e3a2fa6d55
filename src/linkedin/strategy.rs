//! LinkedIn orchestrator: denial detection, scope injection, profile fetch, and host
//! verification on top of [`OAuth1Exchange`].

// self
use crate::{
	_prelude::*,
	auth::TokenPair,
	error::{BoxError, ConfigError},
	flows::{AuthOptions, AuthOutcome, AuthRequest, ExchangeStep, FailReason, OAuth1Exchange},
	http::{HttpResponse, OAuth1HttpClient},
	linkedin::{self, LinkedInConfig, Profile, profile},
	oauth::OAuth1Client,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ProviderStrategy,
	store::SessionStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<Option<U>, BoxError>> + 'a + Send>>;

/// LinkedIn strategy backed by the reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestLinkedInStrategy<U> = LinkedInStrategy<U, ReqwestHttpClient>;

/// Host-supplied verification of an authenticated LinkedIn user.
///
/// Resolve `Ok(Some(user))` to accept, `Ok(None)` to reject without an error, and `Err` to
/// abort the attempt. Any `Fn(TokenPair, Profile) -> impl Future` closure qualifies.
pub trait Verify<U>
where
	Self: Send + Sync,
{
	/// Decides whether the holder of `access` and `profile` is a known user.
	fn verify(&self, access: TokenPair, profile: Profile) -> VerifyFuture<'_, U>;
}
impl<U, F, Fut> Verify<U> for F
where
	F: Send + Sync + Fn(TokenPair, Profile) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<U>, BoxError>>,
{
	fn verify(&self, access: TokenPair, profile: Profile) -> VerifyFuture<'_, U> {
		Box::pin(self(access, profile))
	}
}

/// LinkedIn hooks for the generic exchange.
///
/// - A non-empty `oauth_problem` on the callback is a denial.
/// - Scope is joined with `+` and moved onto the request-token URL's query string instead of
///   the form body, since LinkedIn only honors it there.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkedInProviderStrategy;
impl Display for LinkedInProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("linkedin-provider-strategy")
	}
}
impl ProviderStrategy for LinkedInProviderStrategy {
	fn denial_reason(&self, query: &BTreeMap<String, String>) -> Option<String> {
		query.get(linkedin::DENIAL_PARAM).filter(|problem| !problem.is_empty()).cloned()
	}

	fn request_token_params(&self, options: &AuthOptions) -> BTreeMap<String, String> {
		let mut params = BTreeMap::new();

		let scope =
			options.scope.as_ref().map(|scope| scope.join("+")).filter(|scope| !scope.is_empty());

		if let Some(scope) = scope {
			params.insert("scope".into(), scope);
		}

		params
	}

	fn augment_request_token(&self, url: &mut String, params: &mut BTreeMap<String, String>) {
		let Some(scope) = params.remove("scope") else {
			return;
		};
		let separator = if url.contains('?') { '&' } else { '?' };

		url.push(separator);
		url.push_str("scope=");
		url.push_str(&scope);
	}
}

/// Authenticates LinkedIn users over OAuth 1.0a and hands normalized profiles to the host.
pub struct LinkedInStrategy<U, C>
where
	C: ?Sized + OAuth1HttpClient,
{
	exchange: OAuth1Exchange<C>,
	profile_url: Url,
	verifier: Arc<dyn Verify<U>>,
}
impl<U, C> LinkedInStrategy<U, C>
where
	U: 'static + Send,
	C: ?Sized + OAuth1HttpClient,
{
	/// Builds a strategy from validated configuration.
	///
	/// Fails when the consumer credentials are empty or any endpoint is not an HTTP(S) URL.
	pub fn new(
		config: LinkedInConfig,
		store: Arc<dyn SessionStore>,
		http_client: impl Into<Arc<C>>,
		verifier: impl 'static + Verify<U>,
	) -> Result<Self, ConfigError> {
		let descriptor = config.descriptor()?;
		let profile_url = config.profile_request_url()?;
		let client =
			OAuth1Client::new(config.consumer_key, config.consumer_secret.expose(), http_client)?
				.with_signature_method(config.signature_method);
		let mut exchange = OAuth1Exchange::new(
			client,
			descriptor,
			Arc::new(LinkedInProviderStrategy),
			store,
			config.session_key,
		);

		if let Some(callback_url) = config.callback_url {
			exchange = exchange.with_callback_url(callback_url);
		}

		Ok(Self { exchange, profile_url, verifier: Arc::new(verifier) })
	}

	/// Strategy name hosts register this adapter under.
	pub fn name(&self) -> &'static str {
		linkedin::PROVIDER_ID
	}

	/// Underlying exchange.
	pub fn exchange(&self) -> &OAuth1Exchange<C> {
		&self.exchange
	}

	/// Fully-qualified profile URL, including the field selector.
	pub fn profile_url(&self) -> &Url {
		&self.profile_url
	}

	/// Extra request-token parameters derived from `options`.
	pub fn request_token_params(&self, options: &AuthOptions) -> BTreeMap<String, String> {
		self.exchange.strategy.request_token_params(options)
	}

	/// Runs one step of the login and reports the outcome to the host.
	///
	/// A denial callback fails immediately with the provider's problem code. A fresh request
	/// redirects to LinkedIn. A completed callback fetches the profile and asks the verifier
	/// whether to accept the user.
	pub async fn authenticate(
		&self,
		request: &AuthRequest,
		options: &AuthOptions,
	) -> AuthOutcome<U> {
		let step = match self.exchange.authorize(request, options).await {
			Ok(step) => step,
			Err(e) => return AuthOutcome::Error(e),
		};

		match step {
			ExchangeStep::Denied { reason } =>
				AuthOutcome::Fail(FailReason::Denied { problem: reason }),
			ExchangeStep::Redirect(url) => AuthOutcome::Redirect(url),
			ExchangeStep::Authorized(response) => self.complete(response.pair).await,
		}
	}

	/// Fetches and normalizes the authenticated user's profile.
	pub async fn fetch_profile(&self, access: &TokenPair) -> Result<Profile> {
		const KIND: FlowKind = FlowKind::Profile;

		let span = FlowSpan::new(KIND, "fetch_profile");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let body = self
					.exchange
					.client
					.get(&self.profile_url, access)
					.await
					.and_then(HttpResponse::into_success_body)
					.map_err(|e| Error::internal_oauth("Failed to fetch user profile.", e))?;

				Ok(profile::normalize(&body)?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn complete(&self, access: TokenPair) -> AuthOutcome<U> {
		let profile = match self.fetch_profile(&access).await {
			Ok(profile) => profile,
			Err(e) => return AuthOutcome::Error(e),
		};

		match self.verifier.verify(access, profile).await {
			Ok(Some(user)) => AuthOutcome::Success(user),
			Ok(None) => {
				FlowSpan::new(FlowKind::Callback, "verify").note("Verifier rejected the user.");

				AuthOutcome::Fail(FailReason::Rejected)
			},
			Err(source) => AuthOutcome::Error(Error::Verify { source }),
		}
	}
}
#[cfg(feature = "reqwest")]
impl<U> LinkedInStrategy<U, ReqwestHttpClient>
where
	U: 'static + Send,
{
	/// Builds a strategy on a default reqwest client.
	pub fn with_reqwest(
		config: LinkedInConfig,
		store: Arc<dyn SessionStore>,
		verifier: impl 'static + Verify<U>,
	) -> Result<Self, ConfigError> {
		Self::new(config, store, ReqwestHttpClient::default(), verifier)
	}
}
impl<U, C> Debug for LinkedInStrategy<U, C>
where
	C: ?Sized + OAuth1HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LinkedInStrategy")
			.field("exchange", &self.exchange)
			.field("profile_url", &self.profile_url.as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::ScriptedHttpClient,
		auth::ScopeOption,
		error::{ProfileParseError, SessionError, TransportError},
		http::HttpMethod,
		store::MemoryStore,
	};

	const PROFILE_BODY: &str = r#"{"id":"abc","firstName":"Ada","lastName":"Lovelace"}"#;

	type User = String;

	fn strategy(
		config: LinkedInConfig,
		http: Arc<ScriptedHttpClient>,
		store: Arc<MemoryStore>,
	) -> LinkedInStrategy<User, ScriptedHttpClient> {
		LinkedInStrategy::new(config, store, http, |_: TokenPair, profile: Profile| async move {
			Ok::<_, BoxError>(Some(profile.display_name))
		})
		.expect("Strategy fixture should build.")
	}

	fn config() -> LinkedInConfig {
		LinkedInConfig::new("ABC123", "secret")
			.with_callback_url("https://www.example.net/auth/linkedin/callback")
	}

	async fn seeded_store() -> Arc<MemoryStore> {
		let store = Arc::new(MemoryStore::default());

		store
			.save(
				crate::store::StoreKey::new(linkedin::SESSION_KEY, "req-token"),
				crate::store::RequestTokenRecord::new(TokenPair::new("req-token", "req-secret")),
			)
			.await
			.expect("Seeding the store should succeed.");

		store
	}

	fn callback_request() -> AuthRequest {
		AuthRequest::default()
			.with_query("oauth_token", "req-token")
			.with_query("oauth_verifier", "v")
	}

	#[test]
	fn construction_requires_credentials_and_exposes_name() {
		let http = Arc::new(ScriptedHttpClient::default());
		let store = Arc::new(MemoryStore::default());
		let err = LinkedInStrategy::<User, ScriptedHttpClient>::new(
			LinkedInConfig::new("", "secret"),
			store.clone(),
			http.clone(),
			|_: TokenPair, _: Profile| async { Ok::<_, BoxError>(None) },
		)
		.expect_err("Empty consumer key should be rejected.");

		assert!(matches!(err, ConfigError::MissingConsumerKey));

		let strategy = strategy(config(), http, store);

		assert_eq!(strategy.name(), "linkedin");
		assert_eq!(
			strategy.profile_url().as_str(),
			"https://api.linkedin.com/v1/people/~:(id,first-name,last-name)?format=json"
		);
	}

	#[test]
	fn scope_params_join_lists_with_plus() {
		let hooks = LinkedInProviderStrategy;

		assert!(hooks.request_token_params(&AuthOptions::default()).is_empty());
		assert_eq!(
			hooks.request_token_params(&AuthOptions::default().with_scope("r_basicprofile")),
			BTreeMap::from([("scope".to_owned(), "r_basicprofile".to_owned())])
		);
		assert_eq!(
			hooks.request_token_params(
				&AuthOptions::default()
					.with_scope(ScopeOption::from(["r_basicprofile", "r_emailaddress"]))
			),
			BTreeMap::from([("scope".to_owned(), "r_basicprofile+r_emailaddress".to_owned())])
		);
	}

	#[test]
	fn empty_scope_is_omitted() {
		let hooks = LinkedInProviderStrategy;
		let mut url = linkedin::REQUEST_TOKEN_URL.to_owned();
		let mut params = hooks.request_token_params(
			&AuthOptions::default().with_scope(ScopeOption::Many(Vec::new())),
		);

		assert!(params.is_empty());
		assert!(hooks.request_token_params(&AuthOptions::default().with_scope("")).is_empty());

		hooks.augment_request_token(&mut url, &mut params);

		assert_eq!(url, linkedin::REQUEST_TOKEN_URL);
	}

	#[test]
	fn scope_moves_onto_the_request_token_url() {
		let hooks = LinkedInProviderStrategy;
		let mut url = linkedin::REQUEST_TOKEN_URL.to_owned();
		let mut params = BTreeMap::from([
			("scope".to_owned(), "r_basicprofile+r_emailaddress".to_owned()),
			("oauth_callback".to_owned(), "oob".to_owned()),
		]);

		hooks.augment_request_token(&mut url, &mut params);

		assert_eq!(
			url,
			"https://api.linkedin.com/uas/oauth/requestToken?scope=r_basicprofile+r_emailaddress"
		);
		assert!(!params.contains_key("scope"));
		assert!(params.contains_key("oauth_callback"));

		let mut url = "https://api.example.com/request?mode=x".to_owned();
		let mut params = BTreeMap::from([("scope".to_owned(), "r_fullprofile".to_owned())]);

		hooks.augment_request_token(&mut url, &mut params);

		assert_eq!(url, "https://api.example.com/request?mode=x&scope=r_fullprofile");

		let mut url = linkedin::REQUEST_TOKEN_URL.to_owned();

		hooks.augment_request_token(&mut url, &mut BTreeMap::new());

		assert_eq!(url, linkedin::REQUEST_TOKEN_URL);
	}

	#[test]
	fn denial_requires_a_non_empty_problem() {
		let hooks = LinkedInProviderStrategy;
		let query = |value: &str| BTreeMap::from([("oauth_problem".to_owned(), value.to_owned())]);

		assert_eq!(hooks.denial_reason(&query("user_refused")).as_deref(), Some("user_refused"));
		assert_eq!(hooks.denial_reason(&query("")), None);
		assert_eq!(hooks.denial_reason(&BTreeMap::new()), None);
	}

	#[tokio::test]
	async fn denial_fails_without_network_or_store_access() {
		let http = Arc::new(ScriptedHttpClient::default());
		let store = seeded_store().await;
		let strategy = strategy(config(), http.clone(), store.clone());
		let request = callback_request().with_query("oauth_problem", "user_refused");
		let outcome = strategy.authenticate(&request, &AuthOptions::default()).await;

		assert!(matches!(
			outcome,
			AuthOutcome::Fail(FailReason::Denied { ref problem }) if problem == "user_refused"
		));
		assert!(http.requests().is_empty());
		assert_eq!(store.len(), 1);
	}

	#[tokio::test]
	async fn initiate_puts_scope_on_the_url_and_redirects() {
		let http = Arc::new(
			ScriptedHttpClient::default()
				.reply(200, "oauth_token=req-token&oauth_token_secret=req-secret"),
		);
		let store = Arc::new(MemoryStore::default());
		let strategy = strategy(config(), http.clone(), store.clone());
		let options = AuthOptions::default()
			.with_scope(ScopeOption::from(["r_basicprofile", "r_emailaddress"]));
		let outcome = strategy.authenticate(&AuthRequest::default(), &options).await;
		let AuthOutcome::Redirect(url) = outcome else {
			panic!("Initial request should redirect.");
		};

		assert_eq!(
			url.as_str(),
			"https://www.linkedin.com/uas/oauth/authenticate?oauth_token=req-token"
		);

		let requests = http.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, HttpMethod::Post);
		assert_eq!(
			requests[0].url.as_str(),
			"https://api.linkedin.com/uas/oauth/requestToken?scope=r_basicprofile+r_emailaddress"
		);
		assert!(requests[0].form.is_empty());
		assert!(requests[0].authorization.contains(
			"oauth_callback=\"https%3A%2F%2Fwww.example.net%2Fauth%2Flinkedin%2Fcallback\""
		));
		assert_eq!(store.len(), 1);
	}

	#[tokio::test]
	async fn callback_fetches_profile_and_verifies() {
		let http = Arc::new(
			ScriptedHttpClient::default()
				.reply(200, "oauth_token=acc-token&oauth_token_secret=acc-secret")
				.reply(200, PROFILE_BODY),
		);
		let store = seeded_store().await;
		let config = config().with_profile_fields(["id", "name", "emails"]);
		let strategy = strategy(config, http.clone(), store.clone());
		let outcome = strategy.authenticate(&callback_request(), &AuthOptions::default()).await;

		assert!(matches!(outcome, AuthOutcome::Success(ref user) if user == "Ada Lovelace"));
		assert!(store.is_empty());

		let requests = http.requests();

		assert_eq!(requests.len(), 2);
		assert_eq!(requests[0].url.as_str(), linkedin::ACCESS_TOKEN_URL);
		assert!(requests[0].authorization.contains("oauth_token=\"req-token\""));
		assert!(requests[0].authorization.contains("oauth_verifier=\"v\""));
		assert_eq!(requests[1].method, HttpMethod::Get);
		assert_eq!(
			requests[1].url.as_str(),
			concat!(
				"https://api.linkedin.com/v1/people/~",
				":(id,first-name,last-name,email-address)?format=json"
			)
		);
		assert!(requests[1].authorization.contains("oauth_token=\"acc-token\""));
	}

	#[tokio::test]
	async fn verifier_can_reject_or_fail() {
		let http = Arc::new(
			ScriptedHttpClient::default()
				.reply(200, "oauth_token=acc-token&oauth_token_secret=acc-secret")
				.reply(200, PROFILE_BODY),
		);
		let rejecting = LinkedInStrategy::<User, ScriptedHttpClient>::new(
			config(),
			seeded_store().await,
			http,
			|_: TokenPair, _: Profile| async { Ok::<_, BoxError>(None) },
		)
		.expect("Strategy fixture should build.");
		let outcome = rejecting.authenticate(&callback_request(), &AuthOptions::default()).await;

		assert!(matches!(outcome, AuthOutcome::Fail(FailReason::Rejected)));

		let http = Arc::new(
			ScriptedHttpClient::default()
				.reply(200, "oauth_token=acc-token&oauth_token_secret=acc-secret")
				.reply(200, PROFILE_BODY),
		);
		let failing = LinkedInStrategy::<User, ScriptedHttpClient>::new(
			config(),
			seeded_store().await,
			http,
			|_: TokenPair, _: Profile| async { Err::<Option<User>, BoxError>("db offline".into()) },
		)
		.expect("Strategy fixture should build.");
		let outcome = failing.authenticate(&callback_request(), &AuthOptions::default()).await;
		let AuthOutcome::Error(Error::Verify { source }) = outcome else {
			panic!("Verifier failure should surface as an error.");
		};

		assert_eq!(source.to_string(), "db offline");
	}

	#[tokio::test]
	async fn profile_transport_failure_skips_the_verifier() {
		let http = Arc::new(
			ScriptedHttpClient::default()
				.reply(200, "oauth_token=acc-token&oauth_token_secret=acc-secret")
				.fail(TransportError::Status { status: 503, body: "unavailable".into() }),
		);
		let called = Arc::new(Mutex::new(false));
		let flag = called.clone();
		let strategy = LinkedInStrategy::<User, ScriptedHttpClient>::new(
			config(),
			seeded_store().await,
			http,
			move |_: TokenPair, _: Profile| {
				*flag.lock() = true;

				async { Ok::<_, BoxError>(Some(User::new())) }
			},
		)
		.expect("Strategy fixture should build.");
		let outcome = strategy.authenticate(&callback_request(), &AuthOptions::default()).await;
		let AuthOutcome::Error(err) = outcome else {
			panic!("Profile failure should surface as an error.");
		};

		assert!(err.is_internal_oauth());
		assert_eq!(err.to_string(), "Failed to fetch user profile.");
		assert!(!*called.lock());
	}

	#[tokio::test]
	async fn malformed_profile_is_a_parse_error() {
		let http = Arc::new(ScriptedHttpClient::default().reply(200, "<html>oops</html>"));
		let strategy = strategy(config(), http, Arc::new(MemoryStore::default()));
		let err = strategy
			.fetch_profile(&TokenPair::new("acc-token", "acc-secret"))
			.await
			.expect_err("Non-JSON profile should fail.");

		let Error::ProfileParse(err) = err else {
			panic!("Non-JSON profile should be a parse error.");
		};

		assert!(matches!(err, ProfileParseError::Json { .. }));
		assert_eq!(err.raw(), "<html>oops</html>");
	}

	#[tokio::test]
	async fn callback_for_unknown_token_is_an_error() {
		let http = Arc::new(ScriptedHttpClient::default());
		let strategy = strategy(config(), http.clone(), Arc::new(MemoryStore::default()));
		let outcome = strategy.authenticate(&callback_request(), &AuthOptions::default()).await;

		assert!(matches!(
			outcome,
			AuthOutcome::Error(Error::Session(SessionError::MissingRequestToken { .. }))
		));
		assert!(http.requests().is_empty());
	}
}
