//! OAuth 1.0a transport client: request-token, access-token, and signed resource calls.

pub mod signature;

pub use signature::SignatureMethod;

// self
use crate::{
	_prelude::*,
	auth::{TokenPair, TokenSecret},
	error::{ConfigError, TransportError},
	http::{HttpMethod, HttpRequest, HttpResponse, OAuth1HttpClient},
	provider::ProviderStrategy,
};

const OAUTH_VERSION: &str = "1.0";
const OAUTH_CALLBACK: &str = "oauth_callback";

/// Token endpoint response: the issued pair plus any additional provider parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
	/// Issued token pair.
	pub pair: TokenPair,
	/// Remaining response parameters (e.g. `oauth_callback_confirmed`, `oauth_expires_in`).
	pub params: BTreeMap<String, String>,
}
impl TokenResponse {
	/// Parses an `application/x-www-form-urlencoded` token endpoint body.
	pub fn parse(body: &str) -> Result<Self, TransportError> {
		let mut params = url::form_urlencoded::parse(body.as_bytes())
			.into_owned()
			.collect::<BTreeMap<String, String>>();
		let token = params.remove("oauth_token").ok_or_else(|| {
			TransportError::MalformedTokenResponse { field: "oauth_token", body: body.to_owned() }
		})?;
		let secret = params.remove("oauth_token_secret").ok_or_else(|| {
			TransportError::MalformedTokenResponse {
				field: "oauth_token_secret",
				body: body.to_owned(),
			}
		})?;

		Ok(Self { pair: TokenPair::new(token, secret), params })
	}
}

/// Signs and dispatches OAuth 1.0a requests on behalf of a consumer.
///
/// The client is provider-neutral. Provider quirks reach it only through
/// [`ProviderStrategy::augment_request_token`], which the client itself invokes while
/// preparing the request-token call.
pub struct OAuth1Client<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	consumer_key: String,
	consumer_secret: TokenSecret,
	signature_method: SignatureMethod,
	http_client: Arc<C>,
}
impl<C> OAuth1Client<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	/// Creates a client for the given consumer credentials.
	///
	/// Fails when either credential is empty.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		let consumer_key = consumer_key.into();
		let consumer_secret = consumer_secret.into();

		if consumer_key.is_empty() {
			return Err(ConfigError::MissingConsumerKey);
		}
		if consumer_secret.is_empty() {
			return Err(ConfigError::MissingConsumerSecret);
		}

		Ok(Self {
			consumer_key,
			consumer_secret: TokenSecret::new(consumer_secret),
			signature_method: SignatureMethod::default(),
			http_client: http_client.into(),
		})
	}

	/// Overrides the signature method (defaults to HMAC-SHA1).
	pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
		self.signature_method = method;

		self
	}

	/// Consumer key sent as `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Obtains a request-token pair.
	///
	/// `params` may carry `oauth_callback` (moved into the protocol parameters) and any
	/// provider extras (sent in the signed form body). The strategy may rewrite the URL and
	/// the extras before anything is signed.
	pub async fn request_token(
		&self,
		strategy: &dyn ProviderStrategy,
		url: &Url,
		mut params: BTreeMap<String, String>,
	) -> Result<TokenResponse, TransportError> {
		let mut url = url.to_string();

		strategy.augment_request_token(&mut url, &mut params);

		let url = Url::parse(&url)?;
		let mut protocol = Vec::new();

		if let Some(callback) = params.remove(OAUTH_CALLBACK) {
			protocol.push((OAUTH_CALLBACK.to_owned(), callback));
		}

		let request =
			self.prepare(HttpMethod::Post, url, None, protocol, params.into_iter().collect());
		let body = self.http_client.execute(request).await?.into_success_body()?;

		TokenResponse::parse(&body)
	}

	/// Exchanges an authorized request-token pair for an access-token pair.
	pub async fn access_token(
		&self,
		url: &Url,
		request_pair: &TokenPair,
		verifier: Option<&str>,
	) -> Result<TokenResponse, TransportError> {
		let protocol = verifier
			.map(|verifier| vec![("oauth_verifier".to_owned(), verifier.to_owned())])
			.unwrap_or_default();
		let request =
			self.prepare(HttpMethod::Post, url.clone(), Some(request_pair), protocol, Vec::new());
		let body = self.http_client.execute(request).await?.into_success_body()?;

		TokenResponse::parse(&body)
	}

	/// Issues a signed GET and returns the raw response.
	pub async fn get(&self, url: &Url, access: &TokenPair) -> Result<HttpResponse, TransportError> {
		let request =
			self.prepare(HttpMethod::Get, url.clone(), Some(access), Vec::new(), Vec::new());

		self.http_client.execute(request).await
	}

	/// Issues a signed form POST and returns the raw response.
	pub async fn post(
		&self,
		url: &Url,
		access: &TokenPair,
		form: Vec<(String, String)>,
	) -> Result<HttpResponse, TransportError> {
		let request = self.prepare(HttpMethod::Post, url.clone(), Some(access), Vec::new(), form);

		self.http_client.execute(request).await
	}

	fn prepare(
		&self,
		method: HttpMethod,
		url: Url,
		token: Option<&TokenPair>,
		extra_protocol: Vec<(String, String)>,
		form: Vec<(String, String)>,
	) -> HttpRequest {
		let mut oauth_params = BTreeMap::from([
			("oauth_consumer_key".to_owned(), self.consumer_key.clone()),
			("oauth_nonce".to_owned(), signature::nonce()),
			("oauth_signature_method".to_owned(), self.signature_method.as_str().to_owned()),
			("oauth_timestamp".to_owned(), signature::timestamp()),
			("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
		]);

		if let Some(pair) = token {
			oauth_params.insert("oauth_token".into(), pair.token.clone());
		}

		oauth_params.extend(extra_protocol);

		let signed = oauth_params
			.iter()
			.map(|(key, value)| (key.clone(), value.clone()))
			.chain(form.iter().cloned())
			.collect::<Vec<_>>();
		let base = signature::base_string(method, &url, &signed);
		let token_secret = token.map(|pair| pair.secret.expose()).unwrap_or_default();
		let oauth_signature =
			self.signature_method.sign(&base, self.consumer_secret.expose(), token_secret);

		oauth_params.insert("oauth_signature".into(), oauth_signature);

		HttpRequest {
			method,
			url,
			authorization: signature::authorization_header(&oauth_params),
			form,
		}
	}
}
impl<C> Debug for OAuth1Client<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth1Client")
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret", &self.consumer_secret)
			.field("signature_method", &self.signature_method)
			.finish()
	}
}
