//! Transport primitives for signed OAuth 1.0a requests.
//!
//! The module exposes [`OAuth1HttpClient`], the crate's only dependency on an HTTP stack,
//! together with the transport-neutral [`HttpRequest`] and [`HttpResponse`] values the
//! signing layer produces and consumes. Requests arrive fully prepared: the
//! `Authorization` header already carries the signature and the form body is already
//! encoded, so implementations only have to put bytes on the wire.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`OAuth1HttpClient::execute`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing signed OAuth 1.0a requests.
///
/// Implementations must be `Send + Sync + 'static` so a single client can be shared by
/// every in-flight authentication attempt. Non-success statuses are not errors at this
/// layer; return them as an [`HttpResponse`] and let the caller classify them.
pub trait OAuth1HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the provider's response.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// HTTP methods used by the OAuth 1.0a exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// Profile and resource reads.
	Get,
	/// Token endpoint calls.
	Post,
}
impl HttpMethod {
	/// Returns the uppercase method name used in signature base strings.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Signed request ready for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute request URL, including any query string.
	pub url: Url,
	/// Value of the `Authorization` header (`OAuth ...`).
	pub authorization: String,
	/// Form parameters sent as an `application/x-www-form-urlencoded` body.
	pub form: Vec<(String, String)>,
}
impl HttpRequest {
	/// Encodes [`form`](Self::form) into a request body, or `None` when it is empty.
	pub fn form_body(&self) -> Option<String> {
		if self.form.is_empty() {
			return None;
		}

		let body = self
			.form
			.iter()
			.map(|(key, value)| {
				format!(
					"{}={}",
					crate::oauth::signature::percent_encode(key),
					crate::oauth::signature::percent_encode(value)
				)
			})
			.collect::<Vec<_>>()
			.join("&");

		Some(body)
	}
}

/// Response returned by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl HttpResponse {
	/// Builds a response from its parts.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Converts non-2xx responses into [`TransportError::Status`] and yields the body otherwise.
	pub fn into_success_body(self) -> Result<String, TransportError> {
		if self.is_success() {
			Ok(self.body)
		} else {
			Err(TransportError::Status { status: self.status, body: self.body })
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl OAuth1HttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let body = request.form_body();
			let mut builder = match request.method {
				HttpMethod::Get => client.get(request.url),
				HttpMethod::Post => client.post(request.url),
			}
			.header(AUTHORIZATION, request.authorization);

			if let Some(body) = body {
				builder =
					builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded").body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(HttpResponse { status, body })
		})
	}
}
