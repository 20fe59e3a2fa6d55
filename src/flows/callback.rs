//! Callback phase: restore the parked request token and exchange it for an access token.

// self
use crate::{
	_prelude::*,
	error::SessionError,
	flows::{AuthRequest, OAuth1Exchange},
	http::OAuth1HttpClient,
	oauth::TokenResponse,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::StoreKey,
};

impl<C> OAuth1Exchange<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	/// Completes the exchange for a provider callback carrying `oauth_token`.
	///
	/// The stored request-token pair is consumed whether or not the access-token call
	/// succeeds, so a callback URL cannot be replayed.
	pub async fn handle_callback(&self, request: &AuthRequest) -> Result<TokenResponse> {
		const KIND: FlowKind = FlowKind::Callback;

		let span = FlowSpan::new(KIND, "handle_callback");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token =
					request.query_param("oauth_token").ok_or(SessionError::MissingCallbackToken)?;
				let key = StoreKey::new(&self.session_key, token);
				let record = self.store.take(&key).await?.ok_or_else(|| {
					SessionError::MissingRequestToken {
						session_key: self.session_key.clone(),
						token: token.to_owned(),
					}
				})?;

				self.client
					.access_token(
						&self.descriptor.endpoints.access_token,
						&record.pair,
						request.query_param("oauth_verifier"),
					)
					.await
					.map_err(|e| Error::internal_oauth("Failed to obtain access token.", e))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
