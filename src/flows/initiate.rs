//! Request-token phase: obtain a request token, park it, and build the authorize redirect.

// self
use crate::{
	_prelude::*,
	flows::{AuthOptions, AuthRequest, OAuth1Exchange, common},
	http::OAuth1HttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::{RequestTokenRecord, StoreKey},
};

impl<C> OAuth1Exchange<C>
where
	C: ?Sized + OAuth1HttpClient,
{
	/// Obtains a request token and returns the user-authorization URL to redirect to.
	///
	/// The strategy contributes extra request-token parameters and may rewrite the
	/// request-token URL. The issued pair is saved under the session key so the callback
	/// can finish the exchange.
	pub async fn initiate(&self, request: &AuthRequest, options: &AuthOptions) -> Result<Url> {
		const KIND: FlowKind = FlowKind::Initiate;

		let span = FlowSpan::new(KIND, "initiate");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let callback = common::resolve_callback(
					options.callback_url.as_deref().or(self.callback_url.as_deref()),
					request.origin.as_ref(),
				)?;
				let mut params = self.strategy.request_token_params(options);

				params.insert("oauth_callback".into(), callback);

				let response = self
					.client
					.request_token(
						self.strategy.as_ref(),
						&self.descriptor.endpoints.request_token,
						params,
					)
					.await
					.map_err(|e| Error::internal_oauth("Failed to obtain request token.", e))?;
				let authorize_url = self.descriptor.authorize_url(&response.pair.token);
				let key = StoreKey::new(&self.session_key, &response.pair.token);

				self.store.save(key, RequestTokenRecord::new(response.pair)).await?;

				Ok(authorize_url)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
