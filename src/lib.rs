//! LinkedIn sign-in over OAuth 1.0a: a reusable three-phase exchange, LinkedIn's scope and
//! denial quirks, field selectors, and profile normalization behind a pluggable transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod linkedin;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		error::TransportError,
		http::{HttpFuture, HttpRequest, HttpResponse, OAuth1HttpClient},
	};

	/// Transport that replays scripted replies in order and records every request it sees.
	///
	/// Once the script runs out every call fails with HTTP 599.
	#[derive(Debug, Default)]
	pub struct ScriptedHttpClient {
		replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
		requests: Mutex<Vec<HttpRequest>>,
	}
	impl ScriptedHttpClient {
		/// Queues a response.
		pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
			self.replies.lock().push_back(Ok(HttpResponse::new(status, body)));

			self
		}

		/// Queues a transport failure.
		pub fn fail(self, error: TransportError) -> Self {
			self.replies.lock().push_back(Err(error));

			self
		}

		/// Requests executed so far, in order.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}
	}
	impl OAuth1HttpClient for ScriptedHttpClient {
		fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
			self.requests.lock().push(request);

			let reply = self.replies.lock().pop_front().unwrap_or_else(|| {
				Err(TransportError::Status { status: 599, body: "No scripted reply left.".into() })
			});

			Box::pin(async move { reply })
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(any(test, feature = "test"))]
	pub use parking_lot::Mutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
