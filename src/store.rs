//! Storage contracts for request-token pairs held between the redirect and the callback.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::TokenPair};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend for request-token pairs awaiting the provider callback.
///
/// Hosts typically back this with their own session layer. Entries are single use: the
/// exchange calls [`take`](SessionStore::take) on callback, which must remove the pair.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Persists a request-token pair under `key`, replacing any existing entry.
	fn save(&self, key: StoreKey, record: RequestTokenRecord) -> StoreFuture<'_, ()>;

	/// Removes and returns the pair stored under `key`, if present.
	fn take<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, Option<RequestTokenRecord>>;
}

/// Request-token pair plus the instant it was issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTokenRecord {
	/// Request-token pair returned by the provider.
	pub pair: TokenPair,
	/// Instant the pair was obtained.
	pub issued_at: OffsetDateTime,
}
impl RequestTokenRecord {
	/// Stamps a freshly issued pair with the current time.
	pub fn new(pair: TokenPair) -> Self {
		Self { pair, issued_at: OffsetDateTime::now_utc() }
	}
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Unique key identifying a pending request token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreKey {
	/// Session key configured on the strategy (e.g. `oauth:linkedin`).
	pub session_key: String,
	/// Request token the provider will echo back as `oauth_token`.
	pub token: String,
}
impl StoreKey {
	/// Builds a key for the provided session key and request token.
	pub fn new(session_key: impl Into<String>, token: impl Into<String>) -> Self {
		Self { session_key: session_key.into(), token: token.into() }
	}
}
