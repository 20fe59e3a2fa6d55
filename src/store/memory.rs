//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{RequestTokenRecord, SessionStore, StoreError, StoreFuture, StoreKey},
};

type StoreMap = Arc<RwLock<HashMap<StoreKey, RequestTokenRecord>>>;

/// Thread-safe storage backend that keeps pending request tokens in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of pending request tokens.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no request tokens are pending.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn save_now(
		map: StoreMap,
		key: StoreKey,
		record: RequestTokenRecord,
	) -> Result<(), StoreError> {
		map.write().insert(key, record);

		Ok(())
	}

	fn take_now(map: StoreMap, key: StoreKey) -> Option<RequestTokenRecord> {
		map.write().remove(&key)
	}
}
impl SessionStore for MemoryStore {
	fn save(&self, key: StoreKey, record: RequestTokenRecord) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::save_now(map, key, record) })
	}

	fn take<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, Option<RequestTokenRecord>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::take_now(map, key)) })
	}
}
