//! Requested authorization scope as supplied by the host.

// self
use crate::_prelude::*;

/// Scope option accepted per authentication attempt: one scope string or a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeOption {
	/// A single, already formatted scope value.
	One(String),
	/// Several scopes the provider expects joined by its delimiter.
	Many(Vec<String>),
}
impl ScopeOption {
	/// Formats the option into a single parameter value.
	///
	/// A single scope passes through unchanged; a list is joined with `delimiter`.
	pub fn join(&self, delimiter: &str) -> String {
		match self {
			Self::One(scope) => scope.clone(),
			Self::Many(scopes) => scopes.join(delimiter),
		}
	}
}
impl From<&str> for ScopeOption {
	fn from(value: &str) -> Self {
		Self::One(value.to_owned())
	}
}
impl From<String> for ScopeOption {
	fn from(value: String) -> Self {
		Self::One(value)
	}
}
impl<S> From<Vec<S>> for ScopeOption
where
	S: Into<String>,
{
	fn from(value: Vec<S>) -> Self {
		Self::Many(value.into_iter().map(Into::into).collect())
	}
}
impl<S, const N: usize> From<[S; N]> for ScopeOption
where
	S: Into<String>,
{
	fn from(value: [S; N]) -> Self {
		Self::Many(value.into_iter().map(Into::into).collect())
	}
}
