//! Optional observability helpers for the OAuth 1.0a exchange.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `linkedin_oauth1.flow` with the `flow`
//!   (exchange phase) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `linkedin_oauth1_flow_total` counter for every
//!   attempt/success/failure/denial, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Exchange phases observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Request-token acquisition and user-authorization redirect.
	Initiate,
	/// Callback handling and access-token exchange.
	Callback,
	/// Signed profile fetch and normalization.
	Profile,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Initiate => "initiate",
			FlowKind::Callback => "callback",
			FlowKind::Profile => "profile",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an exchange phase.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// The user refused authorization at the provider.
	Denied,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
			FlowOutcome::Denied => "denied",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
