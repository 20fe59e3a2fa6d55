//! Provider-facing descriptors (data) and strategies (behavior).
//!
//! `descriptor` exposes validated endpoint metadata (`ProviderDescriptor`) for the three
//! OAuth 1.0a endpoints. `strategy` defines [`ProviderStrategy`], the hook set the generic
//! exchange consults for denial detection, request-token parameters, and request-token URL
//! rewriting.

pub mod descriptor;
pub mod strategy;

pub use descriptor::*;
pub use strategy::*;
