//! LinkedIn adapter: endpoint defaults, field selector mapping, profile normalization, and the
//! authentication orchestrator built on the generic OAuth 1.0a exchange.

pub mod config;
pub mod fields;
pub mod profile;
pub mod strategy;

pub use config::*;
pub use fields::*;
pub use profile::*;
pub use strategy::*;

/// Provider identifier stamped on every normalized profile.
pub const PROVIDER_ID: &str = "linkedin";
/// Default request-token endpoint.
pub const REQUEST_TOKEN_URL: &str = "https://api.linkedin.com/uas/oauth/requestToken";
/// Default access-token endpoint.
pub const ACCESS_TOKEN_URL: &str = "https://api.linkedin.com/uas/oauth/accessToken";
/// Default user-authorization endpoint.
pub const USER_AUTHORIZATION_URL: &str = "https://www.linkedin.com/uas/oauth/authenticate";
/// Base of the profile endpoint; the field selector and `?format=json` are appended.
pub const PROFILE_URL: &str = "https://api.linkedin.com/v1/people/~";
/// Default session key for pending request tokens.
pub const SESSION_KEY: &str = "oauth:linkedin";
/// Query parameter LinkedIn appends to the callback when the user refuses authorization.
pub const DENIAL_PARAM: &str = "oauth_problem";
