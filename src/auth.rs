//! Credential models and scope options shared by the exchange.

pub mod scope;
pub mod token;

pub use scope::*;
pub use token::*;
