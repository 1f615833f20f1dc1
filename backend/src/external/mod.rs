//! External service integrations

pub mod automation;
pub mod identity;

pub use automation::AutomationClient;
pub use identity::{RemoteTokenVerifier, TokenVerifier, VerifiedIdentity};
