//! Bearer token supply.
//!
//! Authentication lives with the external identity provider; the client only
//! needs something that can hand over the current session token. Callers
//! inject a `TokenProvider` so the API client never knows where tokens come
//! from (a config file for the CLI, a session accessor elsewhere).

use std::fmt;

/// Supplies the current bearer token, or `None` when no session is active.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

impl fmt::Debug for dyn TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenProvider")
    }
}

/// A fixed token, typically read from configuration.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// No session. Every authenticated call fails before hitting the network.
#[derive(Debug, Clone, Default)]
pub struct NoSession;

impl TokenProvider for NoSession {
    fn token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        let provider = StaticToken::new("abc123");
        assert_eq!(provider.token().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_no_session() {
        assert!(NoSession.token().is_none());
    }
}
