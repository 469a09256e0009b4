//! Authorization logic.

pub mod refresh;
pub mod session;
pub mod store;

use std::fmt;

#[async_trait::async_trait]
pub trait Refresher: Send + Sync {
    type Error: fmt::Display + Send + Sync;

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, Self::Error>;
}

/// Notified after every successful token refresh.
pub trait TokenObserver: Send + Sync {
    fn tokens_refreshed(&self, access_token: &str, refresh_token: &str);
}

impl<F> TokenObserver for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn tokens_refreshed(&self, access_token: &str, refresh_token: &str) {
        self(access_token, refresh_token)
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Outcome of a successful refresh. A missing refresh token means the
/// server did not rotate it.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for RefreshedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshedTokens")
            .field("rotated", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}
