pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please try again or re-login.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The access token was rejected and could not be refreshed.
    #[error("{message}")]
    Auth { message: String },
    #[error("{message}")]
    Http { message: String, status: u16 },
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("decode: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("encode: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    pub fn session_expired() -> Self {
        Self::Auth {
            message: SESSION_EXPIRED_MESSAGE.to_owned(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { .. } => Some(401),
            Self::Http { status, .. } => Some(*status),
            Self::Reqwest(err) => err.status().map(|status| status.as_u16()),
            Self::Decode(_) | Self::Encode(_) => None,
        }
    }

    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Auth { .. } => true,
            Self::Http { status, .. } => *status == 401,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let expired = Error::session_expired();
        assert!(expired.is_auth_error());
        assert_eq!(expired.status(), Some(401));
        assert_eq!(expired.to_string(), SESSION_EXPIRED_MESSAGE);

        let unauthorized = Error::Http {
            message: "Invalid credentials".into(),
            status: 401,
        };
        assert!(unauthorized.is_auth_error());

        let boom = Error::Http {
            message: "boom".into(),
            status: 500,
        };
        assert!(!boom.is_auth_error());
        assert_eq!(boom.status(), Some(500));
        assert_eq!(boom.to_string(), "boom");
    }
}
