//! Signed-in user and tokens as the dashboard sees them.
//!
//! The store is told about refreshed tokens through [`TokenObserver`], so it
//! never reads the client's credentials directly.

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::crm::model::{AuthResponse, AuthUser};

use super::{Credentials, TokenObserver};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub user: AuthUser,
    pub credentials: Credentials,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<StoredSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, auth: &AuthResponse) {
        debug!(message = "Signed in", user_id = %auth.user.id);
        *self.write() = Some(StoredSession {
            user: auth.user.clone(),
            credentials: Credentials {
                access_token: Some(auth.access_token.clone()),
                refresh_token: Some(auth.refresh_token.clone()),
            },
        });
    }

    pub fn sign_out(&self) {
        *self.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.read().as_ref().map(|session| session.user.clone())
    }

    pub fn current(&self) -> Option<StoredSession> {
        self.read().clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<StoredSession>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<StoredSession>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenObserver for SessionStore {
    fn tokens_refreshed(&self, access_token: &str, refresh_token: &str) {
        if let Some(session) = self.write().as_mut() {
            session.credentials.access_token = Some(access_token.to_owned());
            if !refresh_token.is_empty() {
                session.credentials.refresh_token = Some(refresh_token.to_owned());
            }
        }
    }
}
