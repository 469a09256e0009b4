use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{Credentials, RefreshedTokens, Refresher, TokenObserver};

/// Credential pair plus the coordination state for refreshing it.
///
/// Every settled refresh advances `epoch`. Requests remember the epoch they
/// were built under; a caller whose epoch is behind by the time it reaches
/// the gate reuses the outcome of the refresh that already ran, as long as
/// the credentials have not been replaced since.
pub struct Session {
    state: RwLock<State>,
    observer: RwLock<Option<Arc<dyn TokenObserver>>>,
    refresh_gate: Mutex<Settled>,
}

/// Last settled refresh and the refresh token held once it settled.
#[derive(Debug, Default)]
struct Settled {
    succeeded: bool,
    refresh_token: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    credentials: Credentials,
    epoch: u64,
}

/// What a request needs to know about the session when it is built.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub access_token: Option<String>,
    pub epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            state: RwLock::new(State {
                credentials,
                epoch: 0,
            }),
            observer: RwLock::new(None),
            refresh_gate: Mutex::new(Settled::default()),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        self.write(|state| state.credentials.access_token = token);
    }

    pub fn set_refresh_token(&self, token: Option<String>) {
        self.write(|state| state.credentials.refresh_token = token);
    }

    pub fn token(&self) -> Option<String> {
        self.read(|state| state.credentials.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(|state| state.credentials.refresh_token.clone())
    }

    pub fn credentials(&self) -> Credentials {
        self.read(|state| state.credentials.clone())
    }

    pub fn set_observer(&self, observer: Option<Arc<dyn TokenObserver>>) {
        *self.observer.write().unwrap_or_else(PoisonError::into_inner) = observer;
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read(|state| Snapshot {
            access_token: state.credentials.access_token.clone(),
            epoch: state.epoch,
        })
    }

    /// Refresh the access token unless a refresh already settled since
    /// `seen_epoch` for the refresh token still held. Concurrent callers queue on the gate and share one
    /// network call. Returns whether a usable token is now stored.
    pub async fn refresh<R>(&self, refresher: &R, seen_epoch: u64) -> bool
    where
        R: Refresher + ?Sized,
    {
        let mut settled = self.refresh_gate.lock().await;

        let (epoch, held) =
            self.read(|state| (state.epoch, state.credentials.refresh_token.clone()));
        if epoch != seen_epoch && held == settled.refresh_token {
            debug!(
                message = "Refresh already settled, reusing its outcome",
                succeeded = settled.succeeded
            );
            return settled.succeeded;
        }

        let refresh_token = match held {
            Some(token) => token,
            None => {
                debug!(message = "No refresh token held, cannot refresh");
                return false;
            }
        };

        info!(message = "Access token rejected, refreshing");

        let outcome = match refresher.refresh(&refresh_token).await {
            Ok(tokens) => {
                self.accept(tokens);
                true
            }
            Err(err) => {
                warn!(message = "Token refresh failed", error = %err);
                self.write(|state| state.epoch += 1);
                false
            }
        };

        *settled = Settled {
            succeeded: outcome,
            refresh_token: self.refresh_token(),
        };
        outcome
    }

    fn accept(&self, tokens: RefreshedTokens) {
        let RefreshedTokens {
            access_token,
            refresh_token,
        } = tokens;

        let refresh_token = self.write(|state| {
            state.credentials.access_token = Some(access_token.clone());
            if let Some(rotated) = refresh_token {
                state.credentials.refresh_token = Some(rotated);
            }
            state.epoch += 1;
            state.credentials.refresh_token.clone().unwrap_or_default()
        });

        info!(message = "Got new access token");

        let observer = self
            .observer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(observer) = observer {
            observer.tokens_refreshed(&access_token, &refresh_token);
        }
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        f(&mut self.state.write().unwrap_or_else(PoisonError::into_inner))
    }
}
