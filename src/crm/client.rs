//! Authenticated request client.
//!
//! Attaches the stored bearer token to every request and, when the backend
//! rejects it, refreshes once and replays the request.

use std::sync::Arc;

use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{
    auth::{refresh::RefreshEndpoint, session::Session, Refresher, TokenObserver},
    error::Error,
    origin::{self, OriginSource},
    utils::{error_from_response, is_auth_endpoint},
};

/// A request as the caller describes it. Kept intact so it can be replayed
/// after a refresh.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
    pub headers: HeaderMap,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_vec(body).map_err(Error::Encode)?);
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Retry protocol. A request starts `Initial`; after a successful refresh it
/// is replayed as `Retried`, which has no further transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Retried,
}

impl Attempt {
    fn after_refresh(self) -> Option<Self> {
        match self {
            Self::Initial => Some(Self::Retried),
            Self::Retried => None,
        }
    }
}

pub struct ApiClient<R = RefreshEndpoint> {
    http: reqwest::Client,
    origin: Arc<dyn OriginSource>,
    session: Arc<Session>,
    refresher: R,
}

impl ApiClient<RefreshEndpoint> {
    pub fn new(http: reqwest::Client, origin: impl OriginSource + 'static) -> Self {
        let origin: Arc<dyn OriginSource> = Arc::new(origin);
        let refresher = RefreshEndpoint {
            client: http.clone(),
            origin: Arc::clone(&origin),
        };
        Self {
            http,
            origin,
            session: Arc::new(Session::default()),
            refresher,
        }
    }
}

impl<R> ApiClient<R>
where
    R: Refresher,
{
    pub fn with_refresher<T: Refresher>(self, refresher: T) -> ApiClient<T> {
        ApiClient {
            http: self.http,
            origin: self.origin,
            session: self.session,
            refresher,
        }
    }

    pub fn with_session(mut self, session: Arc<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn set_token(&self, token: Option<String>) {
        self.session.set_token(token);
    }

    pub fn set_refresh_token(&self, token: Option<String>) {
        self.session.set_refresh_token(token);
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.session.refresh_token()
    }

    /// Register the single observer told about refreshed tokens. Replaces
    /// any previous one; `None` removes it.
    pub fn set_token_observer(&self, observer: Option<Arc<dyn TokenObserver>>) {
        self.session.set_observer(observer);
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.send(&Request::get(path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(&Request::post(path).json(body)?).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.send(&Request::post(path)).await
    }

    pub async fn send<T: DeserializeOwned>(&self, request: &Request) -> Result<T, Error> {
        let mut attempt = Attempt::Initial;

        loop {
            let snapshot = self.session.snapshot();
            let req = self.build_request(request, snapshot.access_token.as_deref())?;

            debug!(
                message = "Dispatching request",
                method = %request.method,
                path = %request.path,
                ?attempt,
                authenticated = snapshot.access_token.is_some(),
            );

            let res = self.http.execute(req).await?;
            let status = res.status();

            if status.is_success() {
                return Self::parse_json(res).await;
            }

            if status == StatusCode::UNAUTHORIZED && !is_auth_endpoint(&request.path) {
                if let Some(next) = attempt.after_refresh() {
                    if !self.session.refresh(&self.refresher, snapshot.epoch).await {
                        return Err(Error::session_expired());
                    }
                    attempt = next;
                    continue;
                }
            }

            return Err(error_from_response(res).await);
        }
    }

    fn build_request(
        &self,
        request: &Request,
        auth_token: Option<&str>,
    ) -> Result<reqwest::Request, Error> {
        let url = format!("{}{}", origin::resolve(self.origin.as_ref()), request.path);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in &request.headers {
            headers.insert(name.clone(), value.clone());
        }
        if auth_token.is_some() {
            headers.remove(header::AUTHORIZATION);
        }

        let builder = self
            .http
            .request(request.method.clone(), url)
            .headers(headers);

        let builder = match auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let builder = match &request.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        };

        builder.build().map_err(Error::Reqwest)
    }

    async fn parse_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, Error> {
        if res.status() == StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Object(Default::default()))
                .map_err(Error::Decode);
        }
        let bytes = res.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Error::Decode)
    }
}
