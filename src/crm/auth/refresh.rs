//! Exchange a refresh token for a new access token.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::crm::{
    origin::{self, OriginSource},
    utils::{check_status, ServerError},
};

use super::RefreshedTokens;

pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("server: {0}")]
    Server(#[from] ServerError),
}

pub struct RefreshEndpoint {
    pub client: reqwest::Client,
    pub origin: Arc<dyn OriginSource>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    /// Present only when the server rotates the refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the new access token (in seconds).
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl From<RefreshResponse> for RefreshedTokens {
    fn from(res: RefreshResponse) -> Self {
        let RefreshResponse {
            access_token,
            refresh_token,
            ..
        } = res;
        Self {
            access_token,
            refresh_token: refresh_token.filter(|token| !token.is_empty()),
        }
    }
}

impl RefreshEndpoint {
    pub async fn perform(&self, refresh_token: &str) -> Result<RefreshResponse, Error> {
        let url = format!("{}{}", origin::resolve(self.origin.as_ref()), REFRESH_PATH);

        let res = self
            .client
            .post(url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        check_status(&res)?;
        let refresh_response = res.json().await?;
        Ok(refresh_response)
    }
}

#[async_trait::async_trait]
impl super::Refresher for RefreshEndpoint {
    type Error = Error;

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, Self::Error> {
        let refresh_response = self.perform(refresh_token).await?;
        Ok(refresh_response.into())
    }
}
