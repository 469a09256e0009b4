//! CRM backend client: auth, customers and transactions.

use std::sync::Arc;

use tracing::debug;

use self::{
    auth::Refresher,
    client::ApiClient,
    model::{
        AuthResponse, Customer, Empty, LoginRequest, PaginatedResponse, RegisterRequest,
        Transaction,
    },
    query::{with_query, CustomersListParams, TransactionsListParams},
};

pub mod auth;
pub mod client;
pub mod error;
pub mod model;
pub mod origin;
pub mod query;
mod utils;

pub use self::error::{Error, SESSION_EXPIRED_MESSAGE};

pub struct Crm<R = auth::refresh::RefreshEndpoint> {
    pub client: Arc<ApiClient<R>>,
}

impl<R> Crm<R>
where
    R: Refresher,
{
    pub fn new(client: Arc<ApiClient<R>>) -> Self {
        Self { client }
    }

    /// Log in and keep the returned token pair for later requests.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, Error> {
        let auth: AuthResponse = self.client.post("/auth/login", request).await?;
        self.store_tokens(&auth);
        Ok(auth)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, Error> {
        let auth: AuthResponse = self.client.post("/auth/register", request).await?;
        self.store_tokens(&auth);
        Ok(auth)
    }

    /// Tokens are dropped even when the backend call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        let res = self.client.post_empty::<Empty>("/auth/logout").await;
        self.client.set_token(None);
        self.client.set_refresh_token(None);
        res.map(|_| ())
    }

    pub async fn list_customers(
        &self,
        params: &CustomersListParams,
    ) -> Result<PaginatedResponse<Customer>, Error> {
        let path = with_query("/users", params).map_err(encode_error)?;
        self.client.get(&path).await
    }

    pub async fn customer(&self, id: &str) -> Result<Customer, Error> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn list_transactions(
        &self,
        params: &TransactionsListParams,
    ) -> Result<PaginatedResponse<Transaction>, Error> {
        let path = with_query("/transactions", params).map_err(encode_error)?;
        self.client.get(&path).await
    }

    pub async fn transaction(&self, id: &str) -> Result<Transaction, Error> {
        self.client.get(&format!("/transactions/{id}")).await
    }

    fn store_tokens(&self, auth: &AuthResponse) {
        debug!(message = "Storing tokens", user_id = %auth.user.id, expires_in = auth.expires_in);
        self.client.set_token(Some(auth.access_token.clone()));
        self.client.set_refresh_token(Some(auth.refresh_token.clone()));
    }
}

fn encode_error(err: serde_urlencoded::ser::Error) -> Error {
    Error::Encode(serde::ser::Error::custom(err))
}

fn not_found_to_none<T>(res: Result<T, Error>) -> Result<Option<T>, Error> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(Error::Http { status: 404, .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

#[async_trait::async_trait]
impl<R> crate::core::Backend for Crm<R>
where
    R: Refresher,
{
    async fn list_customers(
        &self,
        params: &CustomersListParams,
    ) -> Result<PaginatedResponse<Customer>, anyhow::Error> {
        Ok(self.list_customers(params).await?)
    }

    async fn customer(&self, id: &crate::core::IdRef) -> Result<Option<Customer>, anyhow::Error> {
        Ok(not_found_to_none(self.customer(id).await)?)
    }

    async fn list_transactions(
        &self,
        params: &TransactionsListParams,
    ) -> Result<PaginatedResponse<Transaction>, anyhow::Error> {
        Ok(self.list_transactions(params).await?)
    }

    async fn transaction(
        &self,
        id: &crate::core::IdRef,
    ) -> Result<Option<Transaction>, anyhow::Error> {
        Ok(not_found_to_none(self.transaction(id).await)?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, anyhow::Error> {
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        Ok(self.login(&request).await?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, anyhow::Error> {
        Ok(self.register(request).await?)
    }

    async fn logout(&self) -> Result<(), anyhow::Error> {
        Ok(self.logout().await?)
    }

    fn has_credentials(&self) -> bool {
        let credentials = self.client.session().credentials();
        credentials.access_token.is_some() || credentials.refresh_token.is_some()
    }
}
