use std::sync::Arc;

use crate::crm::{
    auth::store::SessionStore,
    model::{AuthResponse, Customer, PaginatedResponse, RegisterRequest, Transaction},
    query::{CustomersListParams, TransactionsListParams},
};

pub type Id = String;
pub type IdRef = str;

pub struct Core {
    pub backend: Arc<dyn Backend>,
    pub session: Arc<SessionStore>,
}

/// What the dashboard views need from the CRM backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn list_customers(
        &self,
        params: &CustomersListParams,
    ) -> Result<PaginatedResponse<Customer>, anyhow::Error>;
    async fn customer(&self, id: &IdRef) -> Result<Option<Customer>, anyhow::Error>;

    async fn list_transactions(
        &self,
        params: &TransactionsListParams,
    ) -> Result<PaginatedResponse<Transaction>, anyhow::Error>;
    async fn transaction(&self, id: &IdRef) -> Result<Option<Transaction>, anyhow::Error>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, anyhow::Error>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, anyhow::Error>;
    async fn logout(&self) -> Result<(), anyhow::Error>;

    /// Whether the backend client currently holds any token.
    fn has_credentials(&self) -> bool;
}
