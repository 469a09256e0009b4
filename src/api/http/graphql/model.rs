use async_graphql::{
    ComplexObject, Context, Enum, InputObject, Object, Result, SimpleObject, ID,
};

use crate::crm::{model as wire, query};

use super::{
    error::{self, NotSignedIn},
    util::{customer_loader, load_core},
};

#[derive(Debug, Enum, Clone, Copy, PartialEq, Eq)]
#[graphql(remote = "crate::crm::model::LoginWith")]
pub enum LoginWith {
    Google,
    Facebook,
    Apple,
    Email,
}

#[derive(Debug, Enum, Clone, Copy, PartialEq, Eq)]
#[graphql(remote = "crate::crm::model::PaymentType")]
pub enum PaymentType {
    Initial,
    Recurring,
    Upgrade,
}

#[derive(Debug, Enum, Clone, Copy, PartialEq, Eq)]
#[graphql(remote = "crate::crm::model::TransactionType")]
pub enum TransactionType {
    Payment,
    Refund,
    Chargeback,
    Rdr,
}

#[derive(Debug, Enum, Clone, Copy, PartialEq, Eq)]
#[graphql(remote = "crate::crm::model::TransactionStatus")]
pub enum TransactionStatus {
    Success,
    Failed,
    InProcess,
    WaitingUserInteraction,
}

#[derive(Debug, Enum, Clone, Copy, PartialEq, Eq)]
#[graphql(remote = "crate::crm::query::SortOrder")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(SimpleObject, Clone)]
pub struct Customer {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    pub login_with: LoginWith,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub subscription_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<wire::Customer> for Customer {
    fn from(val: wire::Customer) -> Self {
        Self {
            id: val.id.into(),
            email: val.email,
            name: val.name,
            email_verified: val.email_verified,
            login_with: val.login_with.into(),
            company_name: val.company_name,
            address: val.address,
            city: val.city,
            state: val.state,
            postal_code: val.postal_code,
            country: val.country,
            subscription_id: val.subscription_id,
            created_at: val.created_at,
            updated_at: val.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Transaction {
    pub id: ID,
    pub id_transaction: String,
    pub customer_id: String,
    pub subscription_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_type: PaymentType,
    pub transaction_type: TransactionType,
    pub transaction_status: TransactionStatus,
    pub payment_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[ComplexObject]
impl Transaction {
    async fn customer(&self, ctx: &Context<'_>) -> Result<Option<Customer>> {
        customer_loader(ctx)
            .load_one(self.customer_id.clone())
            .await
            .map_err(|err| error::from_backend(&err))
    }
}

impl From<wire::Transaction> for Transaction {
    fn from(val: wire::Transaction) -> Self {
        Self {
            id: val.id.into(),
            id_transaction: val.id_transaction,
            customer_id: val.customer_id,
            subscription_id: val.subscription_id,
            amount: val.amount,
            currency: val.currency,
            payment_type: val.payment_type.into(),
            transaction_type: val.transaction_type.into(),
            transaction_status: val.transaction_status.into(),
            payment_date: val.payment_date,
            created_at: val.created_at,
            updated_at: val.updated_at,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(concrete(name = "CustomerPage", params(Customer)))]
#[graphql(concrete(name = "TransactionPage", params(Transaction)))]
pub struct Page<T: async_graphql::OutputType> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T, W> From<wire::PaginatedResponse<W>> for Page<T>
where
    T: async_graphql::OutputType + From<W>,
{
    fn from(val: wire::PaginatedResponse<W>) -> Self {
        Self {
            data: val.data.into_iter().map(Into::into).collect(),
            total: val.total,
            page: val.page,
            limit: val.limit,
            total_pages: val.total_pages,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<wire::AuthUser> for User {
    fn from(val: wire::AuthUser) -> Self {
        Self {
            id: val.id.into(),
            email: val.email,
            first_name: val.first_name,
            last_name: val.last_name,
        }
    }
}

#[derive(InputObject, Default)]
pub struct CustomerFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub login_with: Option<LoginWith>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl From<CustomerFilter> for query::CustomersListParams {
    fn from(val: CustomerFilter) -> Self {
        Self {
            page: val.page,
            limit: val.limit,
            search: val.search,
            email: val.email,
            email_verified: val.email_verified,
            login_with: val
                .login_with
                .map(|login_with| wire::LoginWith::from(login_with).as_str().to_owned()),
            sort_by: val.sort_by,
            sort_order: val.sort_order.map(Into::into),
        }
    }
}

#[derive(InputObject, Default)]
pub struct TransactionFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub transaction_type: Option<String>,
    pub transaction_status: Option<String>,
    pub payment_type: Option<String>,
    pub currency: Option<String>,
    pub is_test: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl From<TransactionFilter> for query::TransactionsListParams {
    fn from(val: TransactionFilter) -> Self {
        Self {
            page: val.page,
            limit: val.limit,
            search: val.search,
            customer_id: val.customer_id,
            subscription_id: val.subscription_id,
            transaction_type: val.transaction_type,
            transaction_status: val.transaction_status,
            payment_type: val.payment_type,
            currency: val.currency,
            is_test: val.is_test,
            date_from: val.date_from,
            date_to: val.date_to,
            sort_by: val.sort_by,
            sort_order: val.sort_order.map(Into::into),
        }
    }
}

#[derive(InputObject)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn customers(
        &self,
        ctx: &Context<'_>,
        filter: Option<CustomerFilter>,
    ) -> Result<Page<Customer>> {
        let core = load_core(ctx);
        let params = query::CustomersListParams::from(filter.unwrap_or_default());
        let page = core
            .backend
            .list_customers(&params)
            .await
            .map_err(|err| error::from_backend(&err))?;
        Ok(page.into())
    }

    async fn customer(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Customer>> {
        let core = load_core(ctx);
        let customer = core
            .backend
            .customer(&id)
            .await
            .map_err(|err| error::from_backend(&err))?;
        Ok(customer.map(Into::into))
    }

    async fn transactions(
        &self,
        ctx: &Context<'_>,
        filter: Option<TransactionFilter>,
    ) -> Result<Page<Transaction>> {
        let core = load_core(ctx);
        let params = query::TransactionsListParams::from(filter.unwrap_or_default());
        let page = core
            .backend
            .list_transactions(&params)
            .await
            .map_err(|err| error::from_backend(&err))?;
        Ok(page.into())
    }

    async fn transaction(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Transaction>> {
        let core = load_core(ctx);
        let transaction = core
            .backend
            .transaction(&id)
            .await
            .map_err(|err| error::from_backend(&err))?;
        Ok(transaction.map(Into::into))
    }

    /// The signed-in user, if any.
    async fn viewer(&self, ctx: &Context<'_>) -> Option<User> {
        load_core(ctx).session.user().map(Into::into)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<User> {
        let core = load_core(ctx);
        let auth = core
            .backend
            .login(&email, &password)
            .await
            .map_err(|err| error::from_backend(&err))?;
        core.session.sign_in(&auth);
        Ok(auth.user.into())
    }

    async fn register(&self, ctx: &Context<'_>, input: RegisterInput) -> Result<User> {
        let core = load_core(ctx);
        let request = wire::RegisterRequest {
            email: input.email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
        };
        let auth = core
            .backend
            .register(&request)
            .await
            .map_err(|err| error::from_backend(&err))?;
        core.session.sign_in(&auth);
        Ok(auth.user.into())
    }

    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let core = load_core(ctx);
        if !core.session.is_authenticated() && !core.backend.has_credentials() {
            return Err(NotSignedIn.into());
        }
        let res = core.backend.logout().await;
        core.session.sign_out();
        res.map_err(|err| error::from_backend(&err))?;
        Ok(true)
    }
}
