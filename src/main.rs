use std::sync::Arc;

use axum::Router;
use crm_admin::{
    api::http::{axum::GraphQL, graphql},
    core::Core,
    crm::{self, auth::store::SessionStore, client::ApiClient, origin::EnvOrigin},
};
use tracing::info;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let reqwest_client = reqwest::Client::builder()
        .connection_verbose(true)
        .build()?;

    let client = ApiClient::new(reqwest_client, EnvOrigin::default());
    client.set_token(getenv("CRM_ACCESS_TOKEN"));
    client.set_refresh_token(getenv("CRM_REFRESH_TOKEN"));

    let session = Arc::new(SessionStore::new());
    client.set_token_observer(Some(Arc::clone(&session) as _));

    let backend = crm::Crm::new(Arc::new(client));
    let core = Arc::new(Core {
        backend: Arc::new(backend),
        session,
    });
    let schema = graphql::build(core);

    let app = Router::new();
    let app = GraphQL::routes(app, schema);

    let listen_addr = getenv("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    info!(message = "Dashboard API listening", %listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn getenv(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
