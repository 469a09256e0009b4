mod error;
pub mod loader;
mod model;
mod util;

use std::sync::Arc;

use async_graphql::{dataloader::DataLoader, EmptySubscription, SchemaBuilder};

use crate::core::Core;

use self::{
    loader::CustomerLoader,
    model::{MutationRoot, QueryRoot},
};

pub type Schema = async_graphql::Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    async_graphql::Schema::build(QueryRoot, MutationRoot, EmptySubscription)
}

/// Schema with the core and its customer loader attached.
pub fn build(core: Arc<Core>) -> Schema {
    let customer_loader = DataLoader::new(
        CustomerLoader {
            core: Arc::clone(&core),
        },
        tokio::spawn,
    );
    schema().data(core).data(customer_loader).finish()
}
