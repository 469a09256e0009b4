use std::sync::Arc;

use async_graphql::{dataloader::DataLoader, Context};

use crate::core::Core;

use super::loader::CustomerLoader;

pub fn load_core<'a>(ctx: &'a Context<'_>) -> &'a Arc<Core> {
    ctx.data_unchecked::<Arc<Core>>()
}

pub fn customer_loader<'a>(ctx: &'a Context<'_>) -> &'a DataLoader<CustomerLoader> {
    ctx.data_unchecked::<DataLoader<CustomerLoader>>()
}
