use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use async_graphql::dataloader::Loader;
use futures_util::future::try_join_all;

use crate::core::{Core, Id};

use super::model::Customer;

/// Batches the customer lookups of a transaction listing.
pub struct CustomerLoader {
    pub core: Arc<Core>,
}

impl Loader<Id> for CustomerLoader {
    type Value = Customer;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[Id]) -> Result<HashMap<Id, Self::Value>, Self::Error> {
        let ids: BTreeSet<&Id> = keys.iter().collect();

        let lookups = ids.into_iter().map(|id| async move {
            let customer = self.core.backend.customer(id).await?;
            Ok::<_, anyhow::Error>(customer.map(|customer| (id.clone(), Customer::from(customer))))
        });

        let customers = try_join_all(lookups).await.map_err(Arc::new)?;
        Ok(customers.into_iter().flatten().collect())
    }
}
