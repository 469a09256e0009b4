use std::marker::PhantomData;

use async_graphql::{http::GraphiQLSource, ObjectType, Schema, SubscriptionType};
use axum::{
    extract::Extension,
    response::{self, IntoResponse},
    routing::get,
    Json, Router,
};

pub struct GraphQL<Query, Mutation, Subscription>(PhantomData<(Query, Mutation, Subscription)>);

impl<Query, Mutation, Subscription> GraphQL<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    async fn handler(
        Extension(schema): Extension<Schema<Query, Mutation, Subscription>>,
        Json(req): Json<async_graphql::Request>,
    ) -> Json<async_graphql::Response> {
        Json(schema.execute(req).await)
    }

    async fn graphiql() -> impl IntoResponse {
        response::Html(GraphiQLSource::build().endpoint("/").finish())
    }

    async fn health() -> &'static str {
        "ok"
    }

    pub fn routes(router: Router, schema: Schema<Query, Mutation, Subscription>) -> Router {
        router
            .route("/", get(Self::graphiql).post(Self::handler))
            .route("/health", get(Self::health))
            .layer(Extension(schema))
    }
}
