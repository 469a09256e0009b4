use async_graphql::ErrorExtensions;

use crate::crm;

/// Keeps the auth classification visible to the UI, which renders a
/// session-expired error differently from other failures.
pub fn from_backend(err: &anyhow::Error) -> async_graphql::Error {
    let extensions = err
        .downcast_ref::<crm::Error>()
        .map(|err| (err.is_auth_error(), err.status()));

    let error = async_graphql::Error::new(err.to_string());
    match extensions {
        Some((is_auth_error, status)) => error.extend_with(|_, e| {
            e.set("isAuthError", is_auth_error);
            if let Some(status) = status {
                e.set("statusCode", i32::from(status));
            }
        }),
        None => error,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Not signed in")]
pub struct NotSignedIn;
