//! Seams between the view logic and the transport.
//!
//! The browser build implements these over `gloo-net`; tests implement them
//! over in-memory fixtures.

use async_trait::async_trait;

use crate::endpoints::Scope;
use crate::error::ApiResult;
use crate::models::{AuthToken, EditableEntity, Entity, LoginCredentials};
use crate::pagination::PaginatedResponse;

/// Read access to one collection.
#[async_trait(?Send)]
pub trait ResourceApi<E: Entity> {
    async fn list(&self, page: u32, per_page: u32) -> ApiResult<PaginatedResponse<E>>;

    async fn get(&self, id: &E::Id) -> ApiResult<E>;

    /// Unpaginated server-side filtered read.
    async fn list_scoped(&self, scope: &Scope<E>) -> ApiResult<Vec<E>>;
}

/// Mutations on a collection whose records the dashboard owns.
#[async_trait(?Send)]
pub trait WritableResourceApi<E: EditableEntity>: ResourceApi<E> {
    async fn create(&self, payload: &E::Create) -> ApiResult<E>;

    async fn update(&self, id: &E::Id, payload: &E::Update) -> ApiResult<E>;

    async fn delete(&self, id: &E::Id) -> ApiResult<()>;
}

#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchanges credentials for a bearer token.
    async fn request_token(&self, credentials: &LoginCredentials) -> ApiResult<AuthToken>;
}

/// Form body of the token request, `application/x-www-form-urlencoded`.
pub fn token_form_body(credentials: &LoginCredentials) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(&credentials.username),
        urlencoding::encode(&credentials.password)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_body_is_form_encoded() {
        let credentials = LoginCredentials::new("ops@plant", "p&ss word");
        assert_eq!(
            token_form_body(&credentials),
            "username=ops%40plant&password=p%26ss%20word"
        );
    }
}
