// API service layer for communicating with the notification service
use std::marker::PhantomData;

use async_trait::async_trait;
use callwatch_shared::api::{AuthApi, ResourceApi, WritableResourceApi, token_form_body};
use callwatch_shared::endpoints::{Endpoints, Scope};
use callwatch_shared::session::TokenStore;
use callwatch_shared::stats::{
    ContactGroupStats, ContactStats, CountKind, DailyCallStats, SystemCounts, TriggerStats,
};
use callwatch_shared::{
    ApiError, ApiResult, AuthToken, Config, EditableEntity, Entity, LoginCredentials,
    PaginatedResponse, Trigger,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::storage::BrowserTokenStore;

// ============================================
// HTTP CLIENT
// ============================================

/// Error body the service sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    endpoints: Endpoints,
    tokens: BrowserTokenStore,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoints: Endpoints::new(config.api_base_url.clone()),
            tokens: BrowserTokenStore::new(config.token_storage_key.clone()),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Some(token) => req.header("Authorization", &format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn dispatch(req: Request) -> ApiResult<Response> {
        debug!(url = %req.url(), "request");

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(body) => body.detail.to_string(),
            Err(_) => format!("HTTP Error: {}", status),
        };
        Err(ApiError::status(status, message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, url: &str) -> ApiResult<T> {
        let req = match method {
            "GET" => Request::get(url),
            "DELETE" => Request::delete(url),
            _ => return Err(ApiError::Encode(format!("unsupported method {}", method))),
        };
        let req = self
            .authorize(req)
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = Self::dispatch(req).await?;
        Self::decode(response).await
    }

    async fn request_with_body<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        let req = match method {
            "POST" => Request::post(url),
            "PUT" => Request::put(url),
            _ => return Err(ApiError::Encode(format!("unsupported method {}", method))),
        };
        let req = self
            .authorize(req)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = Self::dispatch(req).await?;
        Self::decode(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.request("GET", url).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> ApiResult<T> {
        self.request_with_body("POST", url, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> ApiResult<T> {
        self.request_with_body("PUT", url, body).await
    }

    /// DELETE answers with no content, so nothing is decoded.
    pub async fn delete(&self, url: &str) -> ApiResult<()> {
        let req = self
            .authorize(Request::delete(url))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        Self::dispatch(req).await.map(|_| ())
    }

    /// POST with an `application/x-www-form-urlencoded` body, unauthenticated.
    pub async fn post_form<T: DeserializeOwned>(&self, url: &str, body: String) -> ApiResult<T> {
        let req = Request::post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = Self::dispatch(req).await?;
        Self::decode(response).await
    }
}

// ============================================
// RESOURCE SERVICE
// ============================================

/// REST client for one collection, addressed by `E::PATH`.
pub struct Resource<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Resource<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<E> PartialEq for Resource<E> {
    fn eq(&self, other: &Self) -> bool {
        self.client == other.client
    }
}

#[async_trait(?Send)]
impl<E: Entity> ResourceApi<E> for Resource<E> {
    async fn list(&self, page: u32, per_page: u32) -> ApiResult<PaginatedResponse<E>> {
        let url = self.client.endpoints().page::<E>(page, per_page);
        self.client.get(&url).await
    }

    async fn get(&self, id: &E::Id) -> ApiResult<E> {
        let url = self.client.endpoints().item::<E>(id);
        self.client.get(&url).await
    }

    async fn list_scoped(&self, scope: &Scope<E>) -> ApiResult<Vec<E>> {
        let url = self.client.endpoints().scoped(scope);
        self.client.get(&url).await
    }
}

#[async_trait(?Send)]
impl<E: EditableEntity> WritableResourceApi<E> for Resource<E> {
    async fn create(&self, payload: &E::Create) -> ApiResult<E> {
        let url = self.client.endpoints().collection::<E>();
        self.client.post(&url, payload).await
    }

    async fn update(&self, id: &E::Id, payload: &E::Update) -> ApiResult<E> {
        let url = self.client.endpoints().item::<E>(id);
        self.client.put(&url, payload).await
    }

    async fn delete(&self, id: &E::Id) -> ApiResult<()> {
        let url = self.client.endpoints().item::<E>(id);
        self.client.delete(&url).await
    }
}

impl Resource<Trigger> {
    /// Looks a trigger up by its exact phrase.
    pub async fn by_string(&self, phrase: &str) -> ApiResult<Trigger> {
        let url = self.client.endpoints().trigger_by_string(phrase);
        self.client.get(&url).await
    }
}

// ============================================
// AUTH SERVICE
// ============================================

pub mod auth {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct AuthService {
        client: ApiClient,
    }

    impl AuthService {
        pub fn new(client: ApiClient) -> Self {
            Self { client }
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for AuthService {
        async fn request_token(&self, credentials: &LoginCredentials) -> ApiResult<AuthToken> {
            let url = self.client.endpoints().token();
            self.client
                .post_form(&url, token_form_body(credentials))
                .await
        }
    }
}

// ============================================
// STATS SERVICE
// ============================================

pub mod stats {
    use super::*;

    /// Fetches the four headline counts together; any failure fails all.
    pub async fn counts(client: &ApiClient) -> ApiResult<SystemCounts> {
        let endpoints = client.endpoints();
        let triggers_url = endpoints.count(CountKind::ActiveTriggers);
        let contacts_url = endpoints.count(CountKind::Contacts);
        let groups_url = endpoints.count(CountKind::ContactGroups);
        let calls_url = endpoints.count(CountKind::DailyCalls);

        let (triggers, contacts, groups, calls) = futures::try_join!(
            client.get::<TriggerStats>(&triggers_url),
            client.get::<ContactStats>(&contacts_url),
            client.get::<ContactGroupStats>(&groups_url),
            client.get::<DailyCallStats>(&calls_url),
        )?;

        Ok(SystemCounts::from_parts(triggers, contacts, groups, calls))
    }
}
