/**
 * RemoteDesk API Client
 *
 * Typed async wrappers around every endpoint the client consumes. One
 * `ApiClient` is cheap to clone (the underlying reqwest client is shared)
 * and carries the bearer token, if any.
 */

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::config::AppConfig;
use crate::shared::error::ClientError;
use crate::shared::models::{
    AdminStats, ApiErrorBody, AuthResponse, CheckoutResponse, CurrentUser, Device,
    DeviceCredentials, DeviceRegistration, DurationRequest, LoginRequest, MessageResponse,
    PaymentRecord, PriceResponse, RegisterRequest, RemoteSession, SessionStarted, UserRecord,
};
use crate::shared::pricing::DurationSelection;

/// How non-success statuses are classified for a given call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorContext {
    /// Login/register: client errors are credential problems
    Credentials,
    General,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: AppConfig,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: config.clone(),
            client,
            token: None,
        })
    }

    /// A copy of this client that authenticates as `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
            token: Some(token.into()),
        }
    }

    pub fn without_token(&self) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ---- auth ----

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self.request(Method::POST, "/auth/login").json(&body);
        self.send(request, ErrorContext::Credentials).await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ClientError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let request = self.request(Method::POST, "/auth/register").json(&body);
        self.send(request, ErrorContext::Credentials).await
    }

    pub async fn me(&self) -> Result<CurrentUser, ClientError> {
        self.get_authorized("/auth/me").await
    }

    // ---- devices ----

    pub async fn list_devices(&self) -> Result<Vec<Device>, ClientError> {
        self.get_authorized("/device/list").await
    }

    pub async fn register_device(
        &self,
        registration: &DeviceRegistration,
    ) -> Result<DeviceCredentials, ClientError> {
        self.post_authorized("/device/register", registration).await
    }

    pub async fn delete_device(&self, device_id: &str) -> Result<MessageResponse, ClientError> {
        let request = self.authorized(Method::DELETE, &format!("/device/{}", device_id))?;
        self.send(request, ErrorContext::General).await
    }

    // ---- subscription & payment ----

    /// Authoritative price for a duration. Does not need a token.
    pub async fn calculate_price(
        &self,
        duration: DurationSelection,
    ) -> Result<PriceResponse, ClientError> {
        let body = DurationRequest {
            duration_days: duration,
        };
        let request = self
            .request(Method::POST, "/subscription/calculate")
            .json(&body);
        self.send(request, ErrorContext::General).await
    }

    pub async fn create_subscription(
        &self,
        duration: DurationSelection,
    ) -> Result<CheckoutResponse, ClientError> {
        let body = DurationRequest {
            duration_days: duration,
        };
        self.post_authorized("/subscription/create", &body).await
    }

    pub async fn payment_status(&self, payment_id: &str) -> Result<PaymentRecord, ClientError> {
        self.get_authorized(&format!("/payment/{}/status", payment_id))
            .await
    }

    // ---- remote sessions ----

    pub async fn start_session(&self, device_id: &str) -> Result<SessionStarted, ClientError> {
        let request = self
            .authorized(Method::POST, "/session/start")?
            .query(&[("device_id", device_id)]);
        self.send(request, ErrorContext::General).await
    }

    pub async fn end_session(&self, session_id: &str) -> Result<MessageResponse, ClientError> {
        let request = self.authorized(Method::POST, &format!("/session/{}/end", session_id))?;
        self.send(request, ErrorContext::General).await
    }

    pub async fn list_sessions(&self) -> Result<Vec<RemoteSession>, ClientError> {
        self.get_authorized("/session/list").await
    }

    // ---- admin ----

    pub async fn admin_stats(&self) -> Result<AdminStats, ClientError> {
        self.get_authorized("/admin/stats").await
    }

    pub async fn admin_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        self.get_authorized("/admin/users").await
    }

    pub async fn admin_sessions(&self) -> Result<Vec<RemoteSession>, ClientError> {
        self.get_authorized("/admin/sessions").await
    }

    // ---- plumbing ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        self.client.request(method, self.config.api_url(path))
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::authentication("Not authenticated"))?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn get_authorized<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.authorized(Method::GET, path)?;
        self.send(request, ErrorContext::General).await
    }

    async fn post_authorized<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::POST, path)?.json(body);
        self.send(request, ErrorContext::General).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: ErrorContext,
    ) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .inspect_err(|e| tracing::warn!("Request failed before a response arrived: {}", e))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, context).await);
        }

        Ok(response.json::<T>().await?)
    }
}

async fn error_from_response(response: Response, context: ErrorContext) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|parsed| parsed.message())
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    tracing::warn!("API returned {}: {}", status.as_u16(), message);

    match (status, context) {
        (StatusCode::UNAUTHORIZED, _) => ClientError::authentication(message),
        (StatusCode::FORBIDDEN, _) => ClientError::denied(message),
        (status, ErrorContext::Credentials) if status.is_client_error() => {
            ClientError::authentication(message)
        }
        (status, _) => ClientError::server(status.as_u16(), message),
    }
}
