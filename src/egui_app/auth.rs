/**
 * Session Module
 *
 * Owns the authenticated identity for the lifetime of the app. The session
 * goes through `Init -> Restoring -> Ready` once at startup; after that,
 * login, register and logout move it between signed-in and signed-out
 * without leaving `Ready`.
 *
 * The network half lives in `Authenticator`, which is `Clone + Send` so the
 * UI can run it on the runtime and hand the result back to
 * `SessionAuthState::establish` / `finish_restore` on the UI thread.
 */

use std::sync::Arc;

use crate::egui_app::api::ApiClient;
use crate::egui_app::credentials::CredentialStore;
use crate::shared::error::{ClientError, ErrorKind};
use crate::shared::models::{Identity, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing checked yet
    Init,
    /// A stored token is being verified against `/auth/me`
    Restoring,
    Ready,
}

/// Outcome of a successful credential exchange or restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub identity: Identity,
    pub subscription: Option<Subscription>,
}

/// Network side of the session: talks to the identity service and keeps
/// the credential store in step.
#[derive(Clone)]
pub struct Authenticator {
    api: ApiClient,
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(api: ApiClient, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            api: api.without_token(),
            store,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let response = self.api.login(email, password).await?;
        tracing::info!("Login succeeded for {}", response.user.email);
        self.persist(&response.access_token);
        Ok(AuthSession {
            token: response.access_token,
            identity: response.user,
            subscription: None,
        })
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, ClientError> {
        let response = self.api.register(email, password, name).await?;
        tracing::info!("Registered account {}", response.user.email);
        self.persist(&response.access_token);
        Ok(AuthSession {
            token: response.access_token,
            identity: response.user,
            subscription: None,
        })
    }

    /// Verify a stored token. A rejected token is removed from the store;
    /// a network failure leaves it for the next start.
    pub async fn restore(&self, token: String) -> Result<AuthSession, ClientError> {
        match self.api.with_token(token.as_str()).me().await {
            Ok(me) => {
                tracing::info!("Restored session for {}", me.identity.email);
                Ok(AuthSession {
                    token,
                    identity: me.identity,
                    subscription: me.subscription,
                })
            }
            Err(e) => {
                if matches!(
                    e.kind(),
                    ErrorKind::AuthenticationFailure | ErrorKind::AuthorizationDenied
                ) {
                    tracing::info!("Stored token rejected, clearing it");
                    self.forget();
                } else {
                    tracing::warn!("Could not verify stored token: {}", e);
                }
                Err(e)
            }
        }
    }

    pub fn stored_token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read stored credentials: {}", e);
                None
            }
        }
    }

    pub fn forget(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear stored credentials: {}", e);
        }
    }

    fn persist(&self, token: &str) {
        // The session still works for this run if the write fails.
        if let Err(e) = self.store.save(token) {
            tracing::warn!("Failed to persist credentials: {}", e);
        }
    }
}

/// The signed-in identity (or none) plus the token that proves it.
pub struct SessionAuthState {
    authenticator: Authenticator,
    phase: SessionPhase,
    token: Option<String>,
    current: Option<Identity>,
    subscription: Option<Subscription>,
}

impl SessionAuthState {
    pub fn new(api: ApiClient, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            authenticator: Authenticator::new(api, store),
            phase: SessionPhase::Init,
            token: None,
            current: None,
            subscription: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True until the startup restore attempt has settled.
    pub fn loading(&self) -> bool {
        self.phase != SessionPhase::Ready
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current
            .as_ref()
            .map(|identity| identity.role.is_admin())
            .unwrap_or(false)
    }

    /// Last subscription the server reported through `/auth/me`.
    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    pub fn set_subscription(&mut self, subscription: Option<Subscription>) {
        self.subscription = subscription;
    }

    pub fn authenticator(&self) -> Authenticator {
        self.authenticator.clone()
    }

    /// API client carrying the session token, if signed in.
    pub fn api(&self) -> ApiClient {
        match &self.token {
            Some(token) => self.authenticator.api.with_token(token.as_str()),
            None => self.authenticator.api.clone(),
        }
    }

    /// Start the restore step. Returns the stored token to verify, or
    /// `None` when there is nothing to restore (the session is then ready).
    pub fn begin_restore(&mut self) -> Option<String> {
        match self.authenticator.stored_token() {
            Some(token) => {
                self.phase = SessionPhase::Restoring;
                Some(token)
            }
            None => {
                self.phase = SessionPhase::Ready;
                None
            }
        }
    }

    pub fn finish_restore(&mut self, result: Result<AuthSession, ClientError>) {
        self.phase = SessionPhase::Ready;
        match result {
            Ok(session) => {
                self.establish(session);
            }
            Err(_) => self.reset(),
        }
    }

    /// Look for a stored token and verify it.
    pub async fn restore(&mut self) {
        if let Some(token) = self.begin_restore() {
            let result = self.authenticator.restore(token).await;
            self.finish_restore(result);
        }
    }

    /// Adopt a verified session.
    pub fn establish(&mut self, session: AuthSession) -> &Identity {
        self.phase = SessionPhase::Ready;
        self.token = Some(session.token);
        self.subscription = session.subscription;
        self.current.insert(session.identity)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity, ClientError> {
        let session = self.authenticator.login(email, password).await?;
        Ok(self.establish(session).clone())
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Identity, ClientError> {
        let session = self.authenticator.register(email, password, name).await?;
        Ok(self.establish(session).clone())
    }

    pub fn logout(&mut self) {
        if let Some(identity) = &self.current {
            tracing::info!("Logging out {}", identity.email);
        }
        self.authenticator.forget();
        self.reset();
        self.phase = SessionPhase::Ready;
    }

    fn reset(&mut self) {
        self.token = None;
        self.current = None;
        self.subscription = None;
    }
}
