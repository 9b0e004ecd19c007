use super::session_store::SessionStore;
use super::types::{Credential, TokenResponse};
use crate::api::{Outcome, RequestDescriptor, RequestDispatcher};
use crate::config::ApiConfig;
use std::sync::Arc;

/// Owns the login, refresh and logout flows.
///
/// Together with the dispatcher's rejected-credential path, this is the only
/// writer of the session store; domain services never touch it. The manager
/// cycles between anonymous and authenticated for the life of the process
/// and is constructed explicitly once at startup, then shared.
///
/// Expected failures never escape these methods: each flow absorbs its
/// dispatch outcome into the returned `bool` and logs the cause.
pub struct SessionManager {
    dispatcher: Arc<RequestDispatcher>,
    store: Arc<dyn SessionStore>,
    config: ApiConfig,
}

impl SessionManager {
    pub fn new(
        dispatcher: Arc<RequestDispatcher>,
        store: Arc<dyn SessionStore>,
        config: ApiConfig,
    ) -> Self {
        Self {
            dispatcher,
            store,
            config,
        }
    }

    /// Exchange a username and password for a bearer credential.
    ///
    /// The credential endpoint takes the OAuth2 password form, so the body
    /// goes out URL-encoded rather than as JSON. Returns `true` only when a
    /// usable credential was issued and stored.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/auth/token")).form(vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ]);
        self.store_issued_credential(descriptor, "login").await
    }

    /// Exchange the currently stored credential for a fresh one.
    ///
    /// The dispatcher attaches the stored credential as usual. A failure
    /// here does not itself clear the session beyond what the dispatcher's
    /// 401 handling already does.
    pub async fn refresh(&self) -> bool {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/auth/refresh"));
        self.store_issued_credential(descriptor, "refresh").await
    }

    /// End the session.
    ///
    /// The server call is best-effort; the local credential is cleared no
    /// matter how it goes. Returns whether the server acknowledged the
    /// logout. Safe to call repeatedly.
    pub async fn logout(&self) -> bool {
        let descriptor = RequestDescriptor::post(self.config.endpoint("/auth/logout"));
        let outcome: Outcome<serde_json::Value> = self.dispatcher.dispatch(descriptor).await;
        let acknowledged = outcome.is_success();
        if !acknowledged {
            log::warn!(
                "logout was not acknowledged: {}",
                outcome.user_message().unwrap_or_default()
            );
        }
        self.store.clear();
        acknowledged
    }

    /// Whether a credential is currently stored.
    ///
    /// Purely local - the server is not contacted, so the answer can lag
    /// server-side expiry until the next dispatch resolves it.
    pub fn is_authenticated(&self) -> bool {
        self.store.load().is_some()
    }

    async fn store_issued_credential(&self, descriptor: RequestDescriptor, flow: &str) -> bool {
        match self.dispatcher.dispatch::<TokenResponse>(descriptor).await {
            Outcome::Success(response) if !response.access_token.is_empty() => {
                self.store.store(&Credential::from(response));
                log::info!("{flow} succeeded, credential stored");
                true
            }
            Outcome::Success(_) => {
                log::warn!("{flow} response carried no usable credential");
                false
            }
            outcome => {
                log::warn!(
                    "{flow} failed: {}",
                    outcome.user_message().unwrap_or_default()
                );
                false
            }
        }
    }
}
