use super::descriptor::{BodyPart, RequestBody, RequestDescriptor};
use super::outcome::Outcome;
use crate::auth::session_store::SessionStore;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Callback fired when a dispatch observes an expired session.
///
/// This is the login-redirect signal: it runs synchronously, exactly once
/// per rejected dispatch, after the session store has been cleared. It must
/// not call back into the dispatcher, or an endpoint that itself answers
/// 401 would loop forever.
pub type AuthExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Issues a single HTTP request per call and normalizes every outcome.
///
/// The dispatcher is the one place where bearer credentials are attached
/// and failures are classified; every domain service goes through it
/// unmodified. It never retries: callers making non-idempotent requests are
/// responsible for not re-invoking on failure.
pub struct RequestDispatcher {
    http: reqwest::Client,
    store: Arc<dyn SessionStore>,
    on_auth_expired: Option<AuthExpiredHook>,
}

impl RequestDispatcher {
    pub fn new(http: reqwest::Client, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http,
            store,
            on_auth_expired: None,
        }
    }

    /// Register the login-redirect signal fired on authentication expiry.
    pub fn with_auth_expired_hook(mut self, hook: AuthExpiredHook) -> Self {
        self.on_auth_expired = Some(hook);
        self
    }

    /// Send the described request and classify the result.
    ///
    /// Classification precedence: no response received yields
    /// [`Outcome::TransportFailure`]; a 401 clears the session store, fires
    /// the auth-expired hook once, and yields [`Outcome::AuthFailure`]; any
    /// other non-2xx status yields [`Outcome::ServerFailure`] with the
    /// server-provided message when one is present; otherwise the body is
    /// decoded into `T` and returned as [`Outcome::Success`].
    ///
    /// Reading the credential from the store has no side effect; the 401
    /// path is the only outcome that mutates the store from in here.
    ///
    /// # Panics
    ///
    /// Panics on malformed descriptors (invalid URL, invalid header name or
    /// value). Those are programmer errors, never dispatch outcomes.
    pub async fn dispatch<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Outcome<T> {
        let credential = self.store.load();

        let mut request = self
            .http
            .request(descriptor.method().clone(), descriptor.url());
        if !descriptor.query_pairs().is_empty() {
            request = request.query(descriptor.query_pairs());
        }
        request = match descriptor.request_body() {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(value),
            RequestBody::Form(fields) => request.form(fields),
            RequestBody::Multipart(parts) => request.multipart(build_multipart(parts)),
        };

        let mut overrides = HeaderMap::new();
        for (name, value) in descriptor.header_overrides() {
            let name = HeaderName::try_from(name.as_str())
                .unwrap_or_else(|e| panic!("invalid header name {name:?} in descriptor: {e}"));
            let value = HeaderValue::try_from(value.as_str())
                .unwrap_or_else(|e| panic!("invalid value for header {name:?} in descriptor: {e}"));
            overrides.insert(name, value);
        }
        // The bearer header goes in last so no override can shadow it.
        if let Some(credential) = &credential {
            match HeaderValue::try_from(format!("Bearer {}", credential.token)) {
                Ok(value) => {
                    overrides.insert(AUTHORIZATION, value);
                }
                Err(e) => {
                    log::error!("stored credential is not a usable header value: {e}");
                }
            }
        }
        if !overrides.is_empty() {
            request = request.headers(overrides);
        }

        log::debug!(
            "dispatching {} {}",
            descriptor.method(),
            descriptor.url()
        );

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => {
                panic!("malformed request descriptor for {}: {e}", descriptor.url());
            }
            Err(e) => {
                log::error!(
                    "transport failure for {} {}: {e}",
                    descriptor.method(),
                    descriptor.url()
                );
                return Outcome::TransportFailure {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!(
                "authentication rejected for {} {}, clearing session",
                descriptor.method(),
                descriptor.url()
            );
            self.store.clear();
            if let Some(hook) = &self.on_auth_expired {
                hook();
            }
            return Outcome::AuthFailure;
        }

        if !status.is_success() {
            let message = extract_error_message(response)
                .await
                .unwrap_or_else(|| format!("Error: {}", status.as_u16()));
            log::warn!(
                "{} {} answered {status}: {message}",
                descriptor.method(),
                descriptor.url()
            );
            return Outcome::ServerFailure { status, message };
        }

        match response.json::<T>().await {
            Ok(value) => Outcome::Success(value),
            Err(e) => {
                log::error!(
                    "failed to decode response body from {}: {e}",
                    descriptor.url()
                );
                Outcome::ServerFailure {
                    status,
                    message: format!("failed to decode response body: {e}"),
                }
            }
        }
    }
}

fn build_multipart(parts: &[BodyPart]) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            BodyPart::Text { name, value } => form.text(name.clone(), value.clone()),
            BodyPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let file_part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)
                    .unwrap_or_else(|e| panic!("invalid MIME type {mime:?} in descriptor: {e}"));
                form.part(name.clone(), file_part)
            }
        };
    }
    form
}

/// Best-effort extraction of a server-provided error message. The dashboard
/// API reports errors as `{"message": ...}` envelopes, while validation
/// layers answer with `{"detail": ...}`.
async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("detail"))
        .and_then(|message| message.as_str())
        .map(|message| message.to_string())
}
