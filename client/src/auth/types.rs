use serde::{Deserialize, Serialize};

/// The bearer credential identifying an authenticated session.
///
/// Owned exclusively by the session store: created by a successful login or
/// refresh, destroyed by logout or by a rejected dispatch. At most one
/// credential is active per session; its presence means "believed
/// authenticated", which can lag server-side expiry until the next
/// dispatch.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Credential {
    /// The opaque bearer token string.
    pub token: String,
    /// The token kind as reported by the server, normally `"bearer"`.
    pub token_type: String,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: "bearer".to_string(),
        }
    }
}

/// Body of a credential-issuing response (`/auth/token`, `/auth/refresh`).
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl From<TokenResponse> for Credential {
    fn from(response: TokenResponse) -> Self {
        Self {
            token: response.access_token,
            token_type: response.token_type,
        }
    }
}
