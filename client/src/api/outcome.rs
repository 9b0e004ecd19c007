use reqwest::StatusCode;

/// Normalized result of a single dispatch.
///
/// Every request produces exactly one variant; expected failures travel as
/// data rather than errors, so callers pattern-match instead of catching.
/// Only malformed request descriptors (programmer errors) escape this type,
/// as panics.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The server answered 2xx; carries the decoded response body.
    Success(T),
    /// The server answered with a non-2xx, non-401 status. The message is
    /// taken from the response body when the server provided one.
    ServerFailure { status: StatusCode, message: String },
    /// The server rejected the credential (401). The local session has
    /// already been invalidated by the time this value is observed.
    AuthFailure,
    /// No response was received: connection, DNS or timeout class failure.
    TransportFailure { message: String },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The decoded value, if the dispatch succeeded.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Map the success payload, leaving failure variants untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::ServerFailure { status, message } => {
                Outcome::ServerFailure { status, message }
            }
            Outcome::AuthFailure => Outcome::AuthFailure,
            Outcome::TransportFailure { message } => Outcome::TransportFailure { message },
        }
    }

    /// Message suitable for direct display to the user; `None` on success.
    ///
    /// Server-provided messages are surfaced verbatim; the transport and
    /// authentication variants get fixed wording.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Outcome::Success(_) => None,
            Outcome::ServerFailure { message, .. } => Some(message.clone()),
            Outcome::AuthFailure => {
                Some("Your session has expired. Please log in again.".to_string())
            }
            Outcome::TransportFailure { .. } => {
                Some("Server not available. Please try again later.".to_string())
            }
        }
    }
}
