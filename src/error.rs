// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types shared by the gateway, storage and session layers.

/// Errors produced while talking to the JunkStop API or local storage.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No response was received (DNS, connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered 401; stored credentials have been purged.
    /// `message` is the server's detail text, empty when it sent none.
    #[error("{}", status_text(&401, .message))]
    Unauthorized { message: String },

    /// Any other non-success status. `message` is empty when the body
    /// carried no detail.
    #[error("{}", status_text(.status, .message))]
    Http { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The credential store could not be written.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Fallback message used when the error body carries no detail.
    pub fn http_status_message(status: u16) -> String {
        format!("HTTP error! status: {}", status)
    }

    /// HTTP status code, if the failure came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied error text, if the response carried any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { message } | ClientError::Http { message, .. } => {
                Some(message.trim()).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }

    /// Returns true if this error purged the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

/// Failure text for a status response: the detail with the status appended,
/// or the bare status line when there is no detail.
fn status_text(status: &u16, message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        ClientError::http_status_message(*status)
    } else {
        format!("{} (HTTP {})", message, status)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
