// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use junkstop_client::error::ClientError;

fn unauthorized(message: &str) -> ClientError {
    ClientError::Unauthorized {
        message: message.to_string(),
    }
}

#[test]
fn test_status_codes() {
    assert_eq!(unauthorized("").status(), Some(401));

    let err = ClientError::Http {
        status: 503,
        message: "Service unavailable".to_string(),
    };
    assert_eq!(err.status(), Some(503));

    assert_eq!(ClientError::Network("refused".to_string()).status(), None);
    assert_eq!(ClientError::Decode("bad json".to_string()).status(), None);
}

#[test]
fn test_is_unauthorized() {
    assert!(unauthorized("Token expired").is_unauthorized());

    let err = ClientError::Http {
        status: 403,
        message: "Forbidden".to_string(),
    };
    assert!(!err.is_unauthorized());
}

#[test]
fn test_display_messages_embed_status() {
    let err = ClientError::Http {
        status: 400,
        message: "Email already registered".to_string(),
    };
    assert_eq!(err.to_string(), "Email already registered (HTTP 400)");

    let err = ClientError::Http {
        status: 502,
        message: String::new(),
    };
    assert_eq!(err.to_string(), "HTTP error! status: 502");
    assert_eq!(err.to_string(), ClientError::http_status_message(502));

    assert_eq!(
        unauthorized("Incorrect email or password").to_string(),
        "Incorrect email or password (HTTP 401)"
    );
    assert_eq!(unauthorized("").to_string(), "HTTP error! status: 401");

    assert_eq!(
        ClientError::Storage("disk full".to_string()).to_string(),
        "Storage error: disk full"
    );
}

#[test]
fn test_detail_only_for_server_text() {
    assert_eq!(unauthorized("  Token expired ").detail(), Some("Token expired"));
    assert_eq!(unauthorized(" ").detail(), None);
    assert_eq!(ClientError::Network("refused".to_string()).detail(), None);
}
