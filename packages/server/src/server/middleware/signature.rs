use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use std::sync::Arc;
use tracing::debug;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Interaction payloads are small; anything larger is not from the platform.
const MAX_BODY_BYTES: usize = 1 << 20;

/// Interaction signature middleware
///
/// Buffers the body, checks the Ed25519 signature over `timestamp ‖ body`
/// against the application public key and rejects the request with 401 when
/// it does not verify. Verified requests continue with the body restored.
pub async fn verify_signature(
    public_key: Arc<VerifyingKey>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::PAYLOAD_TOO_LARGE.into_response(),
    };

    if !is_signed(&public_key, &parts.headers, &bytes) {
        debug!("Rejecting interaction with invalid signature");
        return (StatusCode::UNAUTHORIZED, "invalid request signature").into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Check the signature headers against `body`.
pub fn is_signed(public_key: &VerifyingKey, headers: &HeaderMap, body: &[u8]) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let (Some(signature_hex), Some(timestamp)) = (header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER))
    else {
        return false;
    };

    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&signature_bytes) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    public_key.verify(&message, &signature).is_ok()
}

/// Parse the hex-encoded application public key.
pub fn parse_public_key(hex_key: &str) -> anyhow::Result<VerifyingKey> {
    let bytes = hex::decode(hex_key.trim())?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("public key must be 32 bytes, got {}", b.len()))?;
    Ok(VerifyingKey::from_bytes(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn signed_headers(key: &SigningKey, timestamp: &str, body: &[u8]) -> HeaderMap {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        let signature = key.sign(&message);

        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, hex::encode(signature.to_bytes()).parse().unwrap());
        headers.insert(TIMESTAMP_HEADER, timestamp.parse().unwrap());
        headers
    }

    #[test]
    fn test_valid_signature_verifies() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let body = br#"{"type":1}"#;
        let headers = signed_headers(&key, "1700000000", body);

        assert!(is_signed(&key.verifying_key(), &headers, body));
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let headers = signed_headers(&key, "1700000000", br#"{"type":1}"#);

        assert!(!is_signed(&key.verifying_key(), &headers, br#"{"type":3}"#));
    }

    #[test]
    fn test_missing_or_garbled_headers_are_rejected() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        assert!(!is_signed(&key.verifying_key(), &HeaderMap::new(), b"{}"));

        let mut headers = signed_headers(&key, "1700000000", b"{}");
        headers.insert(SIGNATURE_HEADER, "zz".parse().unwrap());
        assert!(!is_signed(&key.verifying_key(), &headers, b"{}"));
    }

    #[test]
    fn test_parse_public_key() {
        let key = SigningKey::from_bytes(&[7u8; 32]).verifying_key();
        let parsed = parse_public_key(&hex::encode(key.to_bytes())).unwrap();
        assert_eq!(parsed, key);

        assert!(parse_public_key("abcd").is_err());
        assert!(parse_public_key("not hex").is_err());
    }
}
