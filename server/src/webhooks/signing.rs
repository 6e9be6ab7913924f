//! HMAC-SHA256 Webhook Signatures
//!
//! Verifies the `X-Hub-Signature-256` header GitHub attaches to every
//! delivery. The digest is always computed over the raw request bytes.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::types::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Algorithm tag GitHub prefixes to the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Sign a payload with HMAC-SHA256 and return the hex-encoded signature.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Build the full header value (`sha256=<hex>`) for a payload.
pub fn signature_header(secret: &str, payload: &[u8]) -> String {
    format!("{SIGNATURE_PREFIX}{}", sign_payload(secret, payload))
}

/// Verify a `sha256=<hex>` signature header against the raw payload bytes.
pub fn verify_signature(
    secret: &str,
    payload: &[u8],
    header: Option<&str>,
) -> Result<(), WebhookError> {
    let header = header.ok_or(WebhookError::MissingSignature)?;
    let provided = header
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or(WebhookError::MalformedSignature)?;

    if provided.len() != DIGEST_HEX_LEN
        || !provided
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(WebhookError::MalformedSignature);
    }

    let expected = sign_payload(secret, payload);
    if constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
        Ok(())
    } else {
        Err(WebhookError::InvalidSignature)
    }
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
