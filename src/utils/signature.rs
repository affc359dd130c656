use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of a signed webhook request, in seconds.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

fn signing_secret(signing_key: &str) -> &str {
    // "signkey-<env>-<secret>"
    match signing_key.strip_prefix("signkey-") {
        Some(rest) => rest.split_once('-').map(|(_, secret)| secret).unwrap_or(rest),
        None => signing_key,
    }
}

fn mac_for(signing_key: &str, body: &[u8], timestamp: &str) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(signing_secret(signing_key).as_bytes())
        .map_err(|e| AppError::ConfigError(format!("Invalid webhook signing key: {}", e)))?;
    mac.update(body);
    mac.update(timestamp.as_bytes());
    Ok(mac)
}

/// Produces a `t=<ts>&s=<hex>` header value.
pub fn sign(signing_key: &str, body: &[u8], timestamp: i64) -> Result<String> {
    let timestamp = timestamp.to_string();
    let mac = mac_for(signing_key, body, &timestamp)?;
    let signature = hex::encode(mac.finalize().into_bytes());
    Ok(format!("t={}&s={}", timestamp, signature))
}

/// Checks a `t=<ts>&s=<hex>` signature header against the raw body.
pub fn verify(signing_key: &str, header: &str, body: &[u8], now: i64) -> Result<()> {
    let unauthorized = |msg: &str| AppError::Unauthorized(msg.to_string());

    let mut timestamp = None;
    let mut signature = None;
    for pair in header.split('&') {
        match pair.split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("s", value)) => signature = Some(value),
            _ => {}
        }
    }

    let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
        return Err(unauthorized("Malformed webhook signature"));
    };

    let sent_at: i64 = timestamp
        .parse()
        .map_err(|_| unauthorized("Malformed webhook signature"))?;
    if (now - sent_at).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(unauthorized("Webhook signature expired"));
    }

    let expected = hex::decode(signature).map_err(|_| unauthorized("Malformed webhook signature"))?;

    mac_for(signing_key, body, timestamp)?
        .verify_slice(&expected)
        .map_err(|_| unauthorized("Invalid webhook signature"))
}
