use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

fn verify_digest<M: Mac>(mut mac: M, payload: &[u8], digest_hex: &str) -> bool {
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };
    mac.update(payload);
    // verify_slice compares in constant time
    mac.verify_slice(&expected).is_ok()
}

/// Checks a GitHub style `{algorithm}={hex_digest}` signature of `payload`.
pub fn validate_github_payload(secret: &[u8], payload: &[u8], signature: Option<&str>) -> bool {
    let Some(signature) = signature else {
        return false;
    };
    let Some((algorithm, digest_hex)) = signature.split_once('=') else {
        return false;
    };
    match algorithm {
        "sha1" => match Hmac::<Sha1>::new_from_slice(secret) {
            Ok(mac) => verify_digest(mac, payload, digest_hex),
            Err(_) => false,
        },
        "sha256" => match Hmac::<Sha256>::new_from_slice(secret) {
            Ok(mac) => verify_digest(mac, payload, digest_hex),
            Err(_) => false,
        },
        _ => false,
    }
}
