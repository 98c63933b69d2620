/// Random bytes encoded as lowercase hex, two characters per byte.
pub fn token_hex(n_bytes: usize) -> String {
    let bytes: Vec<u8> = (0..n_bytes).map(|_| rand::random::<u8>()).collect();
    hex::encode(bytes)
}

/// Bearer token from an `Authorization` header value. Accepts `Bearer x`,
/// `Token x` and a bare token.
pub fn parse_authorization(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("Token "))
        .unwrap_or(value)
        .trim();
    match token.is_empty() {
        true => None,
        false => Some(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hex_has_two_chars_per_byte() {
        let token = token_hex(6);
        assert_eq!(token.len(), 12);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn parses_authorization_schemes() {
        assert_eq!(parse_authorization("Bearer abc"), Some("abc"));
        assert_eq!(parse_authorization("Token abc"), Some("abc"));
        assert_eq!(parse_authorization("abc"), Some("abc"));
        assert_eq!(parse_authorization("Bearer "), None);
        assert_eq!(parse_authorization(""), None);
    }
}
