//! Cookie parsing and formatting for session tokens.

use axum::http::{HeaderMap, header};

use crate::authz::{Renewal, TokenPair};

/// Cookie name for the access token (short-lived, 5 minutes).
pub const ACCESS_COOKIE_NAME: &str = "accessToken";

/// Cookie name for the refresh token (long-lived, 2 weeks).
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Extract a cookie value from the Cookie header.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((key, value)) = part.split_once('=') {
            if key.trim() == name {
                return Some(value.trim());
            }
        }
    }
    None
}

/// Access and refresh tokens from the request cookies.
pub fn token_pair(headers: &HeaderMap) -> TokenPair<'_> {
    TokenPair::new(
        get_cookie(headers, ACCESS_COOKIE_NAME),
        get_cookie(headers, REFRESH_COOKIE_NAME),
    )
}

fn secure_attr(secure: bool) -> &'static str {
    if secure { "; Secure" } else { "" }
}

/// `Set-Cookie` value carrying a renewed access token.
pub fn access_cookie(renewal: &Renewal, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}{}",
        ACCESS_COOKIE_NAME,
        renewal.token,
        renewal.max_age,
        secure_attr(secure)
    )
}

/// `Set-Cookie` value that removes the named cookie.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0{}",
        name,
        secure_attr(secure)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_get_cookie_simple() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("accessToken=abc123"));

        assert_eq!(get_cookie(&headers, "accessToken"), Some("abc123"));
    }

    #[test]
    fn test_get_cookie_multiple() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; accessToken=abc123; refreshToken=xyz789"),
        );

        assert_eq!(get_cookie(&headers, "accessToken"), Some("abc123"));
        assert_eq!(get_cookie(&headers, "refreshToken"), Some("xyz789"));
        assert_eq!(get_cookie(&headers, "foo"), Some("bar"));
    }

    #[test]
    fn test_get_cookie_no_header() {
        let headers = HeaderMap::new();
        assert_eq!(get_cookie(&headers, "accessToken"), None);
    }

    #[test]
    fn test_get_cookie_with_spaces() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("  accessToken = abc123  ; foo=bar"),
        );

        assert_eq!(get_cookie(&headers, "accessToken"), Some("abc123"));
    }

    #[test]
    fn test_token_pair_with_only_refresh() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("refreshToken=r"));

        let pair = token_pair(&headers);
        assert_eq!(pair.access, None);
        assert_eq!(pair.refresh, Some("r"));
    }

    #[test]
    fn test_access_cookie_format() {
        let renewal = Renewal {
            token: "tok".to_string(),
            max_age: 300,
        };
        assert_eq!(
            access_cookie(&renewal, false),
            "accessToken=tok; HttpOnly; SameSite=Strict; Path=/; Max-Age=300"
        );
        assert!(access_cookie(&renewal, true).ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_format() {
        assert_eq!(
            clear_cookie(REFRESH_COOKIE_NAME, false),
            "refreshToken=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0"
        );
    }
}
