//! Session cookie transport.
//!
//! The signed token is the only client-side state; this module only moves it
//! in and out of `Cookie` / `Set-Cookie` headers.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use sso_shared::config::{CookieSettings, SameSite};

#[derive(Debug, Clone)]
pub struct SessionTransport {
    name: String,
    path: String,
    secure: bool,
    same_site: SameSite,
    max_age_seconds: i64,
}

impl SessionTransport {
    /// `max_age_seconds` should match the token lifetime.
    pub fn new(settings: &CookieSettings, max_age_seconds: i64) -> Self {
        Self {
            name: settings.name.clone(),
            path: settings.path.clone(),
            secure: settings.secure,
            same_site: settings.same_site,
            max_age_seconds,
        }
    }

    /// Append a `Set-Cookie` carrying `token`.
    pub fn attach(&self, token: &str, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
        headers.append(SET_COOKIE, self.render(token, self.max_age_seconds)?);
        Ok(())
    }

    /// Append a `Set-Cookie` that makes the client drop the session cookie.
    pub fn clear(&self, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
        headers.append(SET_COOKIE, self.render("", 0)?);
        Ok(())
    }

    /// Missing header, missing cookie and empty value all mean "no session".
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| {
                let (key, val) = pair.trim().split_once('=')?;
                (key.trim() == self.name).then(|| val.trim().trim_matches('"'))
            })
            .find(|val| !val.is_empty())
            .map(str::to_string)
    }

    fn render(&self, value: &str, max_age: i64) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{}={}; Path={}; HttpOnly; SameSite={}; Max-Age={}",
            self.name,
            value,
            self.path,
            self.same_site.as_str(),
            max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(secure: bool, same_site: SameSite) -> SessionTransport {
        SessionTransport::new(
            &CookieSettings {
                name: "sso_session".into(),
                path: "/".into(),
                secure,
                same_site,
            },
            3600,
        )
    }

    fn set_cookie(headers: &HeaderMap) -> &str {
        headers.get(SET_COOKIE).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_attach_writes_http_only_cookie() {
        let mut headers = HeaderMap::new();
        transport(false, SameSite::Strict)
            .attach("abc.def.ghi", &mut headers)
            .unwrap();
        assert_eq!(
            set_cookie(&headers),
            "sso_session=abc.def.ghi; Path=/; HttpOnly; SameSite=Strict; Max-Age=3600"
        );
    }

    #[test]
    fn test_secure_and_lax_flags() {
        let mut headers = HeaderMap::new();
        transport(true, SameSite::Lax).attach("t", &mut headers).unwrap();
        let cookie = set_cookie(&headers);
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_clear_empties_value_and_max_age() {
        let mut headers = HeaderMap::new();
        transport(false, SameSite::Strict).clear(&mut headers).unwrap();
        let cookie = set_cookie(&headers);
        assert!(cookie.starts_with("sso_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; sso_session=tok.en.value; other=1"),
        );
        assert_eq!(
            transport(false, SameSite::Strict).extract(&headers).as_deref(),
            Some("tok.en.value")
        );
    }

    #[test]
    fn test_extract_across_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("sso_session=xyz"));
        assert_eq!(
            transport(false, SameSite::Strict).extract(&headers).as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn test_extract_absent_is_none() {
        let transport = transport(false, SameSite::Strict);
        assert_eq!(transport.extract(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sso_session=; sso_session_x=1"));
        assert_eq!(transport.extract(&headers), None);
    }
}
