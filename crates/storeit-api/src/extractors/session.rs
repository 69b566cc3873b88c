//! Session cookie helpers.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use storeit_core::config::SessionConfig;

/// Builds the cookie that carries a provider session secret.
pub fn session_cookie(config: &SessionConfig, secret: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), secret))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.secure)
        .path("/")
        .build()
}

/// Adds a removal cookie for the session to `jar`.
pub fn clear_session_cookie(jar: CookieJar, config: &SessionConfig) -> CookieJar {
    jar.remove(Cookie::build((config.cookie_name.clone(), "")).path("/"))
}

/// The session secret carried by the request, if any.
pub fn session_secret(jar: &CookieJar, config: &SessionConfig) -> Option<String> {
    jar.get(&config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|secret| !secret.is_empty())
}
