//! Cookie carrier for the session token and the advisory display values.
//!
//! `userID` and `username` are convenience copies for the client. They are
//! never read for authorization; the verified token subject is.

use actix_web::cookie::{Cookie, Expiration, SameSite};
use time::{Duration, OffsetDateTime};

use super::jwt::MintedToken;

pub const TOKEN_COOKIE: &str = "token";
pub const USER_ID_COOKIE: &str = "userID";
pub const USERNAME_COOKIE: &str = "username";

/// One carrier cookie with the shared attribute set.
pub fn carrier_cookie(name: &'static str, value: &str, expires: OffsetDateTime) -> Cookie<'static> {
    Cookie::build(name, cookie_safe(value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .expires(Expiration::DateTime(expires))
        .finish()
}

/// All three cookies for a newly minted token.
pub fn session_cookies(minted: &MintedToken, user_id: &str, username: &str) -> [Cookie<'static>; 3] {
    [
        carrier_cookie(TOKEN_COOKIE, &minted.token, minted.expires_at),
        carrier_cookie(USER_ID_COOKIE, user_id, minted.expires_at),
        carrier_cookie(USERNAME_COOKIE, username, minted.expires_at),
    ]
}

/// Refresh only the display cookies, keeping the existing token's expiry.
pub fn identity_cookies(user_id: &str, username: &str, expires: OffsetDateTime) -> [Cookie<'static>; 2] {
    [
        carrier_cookie(USER_ID_COOKIE, user_id, expires),
        carrier_cookie(USERNAME_COOKIE, username, expires),
    ]
}

/// Empty, already-expired replacements for all three cookies.
pub fn cleared_cookies() -> [Cookie<'static>; 3] {
    [TOKEN_COOKIE, USER_ID_COOKIE, USERNAME_COOKIE].map(|name| {
        let mut cookie = carrier_cookie(name, "", OffsetDateTime::UNIX_EPOCH);
        cookie.set_max_age(Duration::ZERO);
        cookie
    })
}

// Cookie values cannot carry separators or quotes.
fn cookie_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ';' | ',' | '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
