#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Value of the named `Set-Cookie` in a response, if present.
pub fn set_cookie_value(resp: &ServiceResponse<BoxBody>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Names of all cookies set by a response, in header order.
pub fn set_cookie_names(resp: &ServiceResponse<BoxBody>) -> Vec<String> {
    resp.response()
        .cookies()
        .map(|c| c.name().to_string())
        .collect()
}

/// Replace one character in the middle of the signature segment.
pub fn tamper_signature(token: &str) -> String {
    let (head, signature) = token
        .rsplit_once('.')
        .expect("token should have three segments");
    let mid = signature.len() / 2;
    let replacement = if &signature[mid..mid + 1] == "A" { "B" } else { "A" };
    format!(
        "{head}.{}{replacement}{}",
        &signature[..mid],
        &signature[mid + 1..]
    )
}

const B64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Flip the low bit of the final signature character. For HS256 that bit is
/// padding, so the base64 text no longer decodes canonically.
pub fn flip_last_signature_bit(token: &str) -> String {
    let last = *token.as_bytes().last().expect("non-empty token");
    let index = B64URL
        .iter()
        .position(|&c| c == last)
        .expect("signature is base64url");
    format!("{}{}", &token[..token.len() - 1], B64URL[index ^ 1] as char)
}

/// Replace one character in the middle of the header segment.
pub fn tamper_header(token: &str) -> String {
    let (header, rest) = token.split_once('.').expect("token should have three segments");
    let mid = header.len() / 2;
    let replacement = if &header[mid..mid + 1] == "A" { "B" } else { "A" };
    format!("{}{replacement}{}.{rest}", &header[..mid], &header[mid + 1..])
}
