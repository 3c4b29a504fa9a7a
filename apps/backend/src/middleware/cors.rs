use actix_cors::Cors;
use actix_web::http::header;

const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS for a cookie-authenticated browser client.
///
/// Credentials are allowed, so origins are always listed explicitly. Entries
/// that are not http(s) origins are ignored; with none left, only the local
/// dev origins are allowed.
pub fn cors_middleware(configured_origins: &[String]) -> Cors {
    let mut origins: Vec<&str> = configured_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();
    if origins.is_empty() {
        origins = LOCAL_ORIGINS.to_vec();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .supports_credentials()
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
