use actix_web::web;

pub mod auth;
pub mod todos;

/// Register every application route. `main` and the integration tests share
/// this so both exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .service(web::scope("/api/auth").configure(auth::configure_routes))
        .service(web::scope("/api/todos").configure(todos::configure_routes));
}
