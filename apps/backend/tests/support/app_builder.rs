use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::config::db::DbKind;
use backend::infra::state::build_state;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

/// Fresh in-memory database, migrated, with the given security settings.
pub async fn test_state(security: SecurityConfig) -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(security)
        .build()
        .await
        .expect("test state should build")
}

/// Production routes behind the same tracing middleware `main` installs.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
