//! Account helpers driving the real signup endpoint.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use serde_json::json;

use crate::common::set_cookie_value;

/// What a successful signup hands back to the client.
#[derive(Debug, Clone)]
pub struct SignedUp {
    pub user_id: String,
    pub token: String,
    pub username: String,
}

pub async fn signup<S>(app: &S, name: &str, email: &str, password: &str) -> SignedUp
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "signup should succeed");

    let token = set_cookie_value(&resp, "token").expect("token cookie");
    let username = set_cookie_value(&resp, "username").expect("username cookie");
    let cookie_user_id = set_cookie_value(&resp, "userID").expect("userID cookie");

    let body: serde_json::Value = test::read_body_json(resp).await;
    let user_id = body["user_id"].as_str().expect("user_id").to_string();
    assert_eq!(cookie_user_id, user_id);

    SignedUp {
        user_id,
        token,
        username,
    }
}
