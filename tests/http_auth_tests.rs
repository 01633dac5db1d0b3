mod common;

use actix_web::{get, http::StatusCode, test, web, App, HttpResponse};
use serde_json::Value;

use quizit_server::{
    auth::{AdminUser, AuthMiddleware, AuthenticatedUser, JwtAuthentication},
    errors::AppError,
};

use common::jwt_service;

#[get("/private")]
async fn private_route(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "id": auth.0.id })))
}

#[get("/admin/private")]
async fn admin_route(_admin: AdminUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().finish())
}

#[get("/public")]
async fn public_route() -> HttpResponse {
    HttpResponse::Ok().finish()
}

macro_rules! test_app {
    ($jwt:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($jwt.clone()))
                .wrap(AuthMiddleware)
                .service(private_route)
                .service(admin_route)
                .service(public_route),
        )
        .await
    };
}

#[actix_web::test]
async fn anonymous_requests_pass_public_routes() {
    let jwt = jwt_service();
    let app = test_app!(jwt);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/public").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_bearer_yields_401_with_error_body() {
    let jwt = jwt_service();
    let app = test_app!(jwt);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/private").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 401);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn invalid_bearer_is_treated_as_anonymous() {
    let jwt = jwt_service();
    let app = test_app!(jwt);

    // A bad token never aborts at the gate; it surfaces as 401 only where a
    // principal is required.
    let req = test::TestRequest::get()
        .uri("/private")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/public")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn valid_bearer_reaches_the_handler() {
    let jwt = jwt_service();
    let app = test_app!(jwt);

    let token = jwt
        .create_access_token(&JwtAuthentication::new("user-1", vec!["USER".to_string()]))
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/private")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "user-1");
}

#[actix_web::test]
async fn admin_route_rejects_plain_users_with_403() {
    let jwt = jwt_service();
    let app = test_app!(jwt);

    let token = jwt
        .create_access_token(&JwtAuthentication::new("user-1", vec!["USER".to_string()]))
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/admin/private")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 403);
}

#[actix_web::test]
async fn admin_route_admits_admins() {
    let jwt = jwt_service();
    let app = test_app!(jwt);

    let token = jwt
        .create_access_token(&JwtAuthentication::new("admin-1", vec!["ADMIN".to_string()]))
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/admin/private")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
