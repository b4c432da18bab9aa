mod common;

use common::Harness;
use serde_json::json;
use storefront_sdk::storefront_auth::{LoginCredentials, Registration, Role};
use storefront_sdk::storefront_commerce::catalog::ImageFile;
use storefront_sdk::storefront_data::Method;

#[tokio::test]
async fn test_login_stores_session() {
    let h = Harness::new();
    h.transport.respond(
        Method::Post,
        "/auth/login",
        200,
        json!({"_id": "u1", "name": "Ada", "email": "ada@shop.test", "role": "admin", "token": "jwt-1"}),
    );

    let user = h
        .shop
        .auth
        .login(&LoginCredentials::new("ada@shop.test", "pw"))
        .await
        .unwrap();
    assert!(user.is_admin());
    assert!(h.shop.auth.is_authenticated().unwrap());
    assert!(h.shop.auth.is_admin().unwrap());
    assert_eq!(h.storage.get_string("token").unwrap().as_deref(), Some("jwt-1"));

    let body = h.transport.last().request_body().as_json().unwrap();
    assert_eq!(body, json!({"email": "ada@shop.test", "password": "pw"}));
}

#[tokio::test]
async fn test_login_without_token_is_not_stored() {
    let h = Harness::new();
    h.transport.respond(
        Method::Post,
        "/auth/login",
        200,
        json!({"name": "Ada", "email": "ada@shop.test", "message": "verify your email"}),
    );

    h.shop
        .auth
        .login(&LoginCredentials::new("ada@shop.test", "pw"))
        .await
        .unwrap();
    assert!(!h.shop.auth.is_authenticated().unwrap());
    assert!(h.shop.auth.current_user().unwrap().is_none());
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    let h = Harness::new();
    h.transport.respond(
        Method::Post,
        "/auth/login",
        400,
        json!({"message": "Invalid email or password"}),
    );

    let err = h
        .shop
        .auth
        .login(&LoginCredentials::new("ada@shop.test", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message("Login failed"), "Invalid email or password");
    assert!(!h.shop.auth.is_authenticated().unwrap());
}

#[tokio::test]
async fn test_register_sends_multipart() {
    let h = Harness::new();
    h.transport.respond(
        Method::Post,
        "/auth/register",
        201,
        json!({"_id": "u2", "name": "Bo", "email": "bo@shop.test", "role": "user", "token": "jwt-2"}),
    );

    let registration = Registration::new("Bo", "bo@shop.test", "pw")
        .with_profile_image(ImageFile::new("bo.webp", vec![1, 2, 3]));
    let user = h.shop.auth.register(&registration).await.unwrap();
    assert_eq!(user.role, Role::User);

    let request = h.transport.last();
    let form = request.request_body().as_multipart().unwrap();
    assert_eq!(form.text_values("name"), vec!["Bo"]);
    assert_eq!(form.parts().last().unwrap().name(), "profileImage");
    assert_eq!(h.shop.auth.current_user().unwrap().unwrap().email, "bo@shop.test");
}

#[tokio::test]
async fn test_logout_drops_bearer_header() {
    let h = Harness::new();
    h.login_as(Role::User);
    h.transport
        .respond(Method::Get, "/products/hat", 200, json!({"_id": "p1"}));

    h.shop.products.get_product_by_slug("hat").await.unwrap();
    assert!(h.transport.last().header_value("Authorization").is_some());

    h.shop.auth.logout().unwrap();
    h.shop.products.get_product_by_slug("hat").await.unwrap();
    assert!(h.transport.last().header_value("Authorization").is_none());
}
