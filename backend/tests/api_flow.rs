//! End-to-end HTTP tests over the full application with in-memory stores.

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use serde_json::{json, Value};

use shelfcheck_backend::domain::ports::{
    InMemoryChecklistRepository, InMemoryCustomProductRepository, InMemoryProductRepository,
    InMemorySettingsRepository, InMemoryUserRepository,
};
use shelfcheck_backend::domain::{
    AccountService, CatalogService, ChecklistService, JanCode, Mode, Product, SettingsService,
    TokenService, UserAccount,
};
use shelfcheck_backend::inbound::http::HttpState;
use shelfcheck_backend::server::build_app;

fn product(code: &str, name: &str) -> Product {
    Product {
        jancode: JanCode::new(code).expect("valid code"),
        name: name.to_owned(),
        dateline: None,
        date_discount: 30,
        date_recall: 20,
    }
}

fn seeded_state() -> web::Data<HttpState> {
    let tokens = Arc::new(TokenService::new("integration-test-secret"));
    let users = Arc::new(InMemoryUserRepository::with_accounts([
        UserAccount::new("alice", "pw123", Mode::ZERO),
        UserAccount::new("bob", "pw456", Mode::ONE),
    ]));
    let products = Arc::new(InMemoryProductRepository::with_products([
        product("4901234567890", "牛乳"),
        product("4909876543210", "食パン"),
    ]));
    let custom_products = Arc::new(InMemoryCustomProductRepository::new());
    let checklists = Arc::new(InMemoryChecklistRepository::new());
    let settings = Arc::new(InMemorySettingsRepository::new());

    web::Data::new(HttpState {
        accounts: Arc::new(AccountService::new(users, tokens.clone())),
        catalog: Arc::new(CatalogService::new(products.clone(), custom_products)),
        checklists: Arc::new(ChecklistService::new(checklists, products)),
        settings: Arc::new(SettingsService::new(settings)),
        tokens,
    })
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(build_app($state.clone(), &[])).await
    };
}

async fn login_token(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<actix_web::body::BoxBody>,
        >,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["token"].as_str().expect("token in response").to_owned()
}

#[actix_web::test]
async fn root_greets_in_plain_text() {
    let state = seeded_state();
    let app = test_app!(state);
    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(test::read_body(res).await, "Hello, World!");
}

#[actix_web::test]
async fn login_returns_user_and_token_without_password() {
    let state = seeded_state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "pw123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["mode"], 0);
    assert!(body["token"].as_str().is_some());
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn login_validates_and_rejects_bad_credentials() {
    let state = seeded_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Username and password are required");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "wrong" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[actix_web::test]
async fn protected_routes_demand_a_valid_token() {
    let state = seeded_state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/products").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Token required");

    // Tamper with one character of a real token.
    let token = login_token(&app, "alice", "pw123").await;
    let mut tampered = token.clone();
    let last = tampered.pop().expect("non-empty token");
    tampered.push(if last == 'x' { 'y' } else { 'x' });
    let req = test::TestRequest::get()
        .uri("/products")
        .insert_header((header::AUTHORIZATION, format!("Bearer {tampered}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid token");

    let req = test::TestRequest::get()
        .uri("/products")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn checklist_lifecycle_create_list_update_relist() {
    let state = seeded_state();
    let app = test_app!(state);
    let token = login_token(&app, "alice", "pw123").await;
    let auth = (header::AUTHORIZATION, format!("Bearer {token}"));

    // Create: first checklist on an empty store gets id 1.
    let req = test::TestRequest::post()
        .uri("/create-checklist")
        .insert_header(auth.clone())
        .set_json(json!({ "jancodes": ["4901234567890", "no-such-code"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["checklist_id"], 1);
    assert_eq!(data["status"], 0);
    assert_eq!(data["user"], "alice");
    assert_eq!(data["details"][0]["jancode"], "4901234567890");
    assert_eq!(data["details"][0]["name"], "牛乳");
    assert_eq!(data["details"][0]["dateline"], Value::Null);
    assert_eq!(data["details"][1]["name"], Value::Null);

    // List: the checklist comes back with its detail count.
    let req = test::TestRequest::get()
        .uri("/checklists")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
    assert_eq!(body[0]["total"], 2);

    // Update one detail; checklistId arrives as a JSON number.
    let req = test::TestRequest::post()
        .uri("/update-product")
        .insert_header(auth.clone())
        .set_json(json!({
            "checklistId": 1,
            "jancode": "4901234567890",
            "dateline": "2026-09-01"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "success": true }));

    // Relist: dateline recorded, update instant set.
    let req = test::TestRequest::get()
        .uri("/checklists")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let updated = &body[0]["details"][0];
    assert_eq!(updated["dateline"], "2026-09-01");
    assert!(updated["datetime"].as_str().is_some());

    // Unmatched pair stays a 404 and string identifiers are accepted.
    let req = test::TestRequest::post()
        .uri("/update-product")
        .insert_header(auth.clone())
        .set_json(json!({
            "checklistId": "99",
            "jancode": "4901234567890",
            "dateline": "2026-09-01"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Checklist detail not found");
}

#[actix_web::test]
async fn create_checklist_rejects_empty_and_missing_code_lists() {
    let state = seeded_state();
    let app = test_app!(state);
    let token = login_token(&app, "alice", "pw123").await;

    for payload in [json!({ "jancodes": [] }), json!({})] {
        let req = test::TestRequest::post()
            .uri("/create-checklist")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "jancodes must be a non-empty array");
    }
}

#[actix_web::test]
async fn unknown_code_registration_returns_placeholder_and_audit_row() {
    let state = seeded_state();
    let app = test_app!(state);
    let token = login_token(&app, "alice", "pw123").await;
    let auth = (header::AUTHORIZATION, format!("Bearer {token}"));

    let req = test::TestRequest::post()
        .uri("/create-product")
        .insert_header(auth.clone())
        .set_json(json!({ "jancode": "4900000000001", "dateline": "2026-10-01" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["product"]["name"], "商品マスタなし");
    assert_eq!(body["product"]["date_discount"], 60);
    assert_eq!(body["product"]["date_recall"], 40);
    assert_eq!(body["customProduct"]["user"], "alice");

    let req = test::TestRequest::get()
        .uri("/custom-products")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
    assert_eq!(body[0]["dateline"], "2026-10-01");

    // The placeholder is now fetchable without authentication.
    let req = test::TestRequest::get()
        .uri("/product/4900000000001")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "商品マスタなし");

    let req = test::TestRequest::get().uri("/product/no-such").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn registering_a_known_code_keeps_the_master_record() {
    let state = seeded_state();
    let app = test_app!(state);
    let token = login_token(&app, "alice", "pw123").await;

    let req = test::TestRequest::post()
        .uri("/create-product")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({ "jancode": "4901234567890", "dateline": "2026-10-01" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);

    let req = test::TestRequest::get()
        .uri("/product/4901234567890")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "牛乳");
}

#[actix_web::test]
async fn mode_toggle_is_an_involution_over_http() {
    let state = seeded_state();
    let app = test_app!(state);

    for expected in [1, 0] {
        let req = test::TestRequest::post()
            .uri("/change-mode")
            .set_json(json!({ "username": "alice" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["mode"], expected);
        assert!(body.get("password").is_none());
    }

    let req = test::TestRequest::post()
        .uri("/change-mode")
        .set_json(json!({ "username": "nobody" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "User not found");
}

#[actix_web::test]
async fn user_listing_never_exposes_passwords() {
    let state = seeded_state();
    let app = test_app!(state);
    let req = test::TestRequest::get().uri("/all-user").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let users = body.as_array().expect("array");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("password").is_none()));
}

#[actix_web::test]
async fn settings_round_trip_and_missing_id_handling() {
    let state = seeded_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/settings-ocr")
        .set_json(json!({ "value": "lang=jpn" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["value"], "lang=jpn");
    let id = body["id"].as_str().expect("id in response").to_owned();

    let req = test::TestRequest::get().uri("/settings-ocr").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().expect("array").len(), 1);

    let req = test::TestRequest::post()
        .uri("/delete-settings-ocr")
        .set_json(json!({ "id": id }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "success": true }));

    // Deleting again finds nothing.
    let req = test::TestRequest::post()
        .uri("/delete-settings-ocr")
        .set_json(json!({ "id": id }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "settings_ocr not found");

    let req = test::TestRequest::post()
        .uri("/delete-settings-ocr")
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "id is required");

    let req = test::TestRequest::post()
        .uri("/settings-ocr")
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Value is required");
}

#[actix_web::test]
async fn search_checklists_samples_the_whole_small_catalog() {
    let state = seeded_state();
    let app = test_app!(state);
    let req = test::TestRequest::get().uri("/search-checklists").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let sampled = body.as_array().expect("array");
    // Two seeded products: the sample is clamped to the catalog size.
    assert_eq!(sampled.len(), 2);
    assert!(sampled.iter().all(|p| p["dateline"] == "null" && p["datetime"] == "null"));
}
