use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};

use broker_crm::repository::ApiRepository;
use broker_crm::repository::http::HttpApi;
use broker_crm::routes::{alert_level_to_str, allocations, clients, redirect};

/// Repository that never gets called: the tests below fail validation
/// before any request is issued.
fn idle_repo() -> ApiRepository {
    ApiRepository::new(HttpApi::new("http://127.0.0.1:9/api").unwrap())
}

fn flash_framework() -> FlashMessagesFramework {
    let store = CookieMessageStore::builder(Key::from(&[0u8; 64])).build();
    FlashMessagesFramework::builder(store).build()
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

#[actix_web::test]
async fn invalid_client_save_redirects_back_to_the_same_page() {
    let app = test::init_service(
        App::new()
            .wrap(flash_framework())
            .app_data(web::Data::new(idle_repo()))
            .service(clients::save_client),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/clients/save?page=2")
        .set_form([
            ("id", "21"),
            ("name", "A"),
            ("email", "carla@example.com"),
            ("status", "ativo"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    // The edit target lives on page 2, so the redirect must keep the page
    // for the modal to re-open on it.
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/clients?page=2&edit=21"));
}

#[actix_web::test]
async fn invalid_allocation_save_redirects_back_to_the_same_page() {
    let app = test::init_service(
        App::new()
            .wrap(flash_framework())
            .app_data(web::Data::new(idle_repo()))
            .service(allocations::save_allocation),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/clients/42/allocations/7/save?page=3")
        .set_form([("quantity", "0")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/clients/42?page=3&edit=7"));
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[::core::prelude::v1::test]
fn redirect_is_a_see_other_with_location() {
    let response = redirect("/clients/42");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/clients/42")
    );
}
