//! Integration tests for the IP allow-list middleware

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use std::net::SocketAddr;

use otp_api::middleware::IpAllowList;
use otp_shared::errors::ErrorResponse;

async fn ok_handler() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn peer(addr: &str) -> SocketAddr {
    addr.parse().unwrap()
}

#[actix_web::test]
async fn test_listed_peer_passes() {
    let app = test::init_service(
        App::new()
            .wrap(IpAllowList::new(["10.0.0.5"]))
            .route("/send", web::post().to(ok_handler)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send")
        .peer_addr(peer("10.0.0.5:50000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unlisted_peer_is_forbidden() {
    let app = test::init_service(
        App::new()
            .wrap(IpAllowList::new(["10.0.0.5"]))
            .route("/send", web::post().to(ok_handler)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send")
        .peer_addr(peer("203.0.113.7:50000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "IP_NOT_ALLOWED");
    assert_eq!(body.message, "IP not allowed");
}

#[actix_web::test]
async fn test_loopback_always_passes() {
    let app = test::init_service(
        App::new()
            .wrap(IpAllowList::new(["10.0.0.5"]))
            .route("/send", web::post().to(ok_handler)),
    )
    .await;

    for addr in ["127.0.0.1:4000", "[::1]:4000"] {
        let req = test::TestRequest::post()
            .uri("/send")
            .peer_addr(peer(addr))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "peer {}", addr);
    }
}

#[actix_web::test]
async fn test_forwarded_header_is_ignored() {
    let app = test::init_service(
        App::new()
            .wrap(IpAllowList::new(["10.0.0.5"]))
            .route("/send", web::post().to(ok_handler)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send")
        .insert_header(("X-Forwarded-For", "10.0.0.5"))
        .peer_addr(peer("203.0.113.7:50000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_empty_list_allows_all() {
    let app = test::init_service(
        App::new()
            .wrap(IpAllowList::allow_all())
            .route("/send", web::post().to(ok_handler)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/send")
        .peer_addr(peer("203.0.113.7:50000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
