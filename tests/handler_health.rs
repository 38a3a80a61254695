mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_check_success() {
    let app = common::spawn_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_health_is_not_a_slug() {
    let app = common::spawn_app();

    let response = app.server.get("/health").await;

    assert!(response.headers().get("location").is_none());
}
