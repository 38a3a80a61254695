#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use shortlink::application::services::{AuthService, LinkResolver, LinkService};
use shortlink::domain::repositories::{AccountRepository, LinkRepository};
use shortlink::infrastructure::auth::JwtAuthority;
use shortlink::infrastructure::persistence::{MemoryAccountRepository, MemoryLinkRepository};
use shortlink::infrastructure::qr::SvgQrRenderer;
use shortlink::routes::router;
use shortlink::state::AppState;
use shortlink::utils::slug_generator::RandomSlugGenerator;
use std::sync::Arc;

pub const BASE_URL: &str = "https://sho.rt";
pub const FALLBACK_URL: &str = "/";
pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<MemoryLinkRepository>,
    pub accounts: Arc<MemoryAccountRepository>,
}

/// Memory-backed state plus handles on the repositories for direct assertions.
pub fn create_test_state() -> (
    AppState,
    Arc<MemoryLinkRepository>,
    Arc<MemoryAccountRepository>,
) {
    let links = Arc::new(MemoryLinkRepository::new());
    let accounts = Arc::new(MemoryAccountRepository::new());
    let authority = Arc::new(JwtAuthority::new(JWT_SECRET, 1));

    let link_repo: Arc<dyn LinkRepository> = links.clone();
    let account_repo: Arc<dyn AccountRepository> = accounts.clone();

    let link_service = Arc::new(LinkService::new(
        link_repo.clone(),
        Arc::new(RandomSlugGenerator),
        6,
        BASE_URL,
    ));
    let resolver = Arc::new(LinkResolver::new(link_repo));
    let auth_service = Arc::new(AuthService::new(account_repo, authority.clone(), authority));

    let state = AppState::new(
        link_service,
        resolver,
        auth_service,
        Arc::new(SvgQrRenderer),
        FALLBACK_URL,
    );

    (state, links, accounts)
}

pub fn spawn_app() -> TestApp {
    let (state, links, accounts) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    TestApp {
        server,
        links,
        accounts,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Registers an account and returns its token and id.
pub async fn register(server: &TestServer, email: &str) -> (String, i64) {
    let response = server
        .post("/api/register")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<Value>();
    let token = body["token"].as_str().unwrap().to_string();
    let id = body["account"]["id"].as_i64().unwrap();
    (token, id)
}

/// Shortens a URL, optionally as an account, returning the response body.
pub async fn shorten(
    server: &TestServer,
    token: Option<&str>,
    original_url: &str,
    slug: Option<&str>,
) -> axum_test::TestResponse {
    let mut body = json!({ "original_url": original_url });
    if let Some(slug) = slug {
        body["slug"] = json!(slug);
    }

    let mut request = server.post("/api/shorten").json(&body);
    if let Some(token) = token {
        request = request.add_header("Authorization", bearer(token));
    }

    request.await
}
