//! Tests for the outbound link probe
//!
//! These use wiremock to stand in for the target sites, covering HEAD-based
//! link validation and GET-based title extraction.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bookmarks::fetch::{HttpLinkProbe, LinkProbe};

#[tokio::test]
async fn validate_link_accepts_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let probe = HttpLinkProbe::new().unwrap();
    assert!(probe.validate_link(&format!("{}/page", server.uri())).await);
}

#[tokio::test]
async fn validate_link_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/elsewhere"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // The client follows the redirect; the final status decides
    let probe = HttpLinkProbe::new().unwrap();
    assert!(probe.validate_link(&format!("{}/moved", server.uri())).await);
}

#[tokio::test]
async fn validate_link_rejects_redirect_to_missing_target() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/dangling"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/gone"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let probe = HttpLinkProbe::new().unwrap();
    assert!(!probe.validate_link(&format!("{}/dangling", server.uri())).await);
}

#[tokio::test]
async fn validate_link_rejects_4xx_and_5xx() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let probe = HttpLinkProbe::new().unwrap();
    assert!(!probe.validate_link(&format!("{}/missing", server.uri())).await);
    assert!(!probe.validate_link(&format!("{}/broken", server.uri())).await);
}

#[tokio::test]
async fn validate_link_rejects_unreachable_host() {
    let probe = HttpLinkProbe::new().unwrap();
    // Discard port; connection is refused immediately
    assert!(!probe.validate_link("http://127.0.0.1:9/").await);
}

#[tokio::test]
async fn fetch_title_extracts_title_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(
                    "<html><head><title>An Article</title></head><body>hi</body></html>",
                ),
        )
        .mount(&server)
        .await;

    let probe = HttpLinkProbe::new().unwrap();
    let title = probe
        .fetch_title(&format!("{}/article", server.uri()))
        .await
        .unwrap();
    assert_eq!(title, "An Article");
}

#[tokio::test]
async fn fetch_title_returns_empty_for_untitled_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bare"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><body><p>nothing here</p></body></html>"),
        )
        .mount(&server)
        .await;

    let probe = HttpLinkProbe::new().unwrap();
    let title = probe
        .fetch_title(&format!("{}/bare", server.uri()))
        .await
        .unwrap();
    assert_eq!(title, "");
}

#[tokio::test]
async fn fetch_title_ignores_response_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("content-type", "text/html")
                .set_body_string("<title>Not Found Page</title>"),
        )
        .mount(&server)
        .await;

    // An error page that carries a title still yields that title
    let probe = HttpLinkProbe::new().unwrap();
    let title = probe
        .fetch_title(&format!("{}/gone", server.uri()))
        .await
        .unwrap();
    assert_eq!(title, "Not Found Page");
}

#[tokio::test]
async fn fetch_title_errors_on_unreachable_host() {
    let probe = HttpLinkProbe::new().unwrap();
    assert!(probe.fetch_title("http://127.0.0.1:9/").await.is_err());
}
