use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use postpage_rs::config::{SiteConfig, StoreBackend};
use postpage_rs::pages::resolve_paths;
use postpage_rs::server::router;
use postpage_rs::store::FileStore;
use postpage_rs::Site;

fn fixture_site() -> Site {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let store = FileStore::open(fixtures.join("dataset.json")).unwrap();

    let mut config = SiteConfig::default();
    config.store.backend = StoreBackend::File;
    config.store.project_id = "proj".to_string();
    Site::with_store(&fixtures, config, Arc::new(store))
}

async fn get(site: &Site, uri: &str) -> (StatusCode, Option<String>, String) {
    let pages = Arc::new(site.pages());
    let app = router(site.clone(), pages);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, cache_control, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn every_resolved_path_renders() {
    let site = fixture_site();
    let paths = resolve_paths(site.store.as_ref(), site.config.fallback)
        .await
        .unwrap();
    assert_eq!(paths.paths, vec!["analytical-engine", "quiet"]);

    for slug in &paths.paths {
        let (status, _, body) = get(&site, &format!("/post/{}", slug)).await;
        assert_eq!(status, StatusCode::OK, "{}", slug);
        assert!(body.contains("<article"));
    }
}

#[tokio::test]
async fn post_page_content() {
    let site = fixture_site();
    let (status, cache_control, body) = get(&site, "/post/analytical-engine").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_control.as_deref(),
        Some("s-maxage=5, stale-while-revalidate")
    );
    assert!(body.contains("<title>Notes on the Analytical Engine | Medium</title>"));
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("https://cdn.sanity.io/images/proj/production/engine01-1600x600.jpg"));
    assert!(body.contains(concat!(
        r#"<a class="text-blue-500 hover:underline" "#,
        r#"href="https://en.wikipedia.org/wiki/Analytical_engine">Wikipedia</a>"#
    )));
    assert!(body.contains(r#"<div data-block-type="code"></div>"#));

    let heading = body.find(">The Engine</h1>").unwrap();
    let item = body.find("<em>Bernoulli numbers</em>").unwrap();
    assert!(heading < item);
}

#[tokio::test]
async fn only_approved_comments_are_rendered() {
    let site = fixture_site();
    let (_, _, body) = get(&site, "/post/analytical-engine").await;

    assert!(body.contains("A fine translation"));
    assert!(body.contains("Comments (1)"));
    assert!(!body.contains("Buy cheap gears"));
    assert!(!body.contains("charles@example.com"));
}

#[tokio::test]
async fn post_without_comments_renders_empty_panel() {
    let site = fixture_site();
    let (status, _, body) = get(&site, "/post/quiet").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Comments (0)"));
    assert!(body.contains("No comments yet."));
    assert!(body.contains("data-comments-open"));
    assert!(body.contains("data-comments-close"));
}

#[tokio::test]
async fn panel_open_through_query() {
    let site = fixture_site();
    let (_, _, closed) = get(&site, "/post/quiet").await;
    let (_, _, open) = get(&site, "/post/quiet?comments=open").await;

    assert!(closed.contains(r#"aria-hidden="true""#));
    assert!(open.contains(r#"aria-hidden="false""#));
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let site = fixture_site();
    let (status, cache_control, body) = get(&site, "/post/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(cache_control.is_none());
    assert!(body.contains("This page could not be found."));
}

#[tokio::test]
async fn encoded_traversal_slug_is_404() {
    let site = fixture_site();
    let (status, _, _) = get(&site, "/post/..%2Fquiet").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_routes_are_404() {
    let site = fixture_site();
    let (status, _, _) = get(&site, "/nothing/here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
