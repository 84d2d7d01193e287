//! End-to-end navigation against a running server.

use reqwest::StatusCode;
use spa_router::config::AppConfig;

mod common;

async fn mounted_view(res: reqwest::Response) -> String {
    assert_eq!(res.status(), StatusCode::OK);
    let view = res.headers()["x-view"].to_str().unwrap().to_string();
    let body = res.text().await.unwrap();
    assert!(body.contains(&format!("data-view=\"{}\"", view)));
    view
}

#[tokio::test]
async fn test_config_mounts_config_view() {
    let server = common::start_server(AppConfig::default()).await;
    let res = common::no_redirect_client()
        .get(server.url("/config"))
        .send()
        .await
        .unwrap();
    assert_eq!(mounted_view(res).await, "Config");
    server.stop().await;
}

#[tokio::test]
async fn test_nonexistent_redirects_to_home() {
    let server = common::start_server(AppConfig::default()).await;

    let res = common::no_redirect_client()
        .get(server.url("/nonexistent"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/");

    let res = common::browser_client()
        .get(server.url("/nonexistent"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.url().path(), "/");
    assert_eq!(mounted_view(res).await, "Home");

    server.stop().await;
}

#[tokio::test]
async fn test_root_mounts_home_without_redirect() {
    let server = common::start_server(AppConfig::default()).await;
    let res = common::no_redirect_client()
        .get(server.url("/"))
        .send()
        .await
        .unwrap();
    assert_eq!(mounted_view(res).await, "Home");
    server.stop().await;
}

#[tokio::test]
async fn test_export_mounts_export_view() {
    let server = common::start_server(AppConfig::default()).await;
    let res = common::no_redirect_client()
        .get(server.url("/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(mounted_view(res).await, "Export");
    server.stop().await;
}

#[tokio::test]
async fn test_every_literal_and_nothing_else() {
    let server = common::start_server(AppConfig::default()).await;
    let client = common::no_redirect_client();

    for (path, view) in [
        ("/config", "Config"),
        ("/import", "Import"),
        ("/preview", "Preview"),
        ("/delete", "Delete"),
        ("/export", "Export"),
        ("/mapping", "Mapping"),
        ("/", "Home"),
    ] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(mounted_view(res).await, view, "path {}", path);
    }

    for path in ["/Config", "/import/", "/preview/1", "/index.html", "/deletes"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "path {}", path);
        assert_eq!(res.headers()["location"], "/", "path {}", path);
    }

    server.stop().await;
}

#[tokio::test]
async fn test_redirect_preserves_query() {
    let server = common::start_server(AppConfig::default()).await;
    let res = common::no_redirect_client()
        .get(server.url("/old-page?utm=newsletter"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["location"], "/?utm=newsletter");
    server.stop().await;
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = common::start_server(AppConfig::default()).await;
    let res = common::no_redirect_client()
        .get(server.url("/mapping"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");
    server.stop().await;
}
