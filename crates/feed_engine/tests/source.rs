use std::time::Duration;

use chrono::NaiveDate;
use feed_core::{FeedQuery, FetchKind, PageRequest, RequestId};
use feed_engine::{endpoint_url, FailureKind, RepositorySource, ReqwestSource, SourceSettings};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(query: FeedQuery, offset: usize) -> PageRequest {
    PageRequest {
        id: RequestId(1),
        kind: FetchKind::Initial,
        query,
        offset,
        limit: 20,
        fresh: false,
    }
}

fn trending() -> FeedQuery {
    FeedQuery::default()
}

fn source_for(server: &MockServer) -> ReqwestSource {
    ReqwestSource::new(SourceSettings {
        base_url: format!("{}/api", server.uri()),
        ..SourceSettings::default()
    })
    .expect("client builds")
}

const TRENDING_BODY: &str = r#"{
    "repositories": [
        {
            "id": 1, "github_id": 11, "name": "tokio", "full_name": "tokio-rs/tokio",
            "description": "Async runtime", "stars": 27000, "forks": 2500,
            "language": "Rust", "author": "tokio-rs",
            "url": "https://github.com/tokio-rs/tokio", "trending_date": "2026-10-17",
            "created_at": null, "updated_at": null
        }
    ],
    "total": 1, "limit": 20, "offset": 40, "has_more": false
}"#;

#[test]
fn endpoint_urls_follow_backend_routes() {
    let url = endpoint_url(
        "http://localhost:8000/api",
        &request(
            FeedQuery::trending(Some("Rust".to_string())),
            40,
        ),
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/api/repositories/trending?language=Rust&limit=20&offset=40"
    );

    let url = endpoint_url(
        "http://localhost:8000/api/",
        &request(
            FeedQuery::Search {
                q: "async runtime".to_string(),
            },
            0,
        ),
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/api/repositories/search?q=async+runtime&limit=20&offset=0"
    );

    let url = endpoint_url(
        "http://localhost:8000/api",
        &request(
            FeedQuery::Trending {
                language: None,
                min_stars: Some(500),
                max_stars: Some(5000),
                date_from: NaiveDate::from_ymd_opt(2026, 10, 1),
                date_to: NaiveDate::from_ymd_opt(2026, 10, 18),
            },
            0,
        ),
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/api/repositories/trending?min_stars=500&max_stars=5000&date_from=2026-10-01&date_to=2026-10-18&limit=20&offset=0"
    );

    let url = endpoint_url(
        "http://localhost:8000/api",
        &request(
            FeedQuery::AdvancedSearch {
                q: "tui".to_string(),
                language: Some("Rust".to_string()),
                min_stars: Some(50),
            },
            20,
        ),
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/api/repositories/search/advanced?q=tui&language=Rust&min_stars=50&limit=20&offset=20"
    );

    let err = endpoint_url("not a url", &request(trending(), 0)).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn fetches_and_decodes_trending_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repositories/trending"))
        .and(query_param("offset", "40"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TRENDING_BODY, "application/json"))
        .mount(&server)
        .await;

    let page = source_for(&server)
        .fetch_page(&request(trending(), 40))
        .await
        .expect("page");
    assert_eq!(page.repositories.len(), 1);
    assert_eq!(page.repositories[0].name, "tokio");
    assert_eq!(page.repositories[0].author, "tokio-rs");
    assert!(!page.has_more);
}

#[tokio::test]
async fn filters_reach_the_backend_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repositories/trending"))
        .and(query_param("language", "Rust"))
        .and(query_param("min_stars", "1000"))
        .and(query_param("date_to", "2026-10-17"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TRENDING_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/repositories/search/advanced"))
        .and(query_param("q", "runtime"))
        .and(query_param("min_stars", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TRENDING_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server);
    let trending = FeedQuery::Trending {
        language: Some("Rust".to_string()),
        min_stars: Some(1000),
        max_stars: None,
        date_from: None,
        date_to: NaiveDate::from_ymd_opt(2026, 10, 17),
    };
    source
        .fetch_page(&request(trending, 0))
        .await
        .expect("filtered trending page");

    let advanced = FeedQuery::AdvancedSearch {
        q: "runtime".to_string(),
        language: None,
        min_stars: Some(10),
    };
    let page = source
        .fetch_page(&request(advanced, 0))
        .await
        .expect("advanced search page");
    assert_eq!(page.repositories[0].name, "tokio");
}

#[tokio::test]
async fn backend_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repositories/search"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(
            r#"{"error":"Database error: pool timed out","code":"DATABASE_ERROR"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&request(
            FeedQuery::Search {
                q: "x".to_string(),
            },
            0,
        ))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::Api {
            code: "DATABASE_ERROR".to_string()
        }
    );
    assert_eq!(err.user_message(), "Database error: pool timed out");
}

#[tokio::test]
async fn plain_http_failure_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&request(trending(), 0))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.user_message(), "Failed to fetch repositories");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"nope\":1}", "application/json"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&request(trending(), 0))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(TRENDING_BODY, "application/json"),
        )
        .mount(&server)
        .await;

    let source = ReqwestSource::new(SourceSettings {
        base_url: format!("{}/api", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..SourceSettings::default()
    })
    .unwrap();
    let err = source.fetch_page(&request(trending(), 0)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TRENDING_BODY, "application/json"))
        .mount(&server)
        .await;

    let source = ReqwestSource::new(SourceSettings {
        base_url: format!("{}/api", server.uri()),
        max_bytes: 16,
        ..SourceSettings::default()
    })
    .unwrap();
    let err = source.fetch_page(&request(trending(), 0)).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 16, .. }));
}
