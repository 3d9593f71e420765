//! Loading every feed over HTTP against a mock server

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures;
use crate::common::logging::{init_test_logging, log_test_data, log_test_step};
use storm_risk_dashboard::api::{Feed, FeedSource, HttpFeedClient};
use storm_risk_dashboard::error::{FeedError, LOAD_ERROR_MESSAGE};
use storm_risk_dashboard::loader::load_dashboard_data;
use storm_risk_dashboard::models::Config;

async fn serve(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount every feed except `skip`
async fn serve_all(server: &MockServer, skip: Option<&str>) {
    let routes = [
        ("/api/districts", fixtures::export_districts()),
        ("/api/storm-track", fixtures::storm_track()),
        ("/api/health-facilities", fixtures::health_facilities()),
        ("/api/education-facilities", fixtures::education_facilities()),
        ("/api/summary-stats", fixtures::summary()),
    ];
    for (route, body) in routes {
        if Some(route) != skip {
            serve(server, route, body).await;
        }
    }
}

fn client_for(server: &MockServer) -> HttpFeedClient {
    let config = Config::default().with_base_url(&server.uri()).expect("mock server URI is valid");
    HttpFeedClient::new(&config).expect("client builds")
}

#[tokio::test]
async fn test_load_all_feeds() {
    init_test_logging();
    log_test_step("Loading all five feeds from the mock server");

    let server = MockServer::start().await;
    serve_all(&server, None).await;

    let data = load_dashboard_data(&client_for(&server)).await.expect("load succeeds");
    log_test_data("Summary", &data.summary);

    assert_eq!(data.districts.len(), 3);
    assert_eq!(data.storm_track.len(), 2);
    assert_eq!(data.health_facilities.len(), 1);
    assert_eq!(data.education_facilities.len(), 2);
    assert_eq!(data.summary.total_districts, 3);
    assert_eq!(data.summary.high_risk_districts, 2);
}

#[tokio::test]
async fn test_server_error_aborts_load() {
    init_test_logging();
    log_test_step("Health facilities endpoint returns 500");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health-facilities"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    serve_all(&server, Some("/api/health-facilities")).await;

    let failure = load_dashboard_data(&client_for(&server)).await.expect_err("load fails");
    assert_eq!(failure.feed, Feed::HealthFacilities);
    assert_eq!(failure.user_message(), LOAD_ERROR_MESSAGE);
    assert_matches!(failure.source, FeedError::Status { status: 500 });
}

#[tokio::test]
async fn test_unparsable_body_aborts_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summary-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    serve_all(&server, Some("/api/summary-stats")).await;

    let failure = load_dashboard_data(&client_for(&server)).await.expect_err("load fails");
    assert_eq!(failure.feed, Feed::SummaryStats);
    assert_matches!(failure.source, FeedError::Parse(_));
}

#[tokio::test]
async fn test_wrong_geojson_type_aborts_load() {
    let server = MockServer::start().await;
    serve(&server, "/api/storm-track", serde_json::json!({ "type": "Point", "coordinates": [90.0, 22.0] })).await;
    serve_all(&server, Some("/api/storm-track")).await;

    let failure = load_dashboard_data(&client_for(&server)).await.expect_err("load fails");
    assert_eq!(failure.feed, Feed::StormTrack);
    assert_matches!(failure.source, FeedError::Parse(_));
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Bind an ephemeral port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let config = Config::default()
        .with_base_url(&format!("http://127.0.0.1:{}", port))
        .expect("closed port URL is valid");
    let client = HttpFeedClient::new(&config).expect("client builds");

    let result = client.fetch(Feed::Districts).await;
    assert_matches!(result, Err(FeedError::Request(_)));
}
