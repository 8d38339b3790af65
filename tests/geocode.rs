mod common;

use common::search_body;
use weather_pro::{
    data::geocode::{GeocodeClient, MAX_CANDIDATES},
    domain::weather::{Coordinate, UNKNOWN_LOCATION},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client(server: &MockServer) -> GeocodeClient {
    GeocodeClient::with_urls(
        format!("{}/v1/search", server.uri()),
        format!("{}/v1/reverse", server.uri()),
    )
}

#[tokio::test]
async fn single_character_query_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.search("a").await.is_empty());
    assert!(client.search("  b  ").await.is_empty());
}

#[tokio::test]
async fn padded_query_is_sent_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Oslo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&[(
            "Oslo", "Oslo", 59.913, 10.739,
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let found = client(&server).search("  Oslo \t").await;
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn search_returns_candidates_in_provider_order_capped_at_five() {
    let server = MockServer::start().await;
    let springfields: Vec<(&str, &str, f64, f64)> = vec![
        ("Springfield", "Illinois", 39.799, -89.644),
        ("Springfield", "Missouri", 37.215, -93.298),
        ("Springfield", "Massachusetts", 42.101, -72.589),
        ("Springfield", "Oregon", 44.046, -123.022),
        ("Springfield", "Ohio", 39.924, -83.808),
        ("Springfield", "Virginia", 38.789, -77.187),
    ];
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Springfield"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&springfields)))
        .expect(1)
        .mount(&server)
        .await;

    let candidates = client(&server).search(" Springfield ").await;

    assert_eq!(candidates.len(), MAX_CANDIDATES);
    assert_eq!(candidates[0].admin1.as_deref(), Some("Illinois"));
    assert_eq!(candidates[3].admin1.as_deref(), Some("Oregon"));
    assert_eq!(
        candidates[0].display_name(),
        "Springfield, Illinois, United States"
    );
}

#[tokio::test]
async fn search_failures_collapse_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.search("broken").await.is_empty());
    assert!(client.search("nowhere").await.is_empty());
}

#[tokio::test]
async fn reverse_lookup_prefers_name_then_city_then_region() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .and(query_param("latitude", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "Kungsholmen", "city": "Stockholm", "admin1": "Stockholm County" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .and(query_param("latitude", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "", "city": "Uppsala", "admin1": "Uppsala County" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .and(query_param("latitude", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "admin1": "Norrbotten" }]
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(
        client.resolve_name(Coordinate::new(10.0, 18.0)).await,
        "Kungsholmen"
    );
    assert_eq!(client.resolve_name(Coordinate::new(20.0, 17.6)).await, "Uppsala");
    assert_eq!(
        client.resolve_name(Coordinate::new(30.0, 21.0)).await,
        "Norrbotten"
    );
}

#[tokio::test]
async fn reverse_lookup_falls_back_to_unknown_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .and(query_param("latitude", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .and(query_param("latitude", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .and(query_param("latitude", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;

    let client = client(&server);
    for latitude in [1.0, 2.0, 3.0] {
        assert_eq!(
            client.resolve_name(Coordinate::new(latitude, 0.0)).await,
            UNKNOWN_LOCATION
        );
    }
}
