mod common;

use bing_search::{
    BingSearchApi, ImageFacetBuilder, SearchBuilder, SearchError, VideoFacetBuilder,
};
use std::time::Duration;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, key: &str) -> BingSearchApi {
    BingSearchApi::new(key)
        .expect("client builds")
        .with_endpoint(server.uri())
}

#[tokio::test]
async fn api_key_is_both_username_and_password() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    for key in ["abc", "k3y-with-dashes", "LONGKEY0123456789"] {
        Mock::given(method("GET"))
            .and(path("/Web"))
            .and(basic_auth(key, key))
            .respond_with(ResponseTemplate::new(200).set_body_string(key))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server, key);
        let mut web = api.web();
        web.query("auth");
        let resp = api.search(&web).await.expect("search succeeds");
        assert_eq!(resp.text(), key);
    }
}

#[tokio::test]
async fn escaped_parameters_reach_the_server() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Image"))
        .and(query_param("Query", "'hello world'"))
        .and(query_param("$top", "10"))
        .and(query_param("ImageFilters", "'Size:Large+Aspect:Square'"))
        .and(query_param("Adult", "Strict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"d\":{\"results\":[]}}"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, "key");
    let mut image = api.image();
    image
        .query("hello world")
        .take(10)
        .large()
        .square()
        .adult("Strict")
        .unwrap();

    let resp = api.search(&image).await.unwrap();
    assert!(resp.is_success());
}

#[tokio::test]
async fn composite_request_targets_union_endpoint() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Composite"))
        .and(query_param("Sources", "'web+video'"))
        .and(query_param("Query", "'ferris'"))
        .and(query_param("VideoFilters", "'Resolution:High'"))
        .and(query_param("VideoSortBy", "'Relevance'"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, "key");
    let mut composite = api.composite(["video", "web"]);
    composite
        .query("ferris")
        .high_resolution()
        .order_by_relevance();

    api.search(&composite).await.unwrap();
}

#[tokio::test]
async fn error_status_is_returned_unprocessed_and_not_retried() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("The authorization type you provided is not supported."))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, "wrong");
    let resp = api.search(&api.news()).await.expect("transport ok");
    assert_eq!(resp.status.as_u16(), 401);
    assert!(resp.text().contains("authorization type"));
}

#[tokio::test]
async fn transport_failure_is_propagated() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let api = api_for(&server, "key")
        .with_timeout(Duration::from_millis(50));
    let err = api.search(&api.spell()).await.unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)));
}

#[tokio::test]
async fn facade_built_from_config_applies_defaults() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/RelatedSearch"))
        .and(basic_auth("cfg-key", "cfg-key"))
        .and(query_param("$format", "atom"))
        .and(query_param("Market", "de-DE"))
        .and(query_param("Query", "'zug'"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = bing_config::BingConfigLoader::new()
        .with_yaml_str(&format!(
            "api_key: cfg-key\nendpoint: \"{}\"\nformat: atom\nmarket: de-DE\n",
            server.uri()
        ))
        .load()
        .expect("config loads");

    let api = BingSearchApi::from_config(&cfg).expect("valid defaults");
    let mut related = api.related();
    related.query("zug");
    api.search(&related).await.unwrap();
}
