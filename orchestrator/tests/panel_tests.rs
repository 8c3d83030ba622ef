//! Panel client behavior against a mock power/status API.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orchestrator::config::PanelConfig;
use orchestrator::panel::PanelClient;

const SERVER_ID: &str = "a1b2c3d4";

fn panel_config(base_url: &str) -> PanelConfig {
    PanelConfig {
        base_url: base_url.to_string(),
        server_id: SERVER_ID.to_string(),
        api_key: "test-key".to_string(),
    }
}

fn resources_body(state: &str) -> serde_json::Value {
    json!({ "attributes": { "current_state": state } })
}

#[tokio::test]
async fn restart_posts_the_power_signal_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/client/servers/{}/power", SERVER_ID)))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_json(json!({ "signal": "restart" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let panel = PanelClient::new(&panel_config(&server.uri())).unwrap();
    panel.restart().await.unwrap();
}

#[tokio::test]
async fn restart_tolerates_error_status_codes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/client/servers/{}/power", SERVER_ID)))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    // The status code is logged, not branched on; the cycle proceeds to
    // polling either way.
    let panel = PanelClient::new(&panel_config(&server.uri())).unwrap();
    panel.restart().await.unwrap();
}

#[tokio::test]
async fn current_state_reads_the_reported_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/client/servers/{}/resources", SERVER_ID)))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resources_body("running")))
        .mount(&server)
        .await;

    let panel = PanelClient::new(&panel_config(&server.uri())).unwrap();
    assert_eq!(panel.current_state().await.unwrap(), "running");
}

#[tokio::test]
async fn a_missing_state_field_reads_as_not_running() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/client/servers/{}/resources", SERVER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "attributes": {} })))
        .mount(&server)
        .await;

    let panel = PanelClient::new(&panel_config(&server.uri())).unwrap();
    assert_eq!(panel.current_state().await.unwrap(), "");
}

#[tokio::test]
async fn a_non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/client/servers/{}/resources", SERVER_ID)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let panel = PanelClient::new(&panel_config(&server.uri())).unwrap();
    assert!(panel.current_state().await.is_err());
}

#[tokio::test]
async fn a_trailing_slash_in_the_base_url_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/client/servers/{}/resources", SERVER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(resources_body("running")))
        .mount(&server)
        .await;

    let panel = PanelClient::new(&panel_config(&format!("{}/", server.uri()))).unwrap();
    assert_eq!(panel.current_state().await.unwrap(), "running");
}
