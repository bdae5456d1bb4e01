use crate::common::{HEALTH_SERVICE, HEALTH_STATUS, spawn_mocked_harness};
use shortbeyond_e2e::clients::ApiClient;
use shortbeyond_e2e::clients::parse_json;
use shortbeyond_e2e::clients::responses::HealthStatus;
use shortbeyond_e2e::configuration::ApiSettings;
use shortbeyond_e2e::contract::ContractMode;
use shortbeyond_e2e::error::HarnessError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn health_is_served_from_the_service_root() {
    let app = spawn_mocked_harness(ContractMode::Intended).await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "service": HEALTH_SERVICE,
            "status": HEALTH_STATUS,
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app.harness.api().health().check().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: HealthStatus = parse_json(response).await.unwrap();
    assert_eq!(body.service, HEALTH_SERVICE);
    assert_eq!(body.status, HEALTH_STATUS);
}

#[tokio::test]
async fn an_unreachable_api_is_a_transport_error() {
    let api = ApiClient::new(&ApiSettings {
        base_url: "http://127.0.0.1:9".into(),
        api_prefix: "/api".into(),
        timeout_milliseconds: Some(1_000),
    })
    .unwrap();

    let outcome = api.health().check().await;

    assert!(matches!(outcome, Err(HarnessError::Transport(_))));
}
