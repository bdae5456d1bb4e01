use crate::common::{HEALTH_SERVICE, HEALTH_STATUS, spawn_harness};
use shortbeyond_e2e::clients::parse_json;
use shortbeyond_e2e::clients::responses::HealthStatus;

#[tokio::test]
async fn the_api_reports_itself_healthy() {
    let harness = spawn_harness().await;

    let response = harness.api().health().check().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: HealthStatus = parse_json(response).await.unwrap();
    assert_eq!(body.service, HEALTH_SERVICE);
    assert_eq!(body.status, HEALTH_STATUS);
}
