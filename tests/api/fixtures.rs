use crate::common::{EMAIL_ALREADY_IN_USE, LOGIN_SUCCESS, REGISTER_SUCCESS, spawn_mocked_harness};
use shortbeyond_e2e::contract::ContractMode;
use shortbeyond_e2e::error::HarnessError;
use shortbeyond_e2e::factories::build_link;
use shortbeyond_e2e::fixtures::{AuthFixture, AuthenticatedUser, LinksFixture};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_auth_routes(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": REGISTER_SUCCESS,
            "user": { "id": 1, "name": "Ana Souza", "email": "ana@papito.dev" }
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": LOGIN_SUCCESS,
            "data": {
                "token": token,
                "user": { "id": 1, "name": "Ana Souza", "email": "ana@papito.dev" }
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn authenticated_user_is_registered_and_logged_in_once_per_test() {
    // Arrange
    let app = spawn_mocked_harness(ContractMode::Intended).await;
    mount_auth_routes(&app.server, "aaa.bbb.ccc").await;
    let domain = app.harness.user_factory().domain().clone();

    // Act
    let outcome = app
        .harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let first = scope.resolve::<AuthenticatedUser>().await?;
                let second = scope.resolve::<AuthenticatedUser>().await?;
                Ok((Arc::ptr_eq(&first, &second), first))
            })
        })
        .await;

    // Assert
    let (same_instance, user) = outcome.unwrap();
    assert!(same_instance);
    assert_eq!(user.token(), "aaa.bbb.ccc");
    assert!(domain.owns(user.user.email.as_ref()));
}

#[tokio::test]
async fn a_rejected_registration_fails_the_fixture() {
    let app = spawn_mocked_harness(ContractMode::Intended).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "message": EMAIL_ALREADY_IN_USE })),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&app.server)
        .await;

    let outcome = app
        .harness
        .scope()
        .run(|scope| {
            Box::pin(async move { scope.resolve::<AuthenticatedUser>().await.map(|_| ()) })
        })
        .await;

    match outcome {
        Err(HarnessError::Fixture { name, source }) => {
            assert_eq!(name, "authenticated_user");
            match *source {
                HarnessError::UnexpectedStatus { status, body } => {
                    assert_eq!(status.as_u16(), 400);
                    assert!(body.contains(EMAIL_ALREADY_IN_USE));
                }
                other => panic!("Expected an unexpected status, got {:?}", other),
            }
        }
        other => panic!("Expected a fixture error, got {:?}", other),
    }
}

#[tokio::test]
async fn links_fixture_uses_the_authenticated_users_token() {
    let app = spawn_mocked_harness(ContractMode::Intended).await;
    mount_auth_routes(&app.server, "owner.token.value").await;
    let link = build_link();
    Mock::given(method("POST"))
        .and(path("/api/links"))
        .and(header("Authorization", "Bearer owner.token.value"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "Link criado com sucesso",
            "data": {
                "id": "01JBZ7Q0E5X5R8N1W3YV6T2K9M",
                "original_url": link.original_url,
                "short_code": "Zx9Qa",
                "title": link.title,
            }
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let outcome = app
        .harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let links = scope.resolve::<LinksFixture>().await?;
                let owner = scope.resolve::<AuthenticatedUser>().await?;
                links.create_and_return_link_id(&link, owner.token()).await
            })
        })
        .await;

    assert_eq!(outcome.unwrap(), "01JBZ7Q0E5X5R8N1W3YV6T2K9M");
}

#[tokio::test]
async fn the_auth_fixture_can_register_a_second_user() {
    let app = spawn_mocked_harness(ContractMode::Intended).await;
    mount_auth_routes(&app.server, "second.user.token").await;

    let outcome = app
        .harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let auth = scope.resolve::<AuthFixture>().await?;
                let other = scope.user_factory().build_user();
                auth.register(&other).await?;
                auth.get_token(&other).await
            })
        })
        .await;

    assert_eq!(outcome.unwrap().expose(), "second.user.token");
}

#[tokio::test]
async fn scopes_carry_the_configured_contract() {
    let app = spawn_mocked_harness(ContractMode::Observed).await;
    assert_eq!(app.harness.scope().contract().mode(), ContractMode::Observed);
}
