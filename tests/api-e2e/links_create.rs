use crate::common::{
    LINK_CREATED, ORIGINAL_URL_REQUIRED, SINGLE_SEGMENT_TOKEN, TITLE_REQUIRED, spawn_harness,
    status_and_message,
};
use shortbeyond_e2e::clients::parse_json;
use shortbeyond_e2e::clients::responses::{Envelope, LinkData};
use shortbeyond_e2e::contract::MalformedToken;
use shortbeyond_e2e::factories::build_link;
use shortbeyond_e2e::fixtures::{AuthenticatedUser, LinksFixture};

#[tokio::test]
async fn an_authenticated_user_can_shorten_a_link() {
    let harness = spawn_harness().await;
    let link = build_link();

    harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let links = scope.resolve::<LinksFixture>().await?;
                let owner = scope.resolve::<AuthenticatedUser>().await?;

                let response = links.create_link(&link, owner.token()).await?;

                assert_eq!(response.status().as_u16(), 201);
                let body: Envelope<LinkData> = parse_json(response).await?;
                assert_eq!(body.message, LINK_CREATED);
                assert!(!body.data.id.is_empty());
                assert_eq!(body.data.original_url, link.original_url);
                assert_eq!(body.data.title, link.title);
                assert!(
                    body.data.has_valid_short_code(),
                    "{} is not a five character alphanumeric code.",
                    body.data.short_code
                );
                Ok(())
            })
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn every_link_gets_its_own_code() {
    let harness = spawn_harness().await;

    harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let links = scope.resolve::<LinksFixture>().await?;
                let owner = scope.resolve::<AuthenticatedUser>().await?;

                let first = links.create_link(&build_link(), owner.token()).await?;
                let second = links.create_link(&build_link(), owner.token()).await?;

                let first: Envelope<LinkData> = parse_json(first).await?;
                let second: Envelope<LinkData> = parse_json(second).await?;
                assert_ne!(first.data.short_code, second.data.short_code);
                assert_ne!(first.data.id, second.data.id);
                Ok(())
            })
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn creating_a_link_requires_a_token() {
    let harness = spawn_harness().await;

    let response = harness
        .api()
        .links()
        .create_link(&build_link(), "")
        .await
        .unwrap();

    let (status, message) = status_and_message(response).await;
    harness
        .contract()
        .missing_token()
        .assert_matches(status, message.as_deref());
}

#[tokio::test]
async fn creating_a_link_with_a_malformed_token_is_unauthorized() {
    let harness = spawn_harness().await;

    let response = harness
        .api()
        .links()
        .create_link(&build_link(), SINGLE_SEGMENT_TOKEN)
        .await
        .unwrap();

    let (status, message) = status_and_message(response).await;
    harness
        .contract()
        .malformed_token(MalformedToken::WrongSegmentCount)
        .assert_matches(status, message.as_deref());
}

#[tokio::test]
async fn incomplete_links_are_rejected() {
    let harness = spawn_harness().await;

    harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let links = scope.resolve::<LinksFixture>().await?;
                let owner = scope.resolve::<AuthenticatedUser>().await?;
                let test_cases = [
                    (
                        serde_json::json!({ "title": "Exemplo de Site" }),
                        Some(ORIGINAL_URL_REQUIRED),
                        "a missing original_url",
                    ),
                    (
                        serde_json::json!({
                            "original_url": "https://www.exemplo.com/uma-url-muito-longa"
                        }),
                        Some(TITLE_REQUIRED),
                        "a missing title",
                    ),
                    (
                        serde_json::json!({ "original_url": "", "title": "Exemplo de Site" }),
                        None,
                        "an empty original_url",
                    ),
                    (
                        serde_json::json!({
                            "original_url": "https://www.exemplo.com/uma-url-muito-longa",
                            "title": "",
                        }),
                        None,
                        "an empty title",
                    ),
                    (serde_json::json!({}), None, "no fields at all"),
                ];

                for (payload, expected_message, description) in test_cases {
                    let response = links.create_link(&payload, owner.token()).await?;

                    let (status, message) = status_and_message(response).await;
                    assert_eq!(
                        status.as_u16(),
                        400,
                        "The API accepted a link with {}.",
                        description
                    );
                    assert!(message.is_some(), "No message for a link with {}.", description);
                    if let Some(expected_message) = expected_message {
                        assert_eq!(message.as_deref(), Some(expected_message));
                    }
                }
                Ok(())
            })
        })
        .await
        .unwrap();
}
