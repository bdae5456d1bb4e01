use crate::common::{LINKS_LISTED, MANY_SEGMENTS_TOKEN, json_body, spawn_harness};
use shortbeyond_e2e::clients::parse_json;
use shortbeyond_e2e::clients::responses::LinkList;
use shortbeyond_e2e::contract::MalformedToken;
use shortbeyond_e2e::fixtures::AuthFixture;

#[tokio::test]
async fn a_user_sees_their_links_in_creation_order() {
    let harness = spawn_harness().await;
    let with_links = harness.user_factory().build_user_with_links(5);

    harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let auth = scope.resolve::<AuthFixture>().await?;
                let links = scope.api().links();
                auth.register(&with_links.user).await?;
                let token = auth.get_token(&with_links.user).await?;
                for link in &with_links.links {
                    let response = links.create_link(link, token.expose()).await?;
                    assert_eq!(response.status().as_u16(), 201);
                }

                let response = links.get_links(token.expose()).await?;

                assert_eq!(response.status().as_u16(), 200);
                let body: LinkList = parse_json(response).await?;
                assert_eq!(body.message, LINKS_LISTED);
                assert_eq!(body.count, with_links.links.len());
                assert_eq!(body.data.len(), with_links.links.len());
                for (listed, created) in body.data.iter().zip(&with_links.links) {
                    assert!(!listed.id.is_empty());
                    assert!(listed.has_valid_short_code());
                    assert_eq!(listed.original_url, created.original_url);
                }
                Ok(())
            })
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn a_new_user_has_no_links() {
    let harness = spawn_harness().await;
    let without_links = harness.user_factory().build_user_with_links(0);

    harness
        .scope()
        .run(|scope| {
            Box::pin(async move {
                let auth = scope.resolve::<AuthFixture>().await?;
                auth.register(&without_links.user).await?;
                let token = auth.get_token(&without_links.user).await?;

                let response = scope.api().links().get_links(token.expose()).await?;

                assert_eq!(response.status().as_u16(), 200);
                let body: LinkList = parse_json(response).await?;
                assert_eq!(body.count, 0);
                assert!(body.data.is_empty());
                Ok(())
            })
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn listing_links_requires_a_token() {
    let harness = spawn_harness().await;

    let response = harness.api().links().get_links("").await.unwrap();

    let status = response.status();
    let body = json_body(response).await;
    harness
        .contract()
        .missing_token()
        .assert_matches(status, body["message"].as_str());
    assert!(body.get("count").is_none());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn listing_links_with_a_malformed_token_is_unauthorized() {
    let harness = spawn_harness().await;

    let response = harness
        .api()
        .links()
        .get_links(MANY_SEGMENTS_TOKEN)
        .await
        .unwrap();

    let status = response.status();
    let body = json_body(response).await;
    harness
        .contract()
        .malformed_token(MalformedToken::WrongSegmentCount)
        .assert_matches(status, body["message"].as_str());
    assert!(body.get("count").is_none());
}
