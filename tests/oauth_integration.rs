use httpmock::{
    Method::{GET, POST},
    MockServer,
};
use intra42::{Client, Config, Error};
use std::time::{Duration, Instant};

fn token_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": 7200,
        "scope": "public",
        "created_at": 1_700_000_000
    })
}

fn config_for(server: &MockServer) -> Config {
    Config::new("uid", "secret")
        .with_base_url(server.base_url())
        .with_redirect_url("https://app.example/callback")
}

#[tokio::test]
async fn managed_token_is_fetched_once_and_reused() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .body_contains("grant_type=client_credentials");
            then.status(200).json_body(token_body("app-token"));
        })
        .await;
    let titles = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/titles")
                .header("authorization", "Bearer app-token");
            then.status(200)
                .json_body(serde_json::json!([{"id": 1, "name": "Cadet %login"}]));
        })
        .await;

    let client = Client::connect(config_for(&server)).await?;
    let first = client.titles().list(None).await?;
    let second = client.clone().titles().list(None).await?;

    assert_eq!(first.items[0].name, "Cadet %login");
    assert_eq!(first, second);
    token.assert_hits_async(1).await;
    titles.assert_hits_async(2).await;
    Ok(())
}

#[tokio::test]
async fn user_token_bypasses_managed_credentials() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200).json_body(token_body("app-token"));
        })
        .await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/me")
                .header("authorization", "Bearer user-token");
            then.status(200)
                .json_body(serde_json::json!({"id": 1, "login": "norminet"}));
        })
        .await;

    let client = Client::new(config_for(&server))?;
    let user = client.users().me("user-token").await?;
    assert_eq!(user.login, "norminet");
    me.assert_async().await;
    token.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn bad_credentials_fail_at_connect() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(401).json_body(serde_json::json!({
                "error": "invalid_client",
                "error_description": "Client authentication failed"
            }));
        })
        .await;

    let err = Client::connect(config_for(&server)).await.err().unwrap();
    assert!(matches!(err, Error::Auth(_)), "got {err:?}");
}

#[tokio::test]
async fn authorization_code_exchange() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .body_contains("grant_type=authorization_code")
                .body_contains("code=the-code");
            then.status(200).json_body(serde_json::json!({
                "access_token": "user-token",
                "token_type": "bearer",
                "expires_in": 7200,
                "refresh_token": "refresh",
                "scope": "public projects"
            }));
        })
        .await;

    let client = Client::new(config_for(&server))?;
    let link = client.authorize_url("state-1")?;
    assert!(link.as_str().starts_with(&format!("{}/oauth/authorize", server.base_url())));

    let user_token = client.exchange_code("the-code").await?;
    token.assert_async().await;
    assert_eq!(user_token.access_token, "user-token");
    assert_eq!(user_token.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(user_token.scopes, vec!["public", "projects"]);
    assert!(user_token.expires_at.is_some());
    Ok(())
}

#[tokio::test]
async fn managed_token_is_reattached_after_a_429() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200).json_body(token_body("app-token"));
        })
        .await;
    let mut limited = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/skills")
                .header("authorization", "Bearer app-token");
            then.status(429).header("Retry-After", "1");
        })
        .await;

    let client = Client::new(Config::new("uid", "secret").with_base_url(server.base_url()))?;
    let skills = client.skills();
    let (page, ok) = tokio::join!(skills.list(None), async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        limited.assert_hits_async(1).await;
        limited.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v2/skills")
                    .header("authorization", "Bearer app-token");
                then.status(200)
                    .json_body(serde_json::json!([{"id": 3, "name": "Rigor"}]));
            })
            .await
    });

    assert_eq!(page?.items[0].name, "Rigor");
    ok.assert_hits_async(1).await;
    token.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn token_request_uses_configured_user_agent() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .header("user-agent", "campus-bot/1.0");
            then.status(200).json_body(token_body("app-token"));
        })
        .await;

    Client::connect(config_for(&server).with_user_agent("campus-bot/1.0")).await?;
    token.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn slow_token_endpoint_hits_the_configured_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(token_body("app-token"));
        })
        .await;

    let started = Instant::now();
    let err = Client::connect(config_for(&server).with_timeout_secs(1))
        .await
        .err()
        .expect("connect should time out");
    assert!(matches!(err, Error::Auth(_)), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(4));
}
