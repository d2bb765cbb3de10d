mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn register_redirects_to_login() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.register("a", "a").await?;
    common::assert_redirect_to(&res, "/auth/login");
    Ok(())
}

#[tokio::test]
async fn register_validates_input() -> Result<()> {
    let server = common::spawn_server().await?;

    for (username, password, message) in [
        ("", "", "Username is required."),
        ("a", "", "Password is required."),
    ] {
        let res = server.register(username, password).await?;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await?;
        assert_eq!(body["template"], "auth/register.html");
        assert_eq!(body["flashes"][0], message);
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_refused() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("test", "test").await?;

    let body: Value = server.register("test", "other").await?.json().await?;
    assert_eq!(body["flashes"][0], "User test is already registered.");
    Ok(())
}

#[tokio::test]
async fn login_returns_token() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("test", "test").await?;

    let res = server.login("test", "test").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["username"], "test");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("test", "test").await?;

    for (username, password, message) in [
        ("nobody", "test", "Incorrect username."),
        ("test", "wrong", "Incorrect password."),
    ] {
        let body: Value = server.login(username, password).await?.json().await?;
        assert_eq!(body["template"], "auth/login.html");
        assert_eq!(body["flashes"][0], message);
        assert!(body["data"].get("token").is_none());
    }
    Ok(())
}

#[tokio::test]
async fn login_gate_requires_bearer_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/create")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let res = server
        .client
        .get(server.url("/create"))
        .bearer_auth("not-a-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_gate_admits_valid_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let (_, token) = server.sign_up("test").await?;

    let res = server
        .client
        .get(server.url("/create"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["template"], "blog/create.html");
    Ok(())
}
