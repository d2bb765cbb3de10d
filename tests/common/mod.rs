#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{header::LOCATION, Client, Response, StatusCode};
use serde_json::Value;
use tempfile::TempDir;

use flaskr::config::AppConfig;
use flaskr::AppState;

pub const SECRET: &str = "test-secret";

/// A server on its own port with its own freshly initialized database.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/auth/register"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        Ok(res)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        Ok(res)
    }

    /// Register and log in, returning (user id, bearer token).
    pub async fn sign_up(&self, username: &str) -> Result<(i64, String)> {
        let res = self.register(username, "password").await?;
        anyhow::ensure!(res.status() == StatusCode::SEE_OTHER, "register failed: {}", res.status());

        let body: Value = self.login(username, "password").await?.json().await?;
        let token = body["data"]["token"].as_str().context("no token in login response")?;
        let id = body["data"]["user"]["id"].as_i64().context("no user id in login response")?;
        Ok((id, token.to_string()))
    }

    pub async fn create_post(&self, token: &str, title: &str, body: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/create"))
            .bearer_auth(token)
            .form(&[("title", title), ("body", body)])
            .send()
            .await?;
        Ok(res)
    }

    pub async fn update_post(&self, token: &str, id: i64, title: &str, body: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url(&format!("/{}/update", id)))
            .bearer_auth(token)
            .form(&[("title", title), ("body", body)])
            .send()
            .await?;
        Ok(res)
    }

    pub async fn delete_post(&self, token: &str, id: i64) -> Result<Response> {
        let res = self
            .client
            .post(self.url(&format!("/{}/delete", id)))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(res)
    }

    /// Posts as rendered by the index view, newest first.
    pub async fn posts(&self) -> Result<Vec<Value>> {
        let body: Value = self.client.get(self.url("/")).send().await?.json().await?;
        let posts = body["data"]["posts"].as_array().context("index has no posts array")?;
        Ok(posts.clone())
    }

    pub async fn post(&self, id: i64) -> Result<Option<Value>> {
        Ok(self.posts().await?.into_iter().find(|p| p["id"] == id))
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let dir = tempfile::tempdir()?;
    let mut config = AppConfig::for_database(dir.path().join("flaskr.sqlite"));
    config.security.secret_key = SECRET.to_string();
    config.security.password_cost = 4;

    let state = AppState::new(config);
    state.db.init_db().await?;

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        if let Err(e) = flaskr::app::serve(listener, state).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        client,
        _dir: dir,
    })
}

pub fn assert_redirect_to(res: &Response, location: &str) {
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "expected redirect");
    assert_eq!(res.headers()[LOCATION], location);
}
