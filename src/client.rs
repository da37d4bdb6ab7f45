//! HTTP transport for the challenge backend
//!
//! Endpoints (relative to the configured base URL):
//! - `GET  /api/challenges`             list for the player
//! - `GET  /api/challenges/{id}`        single challenge
//! - `POST /api/challenges/{id}/status` body `{"progress": n}`
//! - `POST /api/challenges/{id}/claim`
//!
//! Every request carries the player headers (`location`, `age`,
//! `game-type`, `player-id`).

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::transport::ChallengeTransport;
use crate::types::{Challenge, PlayerInfo};
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Path for one challenge, with the id encoded as a single segment.
///
/// Empty, `.` and `..` ids cannot be expressed as a segment (URL parsing
/// collapses dot segments even when percent-encoded) and are rejected.
fn challenge_path(id: &str, suffix: &str) -> Result<String, TransportError> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(TransportError::InvalidId(id.to_string()));
    }
    Ok(format!(
        "/api/challenges/{}{}",
        urlencoding::encode(id),
        suffix
    ))
}

#[derive(Debug, Serialize)]
struct StatusBody {
    progress: i32,
}

/// reqwest-backed [`ChallengeTransport`]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport from connection settings
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| TransportError::InvalidHeader(format!("api key: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, player: &PlayerInfo) -> RequestBuilder {
        debug!("{} {}", method, path);
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        for (name, value) in player.headers() {
            builder = builder.header(name, value);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Server { status, message });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ChallengeTransport for HttpTransport {
    async fn list_challenges(&self, player: &PlayerInfo) -> Result<Vec<Challenge>, TransportError> {
        let response = self
            .send(self.request(Method::GET, "/api/challenges", player))
            .await?;
        Self::decode(response).await
    }

    async fn get_challenge(
        &self,
        player: &PlayerInfo,
        id: &str,
    ) -> Result<Challenge, TransportError> {
        let path = challenge_path(id, "")?;
        let response = self.send(self.request(Method::GET, &path, player)).await?;
        Self::decode(response).await
    }

    async fn post_progress(
        &self,
        player: &PlayerInfo,
        id: &str,
        progress: i32,
    ) -> Result<(), TransportError> {
        let path = challenge_path(id, "/status")?;
        let builder = self
            .request(Method::POST, &path, player)
            .json(&StatusBody { progress });
        self.send(builder).await?;
        Ok(())
    }

    async fn post_claim(&self, player: &PlayerInfo, id: &str) -> Result<(), TransportError> {
        let path = challenge_path(id, "/claim")?;
        self.send(self.request(Method::POST, &path, player)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn player() -> PlayerInfo {
        PlayerInfo::new("Country", 18, "action", "user")
    }

    fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::new(&ClientConfig::new(server.base_url()).with_api_key("test-key")).unwrap()
    }

    #[test]
    fn test_challenge_path_encodes_reserved_chars() {
        assert_eq!(challenge_path("ch-1", "").unwrap(), "/api/challenges/ch-1");
        assert_eq!(challenge_path("a?b", "").unwrap(), "/api/challenges/a%3Fb");
        assert_eq!(
            challenge_path("a/b", "/claim").unwrap(),
            "/api/challenges/a%2Fb/claim"
        );
        assert_eq!(
            challenge_path("x#y", "/status").unwrap(),
            "/api/challenges/x%23y/status"
        );
        assert_eq!(challenge_path("a..b", "").unwrap(), "/api/challenges/a..b");
    }

    #[test]
    fn test_challenge_path_rejects_dot_segments() {
        for id in ["", ".", ".."] {
            assert!(matches!(
                challenge_path(id, "/claim"),
                Err(TransportError::InvalidId(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_claim_dot_dot_id_never_reaches_backend() {
        let server = MockServer::start();

        let stray = server.mock(|when, then| {
            when.method(POST).path("/api/claim");
            then.status(200);
        });

        let result = transport(&server).post_claim(&player(), "..").await;

        assert!(matches!(result, Err(TransportError::InvalidId(_))));
        stray.assert_hits(0);
    }

    #[tokio::test]
    async fn test_get_challenge_query_char_stays_in_id() {
        let server = MockServer::start();

        let truncated = server.mock(|when, then| {
            when.method(GET).path("/api/challenges/a");
            then.status(200).json_body(json!({"id": "a"}));
        });

        let result = transport(&server).get_challenge(&player(), "a?b").await;

        truncated.assert_hits(0);
        assert!(result.map(|c| c.id != "a").unwrap_or(true));
    }

    #[tokio::test]
    async fn test_slash_in_id_does_not_split_path() {
        let server = MockServer::start();

        let parent = server.mock(|when, then| {
            when.method(POST).path("/api/challenges/a/status");
            then.status(200);
        });

        let _ = transport(&server).post_progress(&player(), "a/b", 10).await;

        parent.assert_hits(0);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = HttpTransport::new(&ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let config = ClientConfig::new("http://localhost:8080").with_api_key("bad\nkey");
        let result = HttpTransport::new(&config);
        assert!(matches!(result, Err(TransportError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_list_sends_player_headers_and_auth() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/challenges")
                .header("authorization", "Bearer test-key")
                .header("location", "Country")
                .header("age", "18")
                .header("game-type", "action")
                .header("player-id", "user");
            then.status(200).json_body(json!([
                {"id": "a", "title": "First", "progress": 10, "reward": 5, "assets": []},
                {"id": "b", "title": "Second"}
            ]));
        });

        let challenges = transport(&server).list_challenges(&player()).await.unwrap();

        mock.assert();
        assert_eq!(challenges.len(), 2);
        assert_eq!(challenges[0].id, "a");
        assert_eq!(challenges[0].progress, 10);
        assert_eq!(challenges[1].progress, 0);
    }

    #[tokio::test]
    async fn test_list_server_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/api/challenges");
            then.status(500).body("boom");
        });

        let result = transport(&server).list_challenges(&player()).await;
        match result {
            Err(TransportError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_invalid_json() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/api/challenges");
            then.status(200)
                .header("content-type", "application/json")
                .body("not valid json");
        });

        let result = transport(&server).list_challenges(&player()).await;
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_challenge() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/challenges/ch-7")
                .header("player-id", "user");
            then.status(200)
                .json_body(json!({"id": "ch-7", "title": "Seven", "reward": 70}));
        });

        let challenge = transport(&server)
            .get_challenge(&player(), "ch-7")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(challenge.id, "ch-7");
        assert_eq!(challenge.reward, 70);
    }

    #[tokio::test]
    async fn test_get_challenge_not_found() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/api/challenges/missing");
            then.status(404);
        });

        let result = transport(&server).get_challenge(&player(), "missing").await;
        assert_eq!(result.unwrap_err().status(), Some(404));
    }

    #[tokio::test]
    async fn test_post_progress_body() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/challenges/ch-1/status")
                .header("game-type", "action")
                .json_body(json!({"progress": 75}));
            then.status(200);
        });

        transport(&server)
            .post_progress(&player(), "ch-1", 75)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_post_progress_rejected() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/api/challenges/ch-1/status");
            then.status(403).body("forbidden");
        });

        let result = transport(&server).post_progress(&player(), "ch-1", 10).await;
        assert_eq!(result.unwrap_err().status(), Some(403));
    }

    #[tokio::test]
    async fn test_post_claim() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/challenges/ch-1/claim")
                .header("location", "Country");
            then.status(204);
        });

        transport(&server).post_claim(&player(), "ch-1").await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_connection_error() {
        let transport = HttpTransport::new(&ClientConfig::new("http://127.0.0.1:65534")).unwrap();

        let result = transport.list_challenges(&player()).await;
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
