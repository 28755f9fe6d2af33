//! Single-attempt HTTP calls raced against a fixed timer.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Thin wrapper over `reqwest::Client` that applies the timeout race to every call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("larder/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(http, config.timeout))
    }

    /// GET `url`, or POST `body` as JSON when one is given. Returns the parsed payload.
    pub async fn request(&self, url: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let req = match body {
            Some(b) => self.http.post(url).json(b),
            None => self.http.get(url),
        };
        debug!(url, post = body.is_some(), "request");
        with_timeout(self.timeout, async move {
            let resp = req.send().await?;
            read_json(resp).await
        })
        .await
    }

    /// POST with an empty form body and extra headers; used by the nutrition API.
    pub async fn post_form(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, ApiError> {
        let mut req = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        debug!(url, "form request");
        with_timeout(self.timeout, async move {
            let resp = req.send().await?;
            read_json(resp).await
        })
        .await
    }

    /// DELETE `url`. Success is decided by status alone; any body is ignored.
    pub async fn delete(&self, url: &str) -> Result<(), ApiError> {
        debug!(url, "delete");
        let req = self.http.delete(url);
        with_timeout(self.timeout, async move {
            let resp = req.send().await?;
            let status = resp.status();
            if status.is_success() {
                return Ok(());
            }
            Err(ApiError::Http {
                status: status.as_u16(),
                message: format!("Error: {}", status.canonical_reason().unwrap_or("request failed")),
            })
        })
        .await
    }
}

/// Race `fut` against a timer of `duration`. Whichever settles first wins.
pub async fn with_timeout<T, F>(duration: Duration, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(?duration, "request timed out");
            Err(ApiError::Timeout(duration))
        }
    }
}

async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        return Err(ApiError::Http { status: status.as_u16(), message });
    }
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Instant;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(timeout: Duration) -> HttpClient {
        HttpClient::new(reqwest::Client::new(), timeout)
    }

    #[tokio::test]
    async fn test_pending_future_times_out() {
        let timeout = Duration::from_millis(50);
        let started = Instant::now();
        let result: Result<(), ApiError> = with_timeout(timeout, std::future::pending()).await;
        let elapsed = started.elapsed();

        match result {
            Err(ApiError::Timeout(d)) => assert_eq!(d, timeout),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(elapsed >= timeout);
        assert!(elapsed < Duration::from_millis(500), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_ready_future_wins_race() {
        let result = with_timeout(Duration::from_millis(50), async { Ok::<_, ApiError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_get_returns_parsed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        let value = client(Duration::from_secs(5))
            .request(&format!("{}/recipes", server.uri()), None)
            .await
            .unwrap();
        assert_eq!(value["status"], "success");
    }

    #[tokio::test]
    async fn test_body_switches_to_post() {
        let server = MockServer::start().await;
        let payload = json!({ "title": "Soup" });
        Mock::given(method("POST"))
            .and(path("/recipes"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let value = client(Duration::from_secs(5))
            .request(&format!("{}/recipes", server.uri()), Some(&payload))
            .await
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "status": "fail", "message": "Invalid _id: abc" })),
            )
            .mount(&server)
            .await;

        let err = client(Duration::from_secs(5))
            .request(&format!("{}/recipes/abc", server.uri()), None)
            .await
            .unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid _id: abc");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let err = client(Duration::from_millis(50))
            .request(&server.uri(), None)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_delete_success_and_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/recipes/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/recipes/2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let http = client(Duration::from_secs(5));
        http.delete(&format!("{}/recipes/1", server.uri())).await.unwrap();
        let err = http.delete(&format!("{}/recipes/2", server.uri())).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
