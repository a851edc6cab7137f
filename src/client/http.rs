use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::dto::session::StartSessionRequest;

use super::api::{ApiError, ApiResult, QuestionsReply, SessionApi, StartSessionReply};

const START_SESSION: &str = "start-session";
const QUESTIONS: &str = "questions";
const STOP_SESSION: &str = "stop-session";

/// [`SessionApi`] over plain JSON/HTTP.
#[derive(Clone)]
pub struct HttpSessionApi {
    client: Client,
    base_url: Arc<str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StopSessionBody<'a> {
    session_id: &'a str,
}

#[derive(Deserialize)]
struct ErrorReply {
    message: Option<String>,
}

impl HttpSessionApi {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl AsRef<str>) -> ApiResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| ApiError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.as_ref().trim_end_matches('/')),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn send(builder: reqwest::RequestBuilder, path: &str) -> ApiResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorReply>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(ApiError::RequestStatus {
            path: path.to_string(),
            status,
            message,
        })
    }

    async fn decode<T>(response: Response, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::DecodeResponse {
                path: path.to_string(),
                source,
            })
    }
}

impl SessionApi for HttpSessionApi {
    fn start_session(
        &self,
        request: StartSessionRequest,
    ) -> BoxFuture<'static, ApiResult<StartSessionReply>> {
        let builder = self.request(Method::POST, START_SESSION).json(&request);
        Box::pin(async move {
            let response = Self::send(builder, START_SESSION).await?;
            Self::decode(response, START_SESSION).await
        })
    }

    fn fetch_questions(&self, session_id: &str) -> BoxFuture<'static, ApiResult<QuestionsReply>> {
        let builder = self
            .request(Method::GET, QUESTIONS)
            .query(&[("sessionId", session_id)]);
        Box::pin(async move {
            let response = Self::send(builder, QUESTIONS).await?;
            Self::decode(response, QUESTIONS).await
        })
    }

    fn stop_session(&self, session_id: &str) -> BoxFuture<'static, ApiResult<()>> {
        let builder = self
            .request(Method::POST, STOP_SESSION)
            .json(&StopSessionBody { session_id });
        Box::pin(async move {
            Self::send(builder, STOP_SESSION).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpSessionApi::new("http://localhost:8080/").unwrap();
        assert_eq!(&*api.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_send_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let api = HttpSessionApi::new("http://127.0.0.1:9").unwrap();
        let err = api.stop_session("abc").await.unwrap_err();
        assert!(matches!(err, ApiError::RequestSend { .. }));
    }
}
