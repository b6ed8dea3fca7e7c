use async_trait::async_trait;
use domain::models::GenerationRequest;
use domain::services::Transport;
use reqwest::{Client, ClientBuilder};
use shared::error::{Error, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Production transport: one HTTP POST per call with a hard per-request
/// deadline. Error classification happens here so the retry loop only has
/// to look at variants.
pub struct HttpTransport {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .tcp_nodelay(true)
            .build()
            .map_err(|err| Error::Network(err.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &GenerationRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn classify(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Network(err.to_string())
    }
}

/// Retrying wrapper over a [`Transport`]. Timeouts abort the whole call; a
/// hung request is never retried silently. Non-timeout failures back off
/// linearly between attempts.
pub struct ApiClient<T: Transport> {
    transport: T,
    max_attempts: u32,
    backoff_unit: Duration,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            transport,
            max_attempts,
            backoff_unit,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send(&self, request: &GenerationRequest) -> Result<String> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            debug!(attempt, "sending generation request");
            match self.transport.post(request).await {
                Ok(body) => return Ok(body),
                Err(Error::Timeout) => return Err(Error::Timeout),
                Err(err) if err.is_retryable() => {
                    warn!(attempt, error = %err, code = err.code(), "generation request failed");
                    last_error = Some(err);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.backoff_unit * attempt).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        let detail = last_error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        Err(Error::MaxRetriesExceeded(detail))
    }
}
