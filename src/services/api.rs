use crate::core::state::{GenerateRequest, GenerateResult, Mode};
use crate::core::text;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Failures surfaced to the player. `Display` is the message shown in the
/// error panel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    #[error("{}", text::NETWORK_FAILURE)]
    Transport { detail: String },
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{message}")]
    Declined { message: String },
}

/// Response body of `POST /generate`, as sent for every status.
#[derive(Deserialize, Debug, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    pub mode: Option<Mode>,
    pub question: Option<String>,
    pub scene: Option<String>,
    pub error: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn classify(
    status: u16,
    body: &str,
    request: &GenerateRequest,
) -> Result<GenerateResult, GenerateError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| GenerateError::Transport {
            detail: format!("Failed to parse response ({}): {}. Body: {}", status, e, body),
        })?;

    if !(200..300).contains(&status) {
        return Err(GenerateError::Status {
            status,
            message: non_empty(response.error).unwrap_or_else(|| text::STATUS_FALLBACK.to_string()),
        });
    }

    if !response.success {
        return Err(GenerateError::Declined {
            message: non_empty(response.error)
                .unwrap_or_else(|| text::DECLINED_FALLBACK.to_string()),
        });
    }

    let question = non_empty(response.question).ok_or_else(|| GenerateError::Transport {
        detail: format!("Response reported success without a question. Body: {}", body),
    })?;

    Ok(GenerateResult {
        mode: response.mode.unwrap_or(request.mode),
        question,
        scene: non_empty(response.scene),
    })
}

#[cfg(target_arch = "wasm32")]
pub trait ApiBounds {}
#[cfg(target_arch = "wasm32")]
impl<T> ApiBounds for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait ApiBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> ApiBounds for T {}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait GenerateApi: ApiBounds {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResult, GenerateError>;
}

pub struct HttpGenerateApi {
    url: Url,
    client: reqwest::Client,
}

impl HttpGenerateApi {
    pub fn new(base: &str, endpoint: &str) -> Result<Self> {
        let base = Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
        let url = base
            .join(endpoint)
            .with_context(|| format!("Invalid endpoint: {}", endpoint))?;
        Ok(Self {
            url,
            client: reqwest::Client::new(),
        })
    }

    /// Resolves `endpoint` against the page origin.
    #[cfg(target_arch = "wasm32")]
    pub fn for_window(endpoint: &str) -> Result<Self> {
        let window = web_sys::window().context("No window available")?;
        let origin = window
            .location()
            .origin()
            .map_err(|e| anyhow::anyhow!("Failed to read page origin: {:?}", e))?;
        Self::new(&origin, endpoint)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl GenerateApi for HttpGenerateApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResult, GenerateError> {
        let transport = |e: reqwest::Error| GenerateError::Transport {
            detail: e.to_string(),
        };

        let resp = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport)?;
        classify(status, &body, request)
    }
}
