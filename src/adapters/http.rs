use crate::domain::model::{ErrorEnvelope, Wardrobe, WardrobeResponse};
use crate::domain::ports::{ConfigProvider, WardrobeClient};
use crate::utils::error::{CapsuleError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub struct HttpWardrobeClient {
    client: Client,
    server: String,
}

impl HttpWardrobeClient {
    pub fn new(server: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            server: server.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.server(), Duration::from_secs(config.timeout_seconds()))
    }

    fn capsule_url(&self, token: &str) -> String {
        format!("{}/capsule/{}", self.server, token)
    }
}

/// Reads a 200 body: an error envelope when `error` is truthy, a wardrobe otherwise.
pub fn interpret_body(body: &str) -> Result<WardrobeResponse> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if let Some(flag) = value.get("error") {
        if is_truthy(flag) {
            let message = match value.get("message") {
                Some(serde_json::Value::String(message)) => message.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            return Ok(WardrobeResponse::Rejected(ErrorEnvelope { message }));
        }
    }

    let wardrobe: Wardrobe = serde_json::from_value(value)?;
    Ok(WardrobeResponse::Wardrobe(wardrobe))
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[async_trait]
impl WardrobeClient for HttpWardrobeClient {
    async fn fetch_wardrobe(&self, token: &str) -> Result<WardrobeResponse> {
        let url = self.capsule_url(token);
        tracing::debug!("Making wardrobe request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Wardrobe response status: {}", status);
        if status != StatusCode::OK {
            return Err(CapsuleError::NonSuccessStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        interpret_body(&body)
    }
}
