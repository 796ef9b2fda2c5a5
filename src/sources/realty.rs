use crate::config::RemoteSettings;
use crate::error::RemoteError;
use crate::sources::payload::{ListRequest, ListResponse};
use crate::sources::traits::ListingsTransport;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const LIST_PATH: &str = "/properties/v3/list";

/// HTTP client for the Realty listings API on RapidAPI
pub struct RealtyClient {
    client: Client,
    settings: RemoteSettings,
}

impl RealtyClient {
    /// Create a new client from the remote provider settings
    pub fn new(settings: RemoteSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("estate-listings/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), LIST_PATH)
    }
}

#[async_trait]
impl ListingsTransport for RealtyClient {
    async fn list(&self, request: &ListRequest) -> Result<ListResponse, RemoteError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(RemoteError::MissingApiKey)?;

        let url = self.endpoint();
        debug!(
            url = %url,
            postal_code = %request.postal_code,
            limit = request.limit,
            offset = request.offset,
            "Requesting listings"
        );

        let response = self
            .client
            .post(&url)
            .header("x-rapidapi-host", &self.settings.host)
            .header("x-rapidapi-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Listings provider returned status: {}", status);
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes of listings JSON", bytes.len());

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn provider_name(&self) -> &'static str {
        "Realty in US"
    }
}
