//! HTTP client for the duty list API.
//!
//! [`DutyClient`] speaks to the four `/api/todos` endpoints;
//! [`DutyBoard`] keeps the state a list view needs on top of it.

mod board;

pub use board::*;

use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::db::Duty;
use crate::models::{DutyInput, ErrorResponse, MessageResponse};
use crate::{Error, Result};

/// Client for the duty list API.
#[derive(Clone)]
pub struct DutyClient {
    client: Client,
    base_url: Url,
}

impl DutyClient {
    /// Create a client for the backend at `config.base_url`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("duties/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Keep any path prefix on the base URL when joining endpoints
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> Result<Url> {
        Ok(self.base_url.join("api/todos")?)
    }

    fn item_url(&self, id: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("api/todos/{}", urlencoding::encode(id)))?)
    }

    /// Fetch every duty, newest first.
    pub async fn list(&self) -> Result<Vec<Duty>> {
        let url = self.collection_url()?;
        debug!(%url, "Fetching duties");

        let response = self.client.get(url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Create a duty and return the stored record.
    pub async fn create(&self, name: &str) -> Result<Duty> {
        let url = self.collection_url()?;
        debug!(%url, "Creating duty");

        let response = self
            .client
            .post(url)
            .json(&DutyInput::named(name))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Rename a duty.
    pub async fn update(&self, id: &str, name: &str) -> Result<MessageResponse> {
        let url = self.item_url(id)?;
        debug!(%url, "Updating duty");

        let response = self
            .client
            .put(url)
            .json(&DutyInput::named(name))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Delete a duty.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse> {
        let url = self.item_url(id)?;
        debug!(%url, "Deleting duty");

        let response = self.client.delete(url).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Turn a non-2xx response into [`Error::Api`], keeping the server's message.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("Request failed with status code {}", status.as_u16()));

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client = DutyClient::new(&ClientConfig::new("http://localhost:8000/backend")).unwrap();
        assert_eq!(
            client.collection_url().unwrap().as_str(),
            "http://localhost:8000/backend/api/todos"
        );
    }

    #[test]
    fn test_item_url_encodes_id() {
        let client = DutyClient::new(&ClientConfig::new("http://localhost:8000")).unwrap();
        assert_eq!(
            client.item_url("a b/c").unwrap().as_str(),
            "http://localhost:8000/api/todos/a%20b%2Fc"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = DutyClient::new(&ClientConfig::new("not a url"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
