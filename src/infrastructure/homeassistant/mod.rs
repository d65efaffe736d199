//! Home Assistant REST client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::application::errors::HostError;
use crate::domain::entities::EntityState;
use crate::domain::traits::HomeHost;

/// Home Assistant host reached over its REST API
pub struct HomeAssistantClient {
    base_url: String,
    token: String,
    client: Client,
}

impl HomeAssistantClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Get the API URL for a path below `/api/`
    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Check the token and connectivity (`GET /api/`)
    pub async fn ping(&self) -> Result<(), HostError> {
        let (status, body) = self.get("").await?;
        match status_error(status, body) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn get(&self, path: &str) -> Result<(StatusCode, String), HostError> {
        let response = self.client
            .get(self.api_url(path))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| HostError::Network(e.to_string()))?;
        read_response(response).await
    }
}

async fn read_response(response: reqwest::Response) -> Result<(StatusCode, String), HostError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| HostError::Network(e.to_string()))?;
    Ok((status, body))
}

/// Error for a non-success status; 401 and 403 mean a bad token
fn status_error(status: StatusCode, body: String) -> Option<HostError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Some(HostError::Unauthorized);
    }
    if !status.is_success() {
        return Some(HostError::Api { status: status.as_u16(), body });
    }
    None
}

fn parse_states(status: StatusCode, body: String) -> Result<Vec<EntityState>, HostError> {
    if let Some(e) = status_error(status, body.clone()) {
        return Err(e);
    }
    serde_json::from_str(&body).map_err(|e| HostError::Parse(e.to_string()))
}

/// Unknown entities come back as 404
fn parse_state(status: StatusCode, body: String) -> Result<Option<EntityState>, HostError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if let Some(e) = status_error(status, body.clone()) {
        return Err(e);
    }
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| HostError::Parse(e.to_string()))
}

#[async_trait]
impl HomeHost for HomeAssistantClient {
    async fn states(&self) -> Result<Vec<EntityState>, HostError> {
        let (status, body) = self.get("states").await?;
        parse_states(status, body)
    }

    async fn state(&self, entity_id: &str) -> Result<Option<EntityState>, HostError> {
        let (status, body) = self.get(&format!("states/{}", entity_id)).await?;
        parse_state(status, body)
    }

    /// The REST endpoint answers once the service call has completed
    async fn call_service(&self, domain: &str, service: &str, data: Value) -> Result<(), HostError> {
        tracing::info!("Calling {}.{} with {}", domain, service, data);

        let response = self.client
            .post(self.api_url(&format!("services/{}/{}", domain, service)))
            .bearer_auth(&self.token)
            .json(&data)
            .send()
            .await
            .map_err(|e| HostError::Network(e.to_string()))?;

        let (status, body) = read_response(response).await?;
        match status_error(status, body) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
