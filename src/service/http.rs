//! Contact service backed by the contact desk HTTP API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};

use super::ContactService;
use crate::errors::{AppError, ErrorDetails};
use crate::models::{Contact, ContactFormData};

/// Response envelope as written by the API handlers.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<ErrorDetails>,
}

/// Remote contact service speaking JSON over HTTP.
#[derive(Clone)]
pub struct HttpContactService {
    client: Client,
    base_url: String,
}

impl HttpContactService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

#[async_trait]
impl ContactService for HttpContactService {
    async fn list(&self) -> Result<Vec<Contact>, AppError> {
        let resp = self.client.get(self.url("/contacts")).send().await?;
        required(read_envelope(resp).await?)
    }

    async fn create(&self, data: &ContactFormData) -> Result<Contact, AppError> {
        let resp = self
            .client
            .post(self.url("/contacts"))
            .json(data)
            .send()
            .await?;
        required(read_envelope(resp).await?)
    }

    async fn update(&self, id: &str, data: &ContactFormData) -> Result<Contact, AppError> {
        let resp = self
            .client
            .put(self.url(&format!("/contacts/{}", id)))
            .json(data)
            .send()
            .await?;
        required(read_envelope(resp).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let resp = self
            .client
            .delete(self.url(&format!("/contacts/{}", id)))
            .send()
            .await?;
        read_envelope::<serde_json::Value>(resp).await?;
        Ok(())
    }
}

async fn read_envelope<T: DeserializeOwned>(resp: Response) -> Result<Option<T>, AppError> {
    let status = resp.status();
    let body: Envelope<T> = resp.json().await?;

    if body.success {
        return Ok(body.data);
    }

    Err(match body.error {
        Some(details) => AppError::from_code(&details.code, details.message),
        None => AppError::Transport(format!("Request failed with status {}", status)),
    })
}

fn required<T>(data: Option<T>) -> Result<T, AppError> {
    data.ok_or_else(|| AppError::Transport("Response envelope carried no data".to_string()))
}
