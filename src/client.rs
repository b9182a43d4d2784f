use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

use crate::config::FormConfig;
use crate::model::{normalize_envelope, RecipeRecord, RecipeRequest};
use crate::FormError;

/// A remote service that turns ingredients into a recipe
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Post the request and return the raw JSON payload
    async fn generate(&self, request: &RecipeRequest) -> Result<Value, FormError>;
}

/// HTTP client for the recipe generation endpoint
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(config: &FormConfig) -> Result<Self, FormError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(ApiClient {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        ApiClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the request and normalize the response into a record
    pub async fn fetch_recipe(&self, request: &RecipeRequest) -> Result<RecipeRecord, FormError> {
        let payload = self.generate(request).await?;
        normalize_envelope(&payload)
    }
}

#[async_trait]
impl RecipeService for ApiClient {
    async fn generate(&self, request: &RecipeRequest) -> Result<Value, FormError> {
        info!("Sending {} ingredients to {}", request.ingredients.len(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        info!("Response received (status {})", response.status());

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        debug!("{:?}", payload);
        Ok(payload)
    }
}
