//! HTTP client for the external JSON document store.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::InfrastructureError;

/// Document store connection configuration
#[derive(Debug, Clone)]
pub struct DocStoreConfig {
    /// Base URL of the store, e.g. `https://store.example.com/v1`
    pub base_url: String,
    /// API key sent with every request
    pub api_key: String,
    /// Timeout for store requests in seconds; store calls are expected to
    /// complete or fail within this bound, never block indefinitely
    pub request_timeout_secs: u64,
}

impl DocStoreConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = std::env::var("DOC_STORE_URL")
            .map_err(|_| InfrastructureError::Config("DOC_STORE_URL not set".to_string()))?;
        let api_key = std::env::var("DOC_STORE_API_KEY")
            .map_err(|_| InfrastructureError::Config("DOC_STORE_API_KEY not set".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            request_timeout_secs: std::env::var("DOC_STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

/// A stored document: the store-assigned id plus the collection fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub id: String,
    #[serde(flatten)]
    pub fields: T,
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    data: Vec<Document<T>>,
}

/// Thin client over the document store's per-collection REST surface:
/// create, query by field equality, partial field update, delete by id.
#[derive(Debug, Clone)]
pub struct DocStoreClient {
    http: reqwest::Client,
    config: DocStoreConfig,
}

impl DocStoreClient {
    /// Create a new client with a bounded request timeout
    pub fn new(config: DocStoreConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(DocStoreConfig::from_env()?)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}/documents", self.config.base_url, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    /// Persist a new document; the store assigns and returns the id.
    pub async fn create_document<T>(
        &self,
        collection: &str,
        fields: &T,
    ) -> Result<Document<T>, InfrastructureError>
    where
        T: Serialize + DeserializeOwned,
    {
        let response = self
            .http
            .post(self.collection_url(collection))
            .header("X-Api-Key", &self.config.api_key)
            .json(fields)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let created: Document<T> = response.json().await?;
        debug!(collection = collection, id = %created.id, "Created document");
        Ok(created)
    }

    /// Fetch up to `limit` documents where `field` equals `value`.
    pub async fn query<T>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
        limit: usize,
    ) -> Result<Vec<Document<T>>, InfrastructureError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(self.collection_url(collection))
            .header("X-Api-Key", &self.config.api_key)
            .query(&[(field, value), ("limit", &limit.to_string())])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body: QueryResponse<T> = response.json().await?;
        Ok(body.data)
    }

    /// Partially update a document, leaving unnamed fields untouched.
    pub async fn update_document_fields(
        &self,
        collection: &str,
        id: &str,
        fields: &serde_json::Value,
    ) -> Result<(), InfrastructureError> {
        let response = self
            .http
            .patch(self.document_url(collection, id))
            .header("X-Api-Key", &self.config.api_key)
            .json(fields)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Delete a document by id.
    ///
    /// # Returns
    /// * `Ok(true)` - Document was deleted
    /// * `Ok(false)` - No document with that id
    pub async fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<bool, InfrastructureError> {
        let response = self
            .http
            .delete(self.document_url(collection, id))
            .header("X-Api-Key", &self.config.api_key)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check_status(response).await?;
        Ok(true)
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, InfrastructureError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(InfrastructureError::Store {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DocStoreConfig {
        DocStoreConfig {
            base_url: "https://store.example.com/v1".to_string(),
            api_key: "test-key".to_string(),
            request_timeout_secs: 10,
        }
    }

    #[test]
    fn test_url_building() {
        let client = DocStoreClient::new(config()).unwrap();
        assert_eq!(
            client.collection_url("otp_codes"),
            "https://store.example.com/v1/collections/otp_codes/documents"
        );
        assert_eq!(
            client.document_url("users", "abc123"),
            "https://store.example.com/v1/collections/users/documents/abc123"
        );
    }

    #[test]
    fn test_document_id_is_flattened_alongside_fields() {
        #[derive(Serialize, Deserialize)]
        struct Fields {
            email: String,
        }

        let raw = r#"{"id":"doc-1","email":"a@b.com"}"#;
        let doc: Document<Fields> = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.fields.email, "a@b.com");
    }

    #[test]
    fn test_query_response_shape() {
        #[derive(Serialize, Deserialize)]
        struct Fields {
            attempts: i32,
        }

        let raw = r#"{"data":[{"id":"doc-1","attempts":2},{"id":"doc-2","attempts":0}]}"#;
        let body: QueryResponse<Fields> = serde_json::from_str(raw).unwrap();
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0].fields.attempts, 2);
    }
}
