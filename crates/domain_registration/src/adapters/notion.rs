//! Notion Record Store Adapter
//!
//! This module implements [`RecordStorePort`] against the Notion REST API.
//! Each participant becomes one page in the target database; group titles
//! are read from the group page.
//!
//! # Configuration
//!
//! ```rust,ignore
//! let config = NotionConfig::new(api_key, database_id)
//!     .with_schema(RecordSchema::for_version(SchemaVersion::V2));
//! let store = NotionRecordStore::new(config)?;
//! ```
//!
//! # Error Handling
//!
//! API errors are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Other transport failures -> `PortError::Connection`
//! - Any other status -> `PortError::Validation` with the API message
//!
//! No call is retried. The orchestrator decides what a failure means.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use core_kernel::{
    AdapterHealth, DomainPort, GroupId, HealthCheckResult, HealthCheckable, OperationMetadata,
    PortError, RecordId,
};

use crate::participant::ParticipantRecord;
use crate::ports::{RecordHandle, RecordStorePort};
use crate::schema::RecordSchema;

/// Public Notion API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version the property payloads are written for
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

const ADAPTER_ID: &str = "notion-record-store";

/// Configuration for the Notion adapter
#[derive(Debug, Clone)]
pub struct NotionConfig {
    /// Base URL of the API, overridable for tests
    pub base_url: String,
    /// Integration secret
    pub api_key: String,
    /// Database that receives participant pages
    pub database_id: String,
    /// Value of the `Notion-Version` header
    pub notion_version: String,
    /// Request timeout; the transport default applies when unset
    pub timeout_secs: Option<u64>,
    /// Property layout of the database
    pub schema: RecordSchema,
}

impl NotionConfig {
    /// Creates a configuration for the public API
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            database_id: database_id.into(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout_secs: None,
            schema: RecordSchema::default(),
        }
    }

    /// Points the adapter at another base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the property layout
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Sets a request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Notion-backed implementation of RecordStorePort
#[derive(Debug, Clone)]
pub struct NotionRecordStore {
    config: NotionConfig,
    client: reqwest::Client,
}

impl NotionRecordStore {
    /// Creates the adapter and its HTTP client
    ///
    /// # Errors
    ///
    /// Returns `PortError::Internal` if the client cannot be built or the
    /// API key cannot be used as a header value.
    pub fn new(config: NotionConfig) -> Result<Self, PortError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| PortError::internal("API key is not a valid header value"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "Notion-Version",
            HeaderValue::from_str(&config.notion_version)
                .map_err(|_| PortError::internal("Notion version is not a valid header value"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| PortError::Internal {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { config, client })
    }

    /// Returns the database receiving participant pages
    pub fn database_id(&self) -> &str {
        &self.config.database_id
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json(&self, path: &str, operation: &str) -> Result<Value, PortError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e, operation))?;

        Self::check_status(response, operation)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| PortError::transformation(format!("{operation}: undecodable response: {e}")))
    }

    async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        operation: &str,
    ) -> Result<Response, PortError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e, operation))?;

        Self::check_status(response, operation).await
    }

    /// Passes 2xx responses through and maps anything else to a `PortError`
    async fn check_status(response: Response, operation: &str) -> Result<Response, PortError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let resource = response
            .url()
            .path()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();

        Err(map_status(status, retry_after, &body, operation, &resource))
    }

    fn transport_error(&self, err: reqwest::Error, operation: &str) -> PortError {
        if err.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.config.timeout_secs.unwrap_or_default() * 1000,
            }
        } else {
            PortError::Connection {
                message: format!("{operation}: {err}"),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Error body returned by the API
#[derive(Debug, Default, Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Fields of a created page the adapter keeps
#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

fn map_status(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
    operation: &str,
    resource: &str,
) -> PortError {
    let parsed = serde_json::from_str::<NotionErrorBody>(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("{operation} failed with status {status}"));

    tracing::debug!(operation, %status, code = parsed.code.as_deref(), "Notion request rejected");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::unauthorized(message),
        StatusCode::NOT_FOUND => PortError::not_found("Notion object", resource),
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(1),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("notion ({status}): {message}"),
        },
        _ => PortError::validation(message),
    }
}

/// Extracts the plain text of the first non-empty title property of a page
pub(crate) fn extract_title(page: &Value) -> Option<String> {
    let properties = page.get("properties")?.as_object()?;

    properties.values().find_map(|property| {
        if property.get("type").and_then(Value::as_str) != Some("title") {
            return None;
        }
        let fragments = property.get("title")?.as_array()?;
        if fragments.is_empty() {
            return None;
        }
        let text: String = fragments
            .iter()
            .filter_map(|f| f.get("plain_text").and_then(Value::as_str))
            .collect();
        Some(text)
    })
    .filter(|t| !t.is_empty())
}

impl DomainPort for NotionRecordStore {}

#[async_trait]
impl HealthCheckable for NotionRecordStore {
    /// Retrieves the target database to confirm credentials and id
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let path = format!("databases/{}", self.config.database_id);
        let result = self.get_json(&path, "retrieve_database").await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) if e.is_transient() => (AdapterHealth::Degraded, Some(e.to_string())),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl RecordStorePort for NotionRecordStore {
    async fn create_record(
        &self,
        participant: &ParticipantRecord,
        group_id: &GroupId,
        submitted_by: Option<&str>,
        metadata: Option<OperationMetadata>,
    ) -> Result<RecordHandle, PortError> {
        let properties = self.config.schema.properties(
            participant,
            group_id,
            submitted_by,
            Utc::now().date_naive(),
        );
        let body = json!({
            "parent": { "database_id": self.config.database_id },
            "properties": properties,
        });

        tracing::debug!(
            correlation_id = metadata.as_ref().and_then(|m| m.correlation_id.as_deref()),
            initiated_by = metadata.as_ref().and_then(|m| m.initiated_by.as_deref()),
            index = metadata.as_ref().and_then(|m| m.context.get("index")).map(String::as_str),
            group_id = %group_id,
            schema = %self.config.schema.version,
            "Creating participant page"
        );

        let response = self.post("pages", &body, "create_page").await?;

        // The page exists from here on; an unreadable body only loses the handle
        match response.json::<CreatedPage>().await {
            Ok(page) => Ok(RecordHandle {
                id: Some(RecordId::new(page.id)),
                url: page.url,
            }),
            Err(e) => {
                tracing::warn!(group_id = %group_id, error = %e, "Created page without a readable answer");
                Ok(RecordHandle { id: None, url: None })
            }
        }
    }

    async fn fetch_group_title(&self, group_id: &GroupId) -> Option<String> {
        let path = format!("pages/{}", group_id.as_str());
        match self.get_json(&path, "retrieve_page").await {
            Ok(page) => {
                let title = extract_title(&page);
                if title.is_none() {
                    tracing::debug!(group_id = %group_id, "Group page has no title");
                }
                title
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(group_id = %group_id, "Group page not found");
                None
            }
            Err(e) => {
                tracing::warn!(group_id = %group_id, error = %e, "Group title lookup failed");
                None
            }
        }
    }
}
