//! HTTP/JSON client for the delivery task tracking service.
//!
//! The simulator talks to the service only through the `TrackingService`
//! trait so the control loop can be driven by a scripted fake in tests.

use async_trait::async_trait;
use courier_tracking_types::{DeliveryStatus, DeliveryTaskResponse, LocationUpdate};
use std::fmt;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failed call to the tracking service
#[derive(Debug, Clone)]
pub struct TrackingError {
    /// Error message
    pub message: String,
    /// HTTP status code when the service answered with a non-2xx status
    pub status_code: Option<u16>,
}

impl TrackingError {
    pub fn new(message: impl Into<String>) -> Self {
        TrackingError {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        TrackingError {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// The service was reached but rejected the request
    pub fn is_service_error(&self) -> bool {
        self.status_code.is_some()
    }

    /// Network, timeout or decoding failure
    pub fn is_transport_error(&self) -> bool {
        self.status_code.is_none()
    }
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.status_code {
            write!(f, "[HTTP {}] {}", code, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for TrackingError {}

/// Remote operations the simulator needs from the tracking service
#[async_trait]
pub trait TrackingService: Send + Sync {
    /// `PATCH {base}/{task_id}` with the status as a JSON string.
    /// The service may answer `null` when it has no task to return.
    async fn set_status(
        &self,
        task_id: &str,
        status: DeliveryStatus,
    ) -> Result<Option<DeliveryTaskResponse>, TrackingError>;

    /// `PATCH {base}/{task_id}/location`
    async fn update_location(
        &self,
        task_id: &str,
        update: LocationUpdate,
    ) -> Result<DeliveryTaskResponse, TrackingError>;
}

pub struct HttpTrackingClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTrackingClient {
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> Result<Self, TrackingError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TrackingError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =====================================================
    // HTTP helpers
    // =====================================================

    async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, TrackingError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TrackingError::new(format!("Tracking service unavailable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackingError::with_status(
                format!("PATCH {} failed: {}", url, truncate_body(&body)),
                status.as_u16(),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TrackingError::new(format!("Invalid response from tracking service: {}", e)))
    }
}

#[async_trait]
impl TrackingService for HttpTrackingClient {
    async fn set_status(
        &self,
        task_id: &str,
        status: DeliveryStatus,
    ) -> Result<Option<DeliveryTaskResponse>, TrackingError> {
        self.patch(&format!("/{}", task_id), &status).await
    }

    async fn update_location(
        &self,
        task_id: &str,
        update: LocationUpdate,
    ) -> Result<DeliveryTaskResponse, TrackingError> {
        self.patch(&format!("/{}/location", task_id), &update).await
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    }
}
