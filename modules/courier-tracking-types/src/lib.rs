//! Shared types for the courier simulator and the delivery task tracking service it reports to.

use serde::{Deserialize, Serialize};
use std::fmt;

// =====================================================
// Domain Types
// =====================================================

/// Lifecycle status of a delivery task, as owned by the tracking service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Assigned,
    OutForDelivery,
    Delivered,
    Cancelled,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Assigned => "ASSIGNED",
            DeliveryStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            DeliveryStatus::Delivered => "DELIVERED",
            DeliveryStatus::Cancelled => "CANCELLED",
            DeliveryStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery task as returned by the tracking service.
///
/// Every field is optional: the simulator only depends on `status`, the rest
/// is carried for logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTaskResponse {
    pub id: Option<String>,
    pub order_id: Option<String>,
    pub courier_id: Option<String>,
    pub price: Option<f64>,
    pub status: Option<DeliveryStatus>,
    pub order_latitude: Option<f64>,
    pub order_longitude: Option<f64>,
    pub courier_latitude: Option<f64>,
    pub courier_longitude: Option<f64>,
}

impl DeliveryTaskResponse {
    pub fn with_status(status: DeliveryStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

// =====================================================
// Request Types
// =====================================================

/// Body of `PATCH {base}/{task_id}/location`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}
