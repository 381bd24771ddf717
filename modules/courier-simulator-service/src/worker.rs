//! Courier simulation loop.
//!
//! Marks the task out for delivery, then pushes a synthetic position to the
//! tracking service every tick until the service reports the task delivered
//! or the courier is within the proximity threshold of the destination.

use crate::config::Config;
use crate::simulator::{self, Position};
use crate::tracking_client::{TrackingError, TrackingService};
use async_trait::async_trait;
use courier_tracking_types::{DeliveryStatus, DeliveryTaskResponse};
use std::time::Duration;

/// Waits between ticks
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The service reported the task as delivered
    Delivered,
    /// The courier came within the proximity threshold of the destination
    NearDestination,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Delivered => "task delivered",
            StopReason::NearDestination => "destination reached",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub reports_succeeded: u64,
    pub reports_failed: u64,
    pub final_position: Position,
    pub stop_reason: StopReason,
    pub last_status: Option<DeliveryStatus>,
    pub last_report_at: Option<String>,
}

pub struct CourierSimulator<S, Z> {
    config: Config,
    service: S,
    sleeper: Z,
    position: Position,
    ticks: u64,
    reports_succeeded: u64,
    reports_failed: u64,
    last_status: Option<DeliveryStatus>,
    last_report_at: Option<String>,
}

impl<S: TrackingService, Z: Sleeper> CourierSimulator<S, Z> {
    pub fn new(config: Config, service: S, sleeper: Z) -> Self {
        Self {
            config,
            service,
            sleeper,
            position: Position::origin(),
            ticks: 0,
            reports_succeeded: 0,
            reports_failed: 0,
            last_status: None,
            last_report_at: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run until a terminal condition holds. Remote failures never end the loop.
    pub async fn run(&mut self) -> RunSummary {
        log::info!(
            "[COURIER_SIM] Simulation started for task {} (poll interval: {:?})",
            self.config.task_id,
            self.config.poll_interval
        );

        self.announce_departure().await;

        loop {
            if let Some(reason) = self.tick().await {
                log::info!(
                    "[COURIER_SIM] Stopping polling: {} after {} ticks",
                    reason.as_str(),
                    self.ticks
                );
                return self.summary(reason);
            }

            log::debug!(
                "[COURIER_SIM] Sleeping {:?} before next tick",
                self.config.poll_interval
            );
            self.sleeper.sleep(self.config.poll_interval).await;
        }
    }

    /// Set the task status to OUT_FOR_DELIVERY. Failures are logged and ignored.
    pub async fn announce_departure(&self) {
        match self
            .service
            .set_status(&self.config.task_id, DeliveryStatus::OutForDelivery)
            .await
        {
            Ok(Some(task)) => {
                log::info!("[COURIER_SIM] Set status to OUT_FOR_DELIVERY: {:?}", task);
            }
            Ok(None) => {
                log::info!("[COURIER_SIM] Set status to OUT_FOR_DELIVERY (no task payload)");
            }
            Err(e) => {
                log::warn!("[COURIER_SIM] Error setting status: {}", e);
            }
        }
    }

    pub async fn report_position(
        &self,
        position: Position,
    ) -> Result<DeliveryTaskResponse, TrackingError> {
        let result = self
            .service
            .update_location(&self.config.task_id, position.into())
            .await;
        match &result {
            Err(e) if e.is_service_error() => {
                log::warn!("[COURIER_SIM] Location update rejected: {}", e);
            }
            Err(e) => {
                log::warn!("[COURIER_SIM] Error updating location: {}", e);
            }
            Ok(_) => {}
        }
        result
    }

    /// One iteration: advance, report, and evaluate the stop conditions when
    /// the report went through.
    pub async fn tick(&mut self) -> Option<StopReason> {
        self.position
            .advance(self.config.step_lat, self.config.step_lon);
        self.ticks += 1;

        let task = match self.report_position(self.position).await {
            Ok(task) => task,
            Err(_) => {
                self.reports_failed += 1;
                return None;
            }
        };

        self.reports_succeeded += 1;
        self.last_status = task.status;
        self.last_report_at = Some(chrono::Utc::now().to_rfc3339());

        log::info!(
            "[COURIER_SIM] Updated location: {}, Status={}",
            self.position,
            task.status.map(|s| s.as_str()).unwrap_or("none")
        );

        if task.status.is_some_and(|s| s.is_delivered()) {
            Some(StopReason::Delivered)
        } else if simulator::is_near_destination(
            self.position,
            self.config.destination,
            self.config.proximity_threshold,
        ) {
            Some(StopReason::NearDestination)
        } else {
            None
        }
    }

    fn summary(&self, stop_reason: StopReason) -> RunSummary {
        RunSummary {
            ticks: self.ticks,
            reports_succeeded: self.reports_succeeded,
            reports_failed: self.reports_failed,
            final_position: self.position,
            stop_reason,
            last_status: self.last_status,
            last_report_at: self.last_report_at.clone(),
        }
    }
}
