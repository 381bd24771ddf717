//! Courier Simulator Service — standalone binary that drives a delivery task
//! along a synthetic path, reporting each position to the tracking service.
//!
//! Default target: http://localhost:8080/delivery-tasks

mod config;
mod simulator;
mod tracking_client;
mod worker;

use config::Config;
use tracking_client::HttpTrackingClient;
use worker::{CourierSimulator, TokioSleeper};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let client = HttpTrackingClient::new(&config.base_url, config.request_timeout)
        .expect("Failed to create HTTP client");

    log::info!(
        "[COURIER_SIM] Reporting task {} to {} (destination: {}, threshold: {}, step: +{}/-{})",
        config.task_id,
        client.base_url(),
        config.destination,
        config.proximity_threshold,
        config.step_lat,
        config.step_lon
    );

    let mut simulator = CourierSimulator::new(config, client, TokioSleeper);

    let interrupted = tokio::select! {
        summary = simulator.run() => {
            log::info!(
                "[COURIER_SIM] Finished ({}): {} ticks, {} reports ok, {} failed, final position {}, last status {}, last report at {}",
                summary.stop_reason.as_str(),
                summary.ticks,
                summary.reports_succeeded,
                summary.reports_failed,
                summary.final_position,
                summary.last_status.map(|s| s.as_str()).unwrap_or("none"),
                summary.last_report_at.as_deref().unwrap_or("never")
            );
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        log::warn!(
            "[COURIER_SIM] Shutdown requested, stopped at {} after {} ticks",
            simulator.position(),
            simulator.ticks()
        );
    }
}
