use crate::simulator::Position;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/delivery-tasks";
pub const DEFAULT_TASK_ID: &str = "6818b4d86f1a9e7d3336ea48";
const DEFAULT_POLL_INTERVAL_MS: u64 = 10;
// 1303 steps of 0.1 out; the 0.1 threshold ends the run one step earlier, at tick 1302
const DEFAULT_DEST_LAT: f64 = 130.29999999999688;
const DEFAULT_DEST_LON: f64 = -130.29999999999688;
const DEFAULT_PROXIMITY_THRESHOLD: f64 = 0.1;
const DEFAULT_STEP: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub task_id: String,
    pub poll_interval: Duration,
    /// `None` leaves requests on the HTTP client's default (no timeout)
    pub request_timeout: Option<Duration>,
    pub destination: Position,
    pub proximity_threshold: f64,
    pub step_lat: f64,
    pub step_lon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            task_id: DEFAULT_TASK_ID.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: None,
            destination: Position::new(DEFAULT_DEST_LAT, DEFAULT_DEST_LON),
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            step_lat: DEFAULT_STEP,
            step_lon: DEFAULT_STEP,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let poll_interval_ms = parse_or(
            &lookup,
            "COURIER_SIM_POLL_INTERVAL_MS",
            DEFAULT_POLL_INTERVAL_MS,
        );
        let request_timeout = lookup("COURIER_SIM_REQUEST_TIMEOUT_SECS").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    log::warn!(
                        "[COURIER_SIM] Ignoring invalid COURIER_SIM_REQUEST_TIMEOUT_SECS={:?}",
                        raw
                    );
                    None
                }
            }
        });

        Self {
            base_url: lookup("COURIER_SIM_BASE_URL").unwrap_or(defaults.base_url),
            task_id: lookup("COURIER_SIM_TASK_ID").unwrap_or(defaults.task_id),
            poll_interval: Duration::from_millis(poll_interval_ms),
            request_timeout,
            destination: Position::new(
                parse_or(&lookup, "COURIER_SIM_DEST_LAT", DEFAULT_DEST_LAT),
                parse_or(&lookup, "COURIER_SIM_DEST_LON", DEFAULT_DEST_LON),
            ),
            proximity_threshold: parse_or(
                &lookup,
                "COURIER_SIM_PROXIMITY_THRESHOLD",
                DEFAULT_PROXIMITY_THRESHOLD,
            ),
            step_lat: parse_or(&lookup, "COURIER_SIM_STEP_LAT", DEFAULT_STEP),
            step_lon: parse_or(&lookup, "COURIER_SIM_STEP_LON", DEFAULT_STEP),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("[COURIER_SIM] Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.task_id, DEFAULT_TASK_ID);
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.destination, Position::new(130.29999999999688, -130.29999999999688));
        assert_eq!(config.proximity_threshold, 0.1);
        assert_eq!(config.step_lat, 0.1);
        assert_eq!(config.step_lon, 0.1);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("COURIER_SIM_BASE_URL", "http://tracking:9000/delivery-tasks"),
            ("COURIER_SIM_TASK_ID", "task-42"),
            ("COURIER_SIM_POLL_INTERVAL_MS", "250"),
            ("COURIER_SIM_REQUEST_TIMEOUT_SECS", "5"),
            ("COURIER_SIM_DEST_LAT", "1.0"),
            ("COURIER_SIM_DEST_LON", "-1.0"),
            ("COURIER_SIM_PROXIMITY_THRESHOLD", "0.5"),
            ("COURIER_SIM_STEP_LAT", "0.5"),
            ("COURIER_SIM_STEP_LON", " 0.25 "),
        ]);
        assert_eq!(config.base_url, "http://tracking:9000/delivery-tasks");
        assert_eq!(config.task_id, "task-42");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.destination, Position::new(1.0, -1.0));
        assert_eq!(config.proximity_threshold, 0.5);
        assert_eq!(config.step_lat, 0.5);
        assert_eq!(config.step_lon, 0.25);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("COURIER_SIM_POLL_INTERVAL_MS", "soon"),
            ("COURIER_SIM_REQUEST_TIMEOUT_SECS", "-1"),
            ("COURIER_SIM_PROXIMITY_THRESHOLD", "close"),
        ]);
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.proximity_threshold, 0.1);
    }
}
