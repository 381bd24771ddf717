//! Synthetic courier path.
//!
//! The courier starts at the warehouse origin and moves one fixed diagonal
//! step per tick: north by `step_lat`, west by `step_lon`.

use courier_tracking_types::LocationUpdate;
use std::fmt;

/// A point in (latitude, longitude) space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Warehouse origin every task starts from
    pub fn origin() -> Self {
        Self::default()
    }

    /// Move one step: latitude grows, longitude shrinks.
    pub fn advance(&mut self, step_lat: f64, step_lon: f64) {
        self.latitude += step_lat;
        self.longitude -= step_lon;
    }
}

impl From<Position> for LocationUpdate {
    fn from(p: Position) -> Self {
        LocationUpdate {
            latitude: p.latitude,
            longitude: p.longitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat={}, Lon={}", self.latitude, self.longitude)
    }
}

/// True when both axes are strictly within `threshold` of the destination.
pub fn is_near_destination(position: Position, destination: Position, threshold: f64) -> bool {
    let lat_diff = (position.latitude - destination.latitude).abs();
    let lon_diff = (position.longitude - destination.longitude).abs();
    lat_diff < threshold && lon_diff < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_north_west() {
        let mut p = Position::origin();
        p.advance(0.5, 0.25);
        p.advance(0.5, 0.25);
        assert_eq!(p, Position::new(1.0, -0.5));
    }

    #[test]
    fn test_near_destination_inside_threshold() {
        let dest = Position::new(1.0, -1.0);
        assert!(is_near_destination(Position::new(1.0, -1.0), dest, 0.5));
        assert!(is_near_destination(Position::new(0.75, -1.25), dest, 0.5));
    }

    #[test]
    fn test_near_destination_boundary_is_not_close() {
        let dest = Position::new(1.0, -1.0);
        // Exactly at the threshold on either axis does not count
        assert!(!is_near_destination(Position::new(0.5, -1.0), dest, 0.5));
        assert!(!is_near_destination(Position::new(1.0, -0.5), dest, 0.5));
        assert!(!is_near_destination(Position::new(0.5, -0.5), dest, 0.5));
    }

    #[test]
    fn test_near_destination_requires_both_axes() {
        let dest = Position::new(1.0, -1.0);
        assert!(!is_near_destination(Position::new(1.0, 3.0), dest, 0.5));
        assert!(!is_near_destination(Position::new(-2.0, -1.0), dest, 0.5));
    }

    #[test]
    fn test_zero_threshold_is_never_close() {
        let dest = Position::new(1.0, -1.0);
        assert!(!is_near_destination(dest, dest, 0.0));
    }

    #[test]
    fn test_into_location_update() {
        let update: LocationUpdate = Position::new(0.1, -0.1).into();
        assert_eq!(update.latitude, 0.1);
        assert_eq!(update.longitude, -0.1);
    }
}
