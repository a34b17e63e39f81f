//! Domain entities. Pure data structures for the core business.
//!
//! No platform/IO types here — these are mapped from adapters.

use crate::domain::geo::haversine_meters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reminder note recorded when a region is entered.
pub const NOTE_ENTERED: &str = "Entered region";
/// Reminder note recorded when a region is exited.
pub const NOTE_EXITED: &str = "Exited region";

/// WGS-84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// A coordinate is representable iff both components are finite and
    /// within [-90, 90] latitude / [-180, 180] longitude.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A circular geofence under watch.
///
/// `is_inside` is the last-evaluated membership. It stays `None` until the
/// first evaluation unless seeded from a known sample at registration time,
/// and is only ever written by membership evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredRegion {
    pub identifier: String,
    pub display_name: String,
    pub center: Coordinate,
    pub radius_meters: f64,
    pub is_inside: Option<bool>,
}

impl MonitoredRegion {
    /// Membership test for one sample. Boundary-inclusive: a sample exactly
    /// at radius distance counts as inside.
    pub fn contains(&self, sample: Coordinate) -> bool {
        haversine_meters(sample, self.center) <= self.radius_meters
    }
}

/// Emitted when a region's membership flips between two consecutive
/// evaluations. Carries a snapshot of the region at flip time.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEvent {
    pub region_id: String,
    pub region_name: String,
    pub center: Coordinate,
    pub radius_meters: f64,
    /// New membership: true = entered, false = exited.
    pub entered: bool,
}

/// One durable record per membership transition. Append-only once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderEvent {
    pub id: Uuid,
    pub region_name: String,
    pub note: String,
    pub center: Coordinate,
    pub radius_meters: f64,
    /// Unix seconds at record creation.
    pub recorded_at: i64,
}

impl ReminderEvent {
    /// Build the record for one transition.
    pub fn from_transition(event: &TransitionEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            region_name: event.region_name.clone(),
            note: if event.entered { NOTE_ENTERED } else { NOTE_EXITED }.to_string(),
            center: event.center,
            radius_meters: event.radius_meters,
            recorded_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// One record of the externally fetched location catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLocation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
}

impl CatalogLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_ranges_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.1, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn reminder_note_matches_transition_direction() {
        let event = TransitionEvent {
            region_id: "office".into(),
            region_name: "Office".into(),
            center: Coordinate::new(0.0, 0.0),
            radius_meters: 100.0,
            entered: true,
        };
        assert_eq!(ReminderEvent::from_transition(&event).note, NOTE_ENTERED);

        let event = TransitionEvent { entered: false, ..event };
        let reminder = ReminderEvent::from_transition(&event);
        assert_eq!(reminder.note, NOTE_EXITED);
        assert_eq!(reminder.region_name, "Office");
        assert_eq!(reminder.radius_meters, 100.0);
    }
}
