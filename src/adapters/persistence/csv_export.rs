//! CSV export for reminder history. Uses the `csv` crate for safe
//! serialization.

use crate::domain::ReminderEvent;
use chrono::{DateTime, Utc};

/// Convert reminder history to a CSV string with a header row.
///
/// Format: `Region,Note,Latitude,Longitude,RadiusMeters,RecordedAt`
pub fn reminders_to_csv(events: &[ReminderEvent]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record([
        "Region",
        "Note",
        "Latitude",
        "Longitude",
        "RadiusMeters",
        "RecordedAt",
    ])?;

    for event in events {
        let recorded = DateTime::<Utc>::from_timestamp(event.recorded_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| event.recorded_at.to_string());
        let lat = event.center.lat.to_string();
        let lon = event.center.lon.to_string();
        let radius = event.radius_meters.to_string();

        wtr.write_record([
            event.region_name.as_str(),
            event.note.as_str(),
            lat.as_str(),
            lon.as_str(),
            radius.as_str(),
            recorded.as_str(),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NOTE_ENTERED;
    use crate::domain::Coordinate;
    use uuid::Uuid;

    fn reminder(name: &str) -> ReminderEvent {
        ReminderEvent {
            id: Uuid::new_v4(),
            region_name: name.to_string(),
            note: NOTE_ENTERED.to_string(),
            center: Coordinate::new(37.3349, -122.009),
            radius_meters: 150.0,
            recorded_at: 1_700_000_000,
        }
    }

    #[test]
    fn empty_history_is_just_the_header() {
        let csv = reminders_to_csv(&[]).unwrap();
        assert_eq!(csv.trim(), "Region,Note,Latitude,Longitude,RadiusMeters,RecordedAt");
    }

    #[test]
    fn rows_carry_the_region_snapshot() {
        let csv = reminders_to_csv(&[reminder("Office"), reminder("Gym")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Office,Entered region,37.3349,-122.009,150,"));
        assert!(lines[2].starts_with("Gym,"));
        // 2023-11-14 22:13 UTC
        assert!(lines[1].ends_with("2023-11-14 22:13"));
    }
}
