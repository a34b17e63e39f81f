//! Region registry and membership evaluation.
//!
//! Holds every monitored region in registration order and recomputes
//! inside/outside membership per location sample. Single-sample edge
//! trigger: one transition event per region whose state flips, no
//! smoothing or debounce.

use crate::domain::entities::{Coordinate, MonitoredRegion, TransitionEvent};
use crate::domain::errors::DomainError;

/// The set of monitored regions. Enumeration (and therefore transition
/// emission) order is registration order; re-registering an identifier
/// replaces the region in place.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    regions: Vec<MonitoredRegion>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a region, or replace the one holding the same identifier.
    /// A non-positive or non-finite radius is rejected without touching
    /// any state.
    pub fn register(&mut self, region: MonitoredRegion) -> Result<(), DomainError> {
        if !(region.radius_meters.is_finite() && region.radius_meters > 0.0) {
            return Err(DomainError::InvalidRegion(format!(
                "radius must be a positive number of meters, got {}",
                region.radius_meters
            )));
        }
        match self
            .regions
            .iter_mut()
            .find(|r| r.identifier == region.identifier)
        {
            Some(existing) => *existing = region,
            None => self.regions.push(region),
        }
        Ok(())
    }

    /// All monitored regions, in registration order.
    pub fn all_regions(&self) -> &[MonitoredRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Recompute membership for every region against one sample.
    ///
    /// A region flips when the newly computed membership differs from its
    /// stored state, or when its state was still unknown; each flip yields
    /// one event and overwrites the stored state. Unchanged regions are
    /// untouched. An invalid sample fails before any region is read or
    /// written.
    pub fn evaluate(&mut self, sample: Coordinate) -> Result<Vec<TransitionEvent>, DomainError> {
        if !sample.is_valid() {
            return Err(DomainError::InvalidSample(format!(
                "latitude {} / longitude {} is not a representable position",
                sample.lat, sample.lon
            )));
        }

        let mut transitions = Vec::new();
        for region in &mut self.regions {
            let inside = region.contains(sample);
            if region.is_inside != Some(inside) {
                region.is_inside = Some(inside);
                transitions.push(TransitionEvent {
                    region_id: region.identifier.clone(),
                    region_name: region.display_name.clone(),
                    center: region.center,
                    radius_meters: region.radius_meters,
                    entered: inside,
                });
            }
        }
        Ok(transitions)
    }
}
