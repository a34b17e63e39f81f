//! Geofence tracking: consume location samples one at a time, detect
//! membership transitions, and fan each transition out to the notifier
//! and the reminder store.
//!
//! - The registry (plus the last-known sample) lives behind one async
//!   mutex; evaluations never overlap.
//! - Alerting and persistence are independent best-effort calls: either
//!   may fail without affecting the other or the committed membership
//!   state.

use crate::domain::{
    Coordinate, DomainError, MonitoredRegion, RegionRegistry, ReminderEvent, TransitionEvent,
};
use crate::ports::{NotifierPort, ReminderStorePort, SampleSubscription};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Registry plus the most recent sample, guarded together.
#[derive(Default)]
struct TrackingState {
    registry: RegionRegistry,
    last_sample: Option<Coordinate>,
}

/// Tracking service. Owns the region registry and coordinates transition
/// side effects through injected ports.
pub struct TrackingService {
    state: Mutex<TrackingState>,
    notifier: Arc<dyn NotifierPort>,
    store: Arc<dyn ReminderStorePort>,
}

impl TrackingService {
    pub fn new(notifier: Arc<dyn NotifierPort>, store: Arc<dyn ReminderStorePort>) -> Self {
        Self {
            state: Mutex::new(TrackingState::default()),
            notifier,
            store,
        }
    }

    /// Register (or replace) a monitored region. When a sample has already
    /// been received the region starts with known membership, so the next
    /// evaluation only reports an actual change.
    pub async fn register_region(&self, mut region: MonitoredRegion) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if let Some(sample) = state.last_sample {
            region.is_inside = Some(region.contains(sample));
        }
        let seeded = region.is_inside;
        state.registry.register(region)?;
        debug!(count = state.registry.len(), ?seeded, "region registered");
        Ok(())
    }

    /// Snapshot of every monitored region, in registration order.
    pub async fn regions(&self) -> Vec<MonitoredRegion> {
        self.state.lock().await.registry.all_regions().to_vec()
    }

    /// Process one location sample: update membership for every region and
    /// dispatch the resulting transitions. Returns the transitions.
    pub async fn handle_sample(
        &self,
        sample: Coordinate,
    ) -> Result<Vec<TransitionEvent>, DomainError> {
        let transitions = {
            let mut state = self.state.lock().await;
            let transitions = state.registry.evaluate(sample)?;
            state.last_sample = Some(sample);
            transitions
        };

        for event in &transitions {
            self.dispatch(event).await;
        }
        Ok(transitions)
    }

    /// Alert + persist for one transition. The two calls are independent
    /// and best-effort: a failure is logged and never rolls back the
    /// membership change or suppresses the other call.
    async fn dispatch(&self, event: &TransitionEvent) {
        let title = if event.entered {
            "Geofence Entered"
        } else {
            "Geofence Exited"
        };
        let body = format!(
            "You have {} the geofence region: {}.",
            if event.entered { "entered" } else { "exited" },
            event.region_name
        );
        let reminder = ReminderEvent::from_transition(event);

        let (notified, stored) = tokio::join!(
            self.notifier.notify(title, &body),
            self.store.append(&reminder),
        );
        if let Err(e) = notified {
            warn!(region = %event.region_name, error = %e, "notification dispatch failed");
        }
        if let Err(e) = stored {
            warn!(region = %event.region_name, error = %e, "reminder append failed");
        }
    }

    /// Consume the subscription strictly one sample at a time, in arrival
    /// order, until the stream closes or Ctrl-C. A sample in flight is
    /// always fully processed; interruption only stops waiting for the
    /// next one.
    pub async fn run_watch(&self, subscription: &mut SampleSubscription) {
        info!(subscription = subscription.id, "watch started");
        loop {
            tokio::select! {
                maybe = subscription.samples.recv() => {
                    let Some(sample) = maybe else {
                        info!("sample stream closed");
                        break;
                    };
                    debug!(lat = sample.lat, lon = sample.lon, "sample received");
                    match self.handle_sample(sample).await {
                        Ok(transitions) if !transitions.is_empty() => {
                            info!(count = transitions.len(), "membership transitions");
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "sample rejected"),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("watch interrupted");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NOTE_ENTERED, NOTE_EXITED};
    use std::sync::Mutex as StdMutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingNotifier {
        fail: bool,
        calls: StdMutex<Vec<(String, String)>>,
    }

    #[async_trait::async_trait]
    impl NotifierPort for RecordingNotifier {
        async fn notify(&self, title: &str, body: &str) -> Result<(), DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            if self.fail {
                return Err(DomainError::Dispatch("simulated".into()));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        fail: bool,
        events: StdMutex<Vec<ReminderEvent>>,
    }

    #[async_trait::async_trait]
    impl ReminderStorePort for MemoryStore {
        async fn append(&self, event: &ReminderEvent) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::Store("simulated".into()));
            }
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<ReminderEvent>, DomainError> {
            Ok(self.events.lock().unwrap().clone())
        }
    }

    fn service(
        notifier_fails: bool,
        store_fails: bool,
    ) -> (Arc<RecordingNotifier>, Arc<MemoryStore>, TrackingService) {
        let notifier = Arc::new(RecordingNotifier {
            fail: notifier_fails,
            ..Default::default()
        });
        let store = Arc::new(MemoryStore {
            fail: store_fails,
            ..Default::default()
        });
        let tracking = TrackingService::new(
            Arc::clone(&notifier) as Arc<dyn NotifierPort>,
            Arc::clone(&store) as Arc<dyn ReminderStorePort>,
        );
        (notifier, store, tracking)
    }

    fn office() -> MonitoredRegion {
        MonitoredRegion {
            identifier: "office".into(),
            display_name: "Office".into(),
            center: Coordinate::new(0.0, 0.0),
            radius_meters: 100.0,
            is_inside: Some(false),
        }
    }

    fn inside_office() -> Coordinate {
        Coordinate::new(0.0003, 0.0) // ~33 m from the center
    }

    fn far_away() -> Coordinate {
        Coordinate::new(0.05, 0.0) // ~5.5 km out
    }

    #[tokio::test]
    async fn entering_alerts_and_records_a_reminder() {
        let (notifier, store, tracking) = service(false, false);
        tracking.register_region(office()).await.unwrap();

        let transitions = tracking.handle_sample(inside_office()).await.unwrap();
        assert_eq!(transitions.len(), 1);

        let calls = notifier.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Geofence Entered");
        assert!(calls[0].1.contains("Office"));

        let stored = store.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].note, NOTE_ENTERED);
    }

    #[tokio::test]
    async fn exit_reminder_uses_the_exit_note() {
        let (_, store, tracking) = service(false, false);
        tracking.register_region(office()).await.unwrap();

        tracking.handle_sample(inside_office()).await.unwrap();
        tracking.handle_sample(far_away()).await.unwrap();

        let stored = store.list_all().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].note, NOTE_EXITED);
    }

    #[tokio::test]
    async fn failed_alert_still_records_and_keeps_state() {
        let (notifier, store, tracking) = service(true, false);
        tracking.register_region(office()).await.unwrap();

        tracking.handle_sample(inside_office()).await.unwrap();

        // The alert was attempted and failed; the reminder landed anyway
        // and the registry kept the new membership.
        assert_eq!(notifier.calls.lock().unwrap().len(), 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
        assert_eq!(tracking.regions().await[0].is_inside, Some(true));
    }

    #[tokio::test]
    async fn failed_append_still_alerts() {
        let (notifier, _, tracking) = service(false, true);
        tracking.register_region(office()).await.unwrap();

        tracking.handle_sample(inside_office()).await.unwrap();
        assert_eq!(notifier.calls.lock().unwrap().len(), 1);
        assert_eq!(tracking.regions().await[0].is_inside, Some(true));
    }

    #[tokio::test]
    async fn unchanged_membership_causes_no_side_effects() {
        let (notifier, store, tracking) = service(false, false);
        tracking.register_region(office()).await.unwrap();

        tracking.handle_sample(far_away()).await.unwrap();
        assert!(notifier.calls.lock().unwrap().is_empty());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn registration_seeds_membership_from_the_last_sample() {
        let (notifier, _, tracking) = service(false, false);

        tracking.handle_sample(inside_office()).await.unwrap();

        let mut region = office();
        region.is_inside = None;
        tracking.register_region(region).await.unwrap();
        assert_eq!(tracking.regions().await[0].is_inside, Some(true));

        // Already inside at registration time: nothing new to report.
        let transitions = tracking.handle_sample(inside_office()).await.unwrap();
        assert!(transitions.is_empty());
        assert!(notifier.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn watch_processes_samples_in_arrival_order() {
        let (_, store, tracking) = service(false, false);
        tracking.register_region(office()).await.unwrap();

        let (tx, rx) = mpsc::channel(8);
        tx.send(inside_office()).await.unwrap();
        tx.send(far_away()).await.unwrap();
        drop(tx);

        let mut subscription = SampleSubscription { id: 7, samples: rx };
        tracking.run_watch(&mut subscription).await;

        let notes: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.note)
            .collect();
        assert_eq!(notes, [NOTE_ENTERED, NOTE_EXITED]);
    }
}
