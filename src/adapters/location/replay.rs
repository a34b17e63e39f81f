//! Route-replay location sampler. Feeds a fixed route through the sample
//! channel at a steady tick, standing in for a platform position source.

use crate::domain::{Coordinate, DomainError};
use crate::ports::{LocationSampler, SampleSubscription};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Replays a list of positions at a fixed interval. Each subscription gets
/// its own producing task; cancelling the subscription aborts the task and
/// closes the channel.
pub struct RouteReplaySampler {
    route: Vec<Coordinate>,
    interval: Duration,
    repeat: bool,
    queue_size: usize,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<u64, JoinHandle<()>>>,
}

impl RouteReplaySampler {
    pub fn new(route: Vec<Coordinate>, interval: Duration, repeat: bool, queue_size: usize) -> Self {
        Self {
            route,
            interval,
            repeat,
            queue_size,
            next_id: AtomicU64::new(0),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Load a route from a JSON file: an array of `{"lat": .., "lon": ..}`
    /// points.
    pub fn from_file(
        path: impl AsRef<Path>,
        interval: Duration,
        repeat: bool,
        queue_size: usize,
    ) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Sampler(format!("read route file {}: {}", path.display(), e)))?;
        let route: Vec<Coordinate> = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Sampler(format!("decode route file: {}", e)))?;
        if route.is_empty() {
            return Err(DomainError::Sampler("route file contains no points".into()));
        }
        Ok(Self::new(route, interval, repeat, queue_size))
    }
}

#[async_trait::async_trait]
impl LocationSampler for RouteReplaySampler {
    async fn subscribe(&self) -> Result<SampleSubscription, DomainError> {
        if self.route.is_empty() {
            return Err(DomainError::Sampler("no route points to replay".into()));
        }
        let (tx, rx) = mpsc::channel(self.queue_size);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let route = self.route.clone();
        let period = self.interval;
        let repeat = self.repeat;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut idx = 0usize;
            loop {
                ticker.tick().await;
                // Bounded send: blocks when the tracking loop lags, so the
                // queue stays arrival-ordered instead of growing unbounded.
                if tx.send(route[idx]).await.is_err() {
                    break; // receiver dropped
                }
                idx += 1;
                if idx == route.len() {
                    if repeat {
                        idx = 0;
                    } else {
                        break;
                    }
                }
            }
            debug!(subscription = id, "route replay finished");
        });
        self.tasks.lock().await.insert(id, handle);
        info!(
            subscription = id,
            points = self.route.len(),
            "sample subscription started"
        );
        Ok(SampleSubscription { id, samples: rx })
    }

    async fn unsubscribe(&self, subscription: SampleSubscription) -> Result<(), DomainError> {
        if let Some(handle) = self.tasks.lock().await.remove(&subscription.id) {
            handle.abort();
        }
        info!(subscription = subscription.id, "sample subscription stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.001, 0.0),
            Coordinate::new(0.002, 0.0),
        ]
    }

    #[tokio::test]
    async fn replays_the_route_in_order_then_closes() {
        let sampler = RouteReplaySampler::new(route(), Duration::from_millis(1), false, 8);
        let mut sub = sampler.subscribe().await.unwrap();

        let mut seen = Vec::new();
        while let Some(sample) = sub.samples.recv().await {
            seen.push(sample);
        }
        assert_eq!(seen, route());
    }

    #[tokio::test]
    async fn unsubscribe_closes_the_stream() {
        let sampler = RouteReplaySampler::new(route(), Duration::from_millis(1), true, 8);
        let mut sub = sampler.subscribe().await.unwrap();

        assert!(sub.samples.recv().await.is_some());
        let id = sub.id;
        sampler.unsubscribe(sub).await.unwrap();
        assert!(sampler.tasks.lock().await.get(&id).is_none());
    }

    #[tokio::test]
    async fn empty_route_cannot_be_subscribed() {
        let sampler = RouteReplaySampler::new(Vec::new(), Duration::from_millis(1), false, 8);
        assert!(matches!(
            sampler.subscribe().await.unwrap_err(),
            DomainError::Sampler(_)
        ));
    }
}
