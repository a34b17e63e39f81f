//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CatalogLocation, Coordinate, DomainError, ReminderEvent};
use tokio::sync::mpsc;

/// An active sample subscription: the cancellable handle plus the
/// arrival-ordered sample stream. The channel closes when the sampler
/// runs out of positions or the subscription is cancelled.
pub struct SampleSubscription {
    pub id: u64,
    pub samples: mpsc::Receiver<Coordinate>,
}

/// Device position source. Push-based; rate and accuracy are delivery
/// mechanism specifics the application never sees.
#[async_trait::async_trait]
pub trait LocationSampler: Send + Sync {
    /// Begin sample delivery. Samples arrive in production order.
    async fn subscribe(&self) -> Result<SampleSubscription, DomainError>;

    /// Stop delivery for the given subscription. Samples already queued
    /// may still be drained from the receiver.
    async fn unsubscribe(&self, subscription: SampleSubscription) -> Result<(), DomainError>;
}

/// Local alert delivery. Fire-and-forget from the caller's perspective.
#[async_trait::async_trait]
pub trait NotifierPort: Send + Sync {
    async fn notify(&self, title: &str, body: &str) -> Result<(), DomainError>;
}

/// Durable reminder history. Append-only; no update or delete surface.
#[async_trait::async_trait]
pub trait ReminderStorePort: Send + Sync {
    /// Append one record. Appending the same id twice is a no-op.
    async fn append(&self, event: &ReminderEvent) -> Result<(), DomainError>;

    /// Every stored record, oldest first.
    async fn list_all(&self) -> Result<Vec<ReminderEvent>, DomainError>;
}

/// Candidate-location catalog: one unauthenticated GET of a static file.
#[async_trait::async_trait]
pub trait CatalogPort: Send + Sync {
    async fn fetch_locations(&self) -> Result<Vec<CatalogLocation>, DomainError>;
}
