//! Live cooldown monitoring.
//!
//! Cooldown state is authoritative in the store (pushed on every visit
//! append) and decays locally: the store feed never fires when a window
//! merely becomes past, so a once-per-second timer flips expired state
//! to idle without waiting for a write.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use dine_store::{DineStore, DineStoreResult};
use entities::VisitEvent;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Interval of the local decay timer.
const DECAY_TICK: StdDuration = StdDuration::from_secs(1);

/// Cooldown state for one employee, derived from the visit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CooldownState {
    /// No lockout: the employee has no events, or the newest window has
    /// passed.
    Idle,
    /// The newest window is still open.
    Active {
        /// End of the lockout window.
        until: DateTime<Utc>,
        /// Restaurant recorded by the event that opened the window.
        visited_restaurant_id: Uuid,
    },
}

impl CooldownState {
    /// Derives the state from a user's newest event at the given
    /// instant. `Active` iff the greatest `cooldown_until` is strictly
    /// in the future.
    pub fn derive(latest: Option<&VisitEvent>, now: DateTime<Utc>) -> Self {
        match latest {
            Some(event) if event.cooldown_until > now => Self::Active {
                until: event.cooldown_until,
                visited_restaurant_id: event.visited_restaurant_id,
            },
            _ => Self::Idle,
        }
    }

    /// Returns true while a lockout window is open.
    pub fn in_cooldown(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Time left in the window at `now`, clamped at zero. `None` when
    /// idle.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self {
            Self::Idle => None,
            Self::Active { until, .. } => Some((*until - now).max(Duration::zero())),
        }
    }

    /// Folds a newly observed event into the state, keeping the
    /// greatest window boundary.
    fn observe(&self, event: &VisitEvent, now: DateTime<Utc>) -> Self {
        let candidate = Self::derive(Some(event), now);
        match (self, &candidate) {
            // The current window already reaches further; the decay tick
            // owns flipping it once it expires.
            (Self::Active { until: current, .. }, Self::Active { until: observed, .. })
                if current >= observed =>
            {
                self.clone()
            }
            (Self::Active { .. }, Self::Idle) => self.clone(),
            _ => candidate,
        }
    }
}

/// Renders a remaining duration as `M:SS`, flooring both components.
pub fn format_remaining(remaining: Duration) -> String {
    let ms = remaining.num_milliseconds().max(0);
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
}

/// Watches the visit log and reports live cooldown state per employee.
pub struct CooldownMonitor<S> {
    store: Arc<S>,
}

impl<S> Clone for CooldownMonitor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DineStore + 'static> CooldownMonitor<S> {
    /// Creates a monitor over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Establishes a live subscription for one employee.
    ///
    /// The first value is computed from the store before this returns.
    /// Afterwards the state is recomputed on every visit append observed
    /// on the store feed, and the decay timer flips `Active` to `Idle`
    /// at expiry. The subscription runs until cancelled or dropped.
    pub async fn subscribe(&self, user_id: Uuid) -> DineStoreResult<CooldownSubscription> {
        let feed = self.store.subscribe_visits();
        let latest = self.store.latest_visit(user_id).await?;
        let initial = CooldownState::derive(latest.as_ref(), Utc::now());

        let (tx, rx) = watch::channel(initial);
        let store = Arc::clone(&self.store);
        let task = tokio::spawn(run_subscription(store, user_id, feed, tx));

        Ok(CooldownSubscription { state: rx, task })
    }
}

async fn run_subscription<S: DineStore>(
    store: Arc<S>,
    user_id: Uuid,
    mut feed: broadcast::Receiver<VisitEvent>,
    tx: watch::Sender<CooldownState>,
) {
    let mut tick = tokio::time::interval(DECAY_TICK);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let active = tx.borrow().in_cooldown();
        tokio::select! {
            observed = feed.recv() => match observed {
                Ok(event) if event.user_id == user_id => {
                    let next = tx.borrow().observe(&event, Utc::now());
                    if send_if_changed(&tx, next).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        user_id = %user_id,
                        skipped,
                        "Visit feed lagged, resyncing cooldown state from store"
                    );
                    match store.latest_visit(user_id).await {
                        Ok(latest) => {
                            let next = CooldownState::derive(latest.as_ref(), Utc::now());
                            if send_if_changed(&tx, next).is_err() {
                                break;
                            }
                        }
                        Err(error) => {
                            tracing::error!(
                                user_id = %user_id,
                                %error,
                                "Cooldown resync after feed lag failed"
                            );
                        }
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = tick.tick(), if active => {
                let now = Utc::now();
                let expired = match &*tx.borrow() {
                    CooldownState::Active { until, .. } => *until <= now,
                    CooldownState::Idle => false,
                };
                if expired && tx.send(CooldownState::Idle).is_err() {
                    break;
                }
            }
        }
    }
}

fn send_if_changed(
    tx: &watch::Sender<CooldownState>,
    next: CooldownState,
) -> Result<(), watch::error::SendError<CooldownState>> {
    if *tx.borrow() == next {
        return Ok(());
    }
    tx.send(next)
}

/// Handle to one employee's live cooldown subscription.
///
/// Cancelling (or dropping) the handle stops the background task and the
/// decay timer; no further state changes are delivered afterwards.
#[derive(Debug)]
pub struct CooldownSubscription {
    state: watch::Receiver<CooldownState>,
    task: JoinHandle<()>,
}

impl CooldownSubscription {
    /// Returns the current state.
    pub fn current(&self) -> CooldownState {
        self.state.borrow().clone()
    }

    /// Waits for the next state change and returns the new state, or
    /// `None` once the subscription has been cancelled.
    pub async fn changed(&mut self) -> Option<CooldownState> {
        match self.state.changed().await {
            Ok(()) => Some(self.state.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// Cancels the subscription.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for CooldownSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use dine_store::MemoryStore;
    use tokio::time::timeout;

    use super::*;

    fn event_at(user_id: Uuid, recorded_at: DateTime<Utc>) -> VisitEvent {
        VisitEvent::new(user_id, None, Uuid::new_v4()).with_recorded_at(recorded_at)
    }

    #[test]
    fn test_derive_matches_window() {
        let user_id = Uuid::new_v4();
        let t0 = Utc::now();
        let event = event_at(user_id, t0);

        // Mid-window: active with the event's boundary.
        let state = CooldownState::derive(Some(&event), t0 + Duration::minutes(10));
        assert_eq!(
            state,
            CooldownState::Active {
                until: event.cooldown_until,
                visited_restaurant_id: event.visited_restaurant_id,
            }
        );

        // Past the window: idle. So is the boundary instant itself.
        assert_eq!(
            CooldownState::derive(Some(&event), t0 + Duration::minutes(16)),
            CooldownState::Idle
        );
        assert_eq!(
            CooldownState::derive(Some(&event), event.cooldown_until),
            CooldownState::Idle
        );

        // No events at all: idle, not an error.
        assert_eq!(CooldownState::derive(None, t0), CooldownState::Idle);
    }

    #[test]
    fn test_observe_keeps_greatest_boundary() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let newer = event_at(user_id, now);
        let older = event_at(user_id, now - Duration::minutes(5));

        let state = CooldownState::derive(Some(&newer), now);
        // A stale event must not shrink the window.
        assert_eq!(state.observe(&older, now), state);

        // A fresher event extends it.
        let fresher = event_at(user_id, now + Duration::seconds(30));
        assert_eq!(
            state.observe(&fresher, now),
            CooldownState::Active {
                until: fresher.cooldown_until,
                visited_restaurant_id: fresher.visited_restaurant_id,
            }
        );
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::milliseconds(899_999)), "14:59");
        assert_eq!(format_remaining(Duration::milliseconds(90_500)), "1:30");
        assert_eq!(format_remaining(Duration::seconds(5)), "0:05");
        assert_eq!(format_remaining(Duration::zero()), "0:00");
        assert_eq!(format_remaining(Duration::milliseconds(-300)), "0:00");
    }

    #[test]
    fn test_countdown_decreases_every_second() {
        let user_id = Uuid::new_v4();
        let t0 = Utc::now();
        let event = event_at(user_id, t0);
        let state = CooldownState::derive(Some(&event), t0);

        // Re-evaluating one second apart strictly decreases the total
        // remaining seconds until the window is exhausted.
        let mut previous = i64::MAX;
        let mut now = t0;
        while let Some(remaining) = state.remaining(now) {
            let seconds = remaining.num_seconds();
            assert!(seconds < previous);
            if remaining == Duration::zero() {
                break;
            }
            previous = seconds;
            now += Duration::seconds(1);
        }
        assert_eq!(state.remaining(now), Some(Duration::zero()));
    }

    #[tokio::test]
    async fn test_subscribe_reports_initial_state() {
        let store = Arc::new(MemoryStore::new());
        let monitor = CooldownMonitor::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();

        let subscription = monitor.subscribe(user_id).await.unwrap();
        assert_eq!(subscription.current(), CooldownState::Idle);

        // Pre-existing events are reflected immediately on subscribe.
        let event = store
            .append_visit(VisitEvent::new(user_id, None, Uuid::new_v4()))
            .await
            .unwrap();
        let subscription = monitor.subscribe(user_id).await.unwrap();
        assert_eq!(
            subscription.current(),
            CooldownState::Active {
                until: event.cooldown_until,
                visited_restaurant_id: event.visited_restaurant_id,
            }
        );
    }

    #[tokio::test]
    async fn test_subscription_observes_new_writes() {
        let store = Arc::new(MemoryStore::new());
        let monitor = CooldownMonitor::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();

        let mut subscription = monitor.subscribe(user_id).await.unwrap();
        assert_eq!(subscription.current(), CooldownState::Idle);

        // A write for another user never surfaces.
        store
            .append_visit(VisitEvent::new(Uuid::new_v4(), None, Uuid::new_v4()))
            .await
            .unwrap();

        let event = store
            .append_visit(VisitEvent::new(user_id, None, Uuid::new_v4()))
            .await
            .unwrap();

        let next = timeout(StdDuration::from_secs(1), subscription.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            next,
            CooldownState::Active {
                until: event.cooldown_until,
                visited_restaurant_id: event.visited_restaurant_id,
            }
        );
    }

    #[tokio::test]
    async fn test_state_decays_to_idle_without_a_write() {
        let store = Arc::new(MemoryStore::new());
        let monitor = CooldownMonitor::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();

        // Window ends about 1.2 seconds from now.
        let recorded_at = Utc::now() - entities::cooldown_window() + Duration::milliseconds(1_200);
        store
            .append_visit(event_at(user_id, recorded_at))
            .await
            .unwrap();

        let mut subscription = monitor.subscribe(user_id).await.unwrap();
        assert!(subscription.current().in_cooldown());

        let next = timeout(StdDuration::from_secs(3), subscription.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next, CooldownState::Idle);
    }

    #[tokio::test]
    async fn test_cancel_stops_delivery() {
        let store = Arc::new(MemoryStore::new());
        let monitor = CooldownMonitor::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();

        let mut subscription = monitor.subscribe(user_id).await.unwrap();
        subscription.cancel();

        store
            .append_visit(VisitEvent::new(user_id, None, Uuid::new_v4()))
            .await
            .unwrap();

        // The watch channel closes once the task is gone; no state ever
        // arrives for the post-cancel write.
        assert_eq!(subscription.changed().await, None);
    }

    #[tokio::test]
    async fn test_resubscribe_reproduces_state() {
        let store = Arc::new(MemoryStore::new());
        let monitor = CooldownMonitor::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();

        store
            .append_visit(VisitEvent::new(user_id, None, Uuid::new_v4()))
            .await
            .unwrap();

        let first = monitor.subscribe(user_id).await.unwrap();
        let before = first.current();
        first.cancel();

        let second = monitor.subscribe(user_id).await.unwrap();
        assert_eq!(second.current(), before);
    }
}
