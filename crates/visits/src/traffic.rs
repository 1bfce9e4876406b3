//! Traffic aggregation over the visit log.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dine_store::{DineStore, DineStoreResult, VisitFilter};
use entities::VisitEvent;
use uuid::Uuid;

/// Inclusive date range over `recorded_at`; absent bounds are unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }
}

/// One directed edge of the traffic flow report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficFlow {
    /// Home restaurant the diners are employed at.
    pub from: Uuid,
    /// Restaurant they visited.
    pub to: Uuid,
    /// Number of events with this pairing.
    pub count: u64,
}

/// Counts events per visited restaurant.
///
/// Restaurants with no visits are absent from the map, never
/// zero-filled.
pub fn visit_counts<'a, I>(events: I) -> HashMap<Uuid, u64>
where
    I: IntoIterator<Item = &'a VisitEvent>,
{
    let mut counts = HashMap::new();
    for event in events {
        *counts.entry(event.visited_restaurant_id).or_insert(0) += 1;
    }
    counts
}

/// Aggregates directed home-to-visited flows.
///
/// Self-visits (`from == to`) and events with no recorded home
/// restaurant carry no traffic and are skipped. The result is sorted by
/// count descending; ties keep first-encountered order.
pub fn traffic_flow<'a, I>(events: I) -> Vec<TrafficFlow>
where
    I: IntoIterator<Item = &'a VisitEvent>,
{
    let mut flows: Vec<TrafficFlow> = Vec::new();
    let mut index: HashMap<(Uuid, Uuid), usize> = HashMap::new();

    for event in events {
        let Some(from) = event.home_restaurant_id else {
            continue;
        };
        let to = event.visited_restaurant_id;
        if from == to {
            continue;
        }
        match index.get(&(from, to)) {
            Some(&slot) => flows[slot].count += 1,
            None => {
                index.insert((from, to), flows.len());
                flows.push(TrafficFlow { from, to, count: 1 });
            }
        }
    }

    flows.sort_by(|a, b| b.count.cmp(&a.count));
    flows
}

/// Read-only reporting over the stored visit log.
pub struct TrafficAnalyzer<S> {
    store: Arc<S>,
}

impl<S> Clone for TrafficAnalyzer<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DineStore> TrafficAnalyzer<S> {
    /// Creates an analyzer over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn events_in(&self, range: DateRange) -> DineStoreResult<Vec<VisitEvent>> {
        self.store
            .list_visits(VisitFilter {
                start: range.start,
                end: range.end,
                ..Default::default()
            })
            .await
    }

    /// Visit counts per restaurant over the range.
    pub async fn visit_counts(&self, range: DateRange) -> DineStoreResult<HashMap<Uuid, u64>> {
        let events = self.events_in(range).await?;
        Ok(visit_counts(&events))
    }

    /// Directed traffic flows over the range.
    pub async fn traffic_flow(&self, range: DateRange) -> DineStoreResult<Vec<TrafficFlow>> {
        let events = self.events_in(range).await?;
        Ok(traffic_flow(&events))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use dine_store::MemoryStore;

    use super::*;

    fn event(home: Option<Uuid>, visited: Uuid) -> VisitEvent {
        VisitEvent::new(Uuid::new_v4(), home, visited)
    }

    #[test]
    fn test_visit_counts_completeness() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let events = vec![
            event(None, a),
            event(None, a),
            event(Some(a), a),
            event(Some(a), b),
        ];

        let counts = visit_counts(&events);

        assert_eq!(counts.get(&a), Some(&3));
        assert_eq!(counts.get(&b), Some(&1));
        // Every event in range is counted exactly once.
        assert_eq!(counts.values().sum::<u64>(), events.len() as u64);
        // Unvisited restaurants are absent, not zero.
        assert_eq!(counts.get(&Uuid::new_v4()), None);
    }

    #[test]
    fn test_flow_excludes_self_visits() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let events = vec![
            // Staff dining at their own restaurant: no traffic.
            event(Some(a), a),
            event(Some(a), b),
            event(Some(a), b),
            // Unknown home restaurant: nothing to attribute.
            event(None, b),
        ];

        let flows = traffic_flow(&events);

        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0], TrafficFlow { from: a, to: b, count: 2 });
        assert!(flows.iter().all(|f| f.from != f.to));

        // The same events still count as visits.
        let counts = visit_counts(&events);
        assert_eq!(counts.get(&a), Some(&1));
        assert_eq!(counts.get(&b), Some(&3));
    }

    #[test]
    fn test_flow_sorted_descending_with_stable_ties() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let events = vec![
            event(Some(a), b),
            event(Some(b), c),
            event(Some(b), c),
            event(Some(c), a),
        ];

        let flows = traffic_flow(&events);

        assert!(flows.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(flows[0], TrafficFlow { from: b, to: c, count: 2 });
        // Equal counts keep first-encountered order.
        assert_eq!(flows[1], TrafficFlow { from: a, to: b, count: 1 });
        assert_eq!(flows[2], TrafficFlow { from: c, to: a, count: 1 });
    }

    #[tokio::test]
    async fn test_analyzer_applies_inclusive_range() {
        let store = Arc::new(MemoryStore::new());
        let analyzer = TrafficAnalyzer::new(Arc::clone(&store));
        let home = Uuid::new_v4();
        let visited = Uuid::new_v4();

        let start = Utc::now() - Duration::days(7);
        let end = Utc::now() - Duration::days(1);

        for recorded_at in [
            start,
            end,
            start - Duration::milliseconds(1),
            end + Duration::milliseconds(1),
        ] {
            store
                .append_visit(event(Some(home), visited).with_recorded_at(recorded_at))
                .await
                .unwrap();
        }

        let counts = analyzer
            .visit_counts(DateRange::new(Some(start), Some(end)))
            .await
            .unwrap();
        assert_eq!(counts.get(&visited), Some(&2));

        let flows = analyzer
            .traffic_flow(DateRange::new(Some(start), Some(end)))
            .await
            .unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].count, 2);

        // An open range sees everything.
        let all = analyzer.visit_counts(DateRange::default()).await.unwrap();
        assert_eq!(all.get(&visited), Some(&4));
    }
}
