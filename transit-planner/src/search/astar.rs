//! Bidirectional A* over the lazily materialised transit graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Journey, Mode, Segment, StationCode, Transport as DomainTransport, Walk as DomainWalk};
use crate::graph::{GraphStore, Neighbor};
use crate::materialiser::Materialiser;
use crate::schedule::ScheduleSource;

use super::config::SearchConfig;
use super::error::SearchError;
use super::heuristic::LatLonCache;

#[derive(Debug, Clone)]
enum EdgeKind {
    Walk { distance_km: f64 },
    Transport {
        thread_uid: String,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },
}

struct QueueEntry {
    fval: f64,
    station: StationCode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fval == other.fval
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the smallest f-value first.
        other.fval.partial_cmp(&self.fval).unwrap_or(Ordering::Equal)
    }
}

/// Bidirectional time-dependent A* search core.
pub struct AStarSearch<S, G> {
    materialiser: Arc<Materialiser<S, G>>,
    latlon: LatLonCache,
    config: SearchConfig,
}

impl<S, G> AStarSearch<S, G>
where
    S: ScheduleSource,
    G: GraphStore,
{
    pub fn new(materialiser: Arc<Materialiser<S, G>>, latlon: LatLonCache, config: SearchConfig) -> Self {
        Self {
            materialiser,
            latlon,
            config,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        starts: &[StationCode],
        goals: &[StationCode],
        start_time: DateTime<Utc>,
        mode: Mode,
    ) -> Result<Journey, SearchError> {
        if starts.is_empty() || goals.is_empty() {
            return Err(SearchError::InvalidRequest(
                "search needs at least one start and one goal station".to_string(),
            ));
        }

        let deadline = tokio::time::Instant::now() + self.config.deadline;

        let mut forward_g: HashMap<StationCode, f64> = HashMap::new();
        let mut backward_g: HashMap<StationCode, f64> = HashMap::new();
        let mut forward_time: HashMap<StationCode, DateTime<Utc>> = HashMap::new();
        let mut backward_time: HashMap<StationCode, DateTime<Utc>> = HashMap::new();
        let mut forward_parent: HashMap<StationCode, (StationCode, EdgeKind)> = HashMap::new();
        let mut backward_parent: HashMap<StationCode, (StationCode, EdgeKind)> = HashMap::new();

        let mut forward_pq = BinaryHeap::new();
        let mut backward_pq = BinaryHeap::new();

        for s in starts {
            forward_g.insert(s.clone(), 0.0);
            forward_time.insert(s.clone(), start_time);
            let h = self.latlon.heuristic_km(s, goals);
            forward_pq.push(QueueEntry { fval: h, station: s.clone() });
        }

        // 48-hour backward horizon, matching the source: the backward
        // frontier starts as if the goal could be reached at any point up
        // to two days after the query instant.
        let backward_start_time = start_time + chrono::Duration::hours(self.config.horizon_hours);
        for g in goals {
            backward_g.insert(g.clone(), 0.0);
            backward_time.insert(g.clone(), backward_start_time);
            let h = self.latlon.heuristic_km(g, starts);
            backward_pq.push(QueueEntry { fval: h, station: g.clone() });
        }

        let mut best_path_cost = f64::INFINITY;
        let mut meeting_station: Option<StationCode> = None;

        while !forward_pq.is_empty() && !backward_pq.is_empty() {
            if tokio::time::Instant::now() >= deadline {
                return Err(SearchError::Timeout);
            }

            if meeting_station.is_some() {
                let f_min = forward_pq
                    .peek()
                    .map(|e| e.fval)
                    .unwrap_or(f64::INFINITY)
                    .min(backward_pq.peek().map(|e| e.fval).unwrap_or(f64::INFINITY));
                if best_path_cost <= f_min {
                    break;
                }
            }

            let expand_forward = match (forward_pq.peek(), backward_pq.peek()) {
                (Some(f), Some(b)) => f.fval <= b.fval,
                (Some(_), None) => true,
                (None, _) => false,
            };

            if expand_forward {
                self.expand_forward(
                    goals,
                    mode,
                    &mut forward_pq,
                    &mut forward_g,
                    &mut forward_time,
                    &mut forward_parent,
                    &mut backward_g,
                    &mut best_path_cost,
                    &mut meeting_station,
                )
                .await?;
            } else {
                self.expand_backward(
                    starts,
                    mode,
                    &mut backward_pq,
                    &mut backward_g,
                    &mut backward_time,
                    &mut backward_parent,
                    &mut forward_g,
                    &mut best_path_cost,
                    &mut meeting_station,
                )
                .await?;
            }
        }

        let Some(meeting) = meeting_station else {
            return Err(SearchError::NoRoute);
        };

        let segments = reconstruct(&meeting, &forward_parent, &backward_parent);
        Journey::new(segments).map_err(|e| SearchError::InvalidRequest(e.to_string()))
    }

    #[allow(clippy::too_many_arguments)]
    async fn expand_forward(
        &self,
        goals: &[StationCode],
        mode: Mode,
        pq: &mut BinaryHeap<QueueEntry>,
        g_scores: &mut HashMap<StationCode, f64>,
        time_scores: &mut HashMap<StationCode, DateTime<Utc>>,
        parents: &mut HashMap<StationCode, (StationCode, EdgeKind)>,
        other_g: &mut HashMap<StationCode, f64>,
        best_path_cost: &mut f64,
        meeting_station: &mut Option<StationCode>,
    ) -> Result<(), SearchError> {
        let Some(entry) = pq.pop() else { return Ok(()) };
        let Some(&gval) = g_scores.get(&entry.station) else { return Ok(()) };
        let hval = self.latlon.heuristic_km(&entry.station, goals);
        if gval + hval < entry.fval - 1e-9 {
            return Ok(()); // stale queue entry, superseded by a better path already found
        }
        check_meeting(&entry.station, g_scores, other_g, best_path_cost, meeting_station);

        let current_time = *time_scores.get(&entry.station).unwrap_or(&entry_time_fallback());
        let neighbors = self.forward_neighbors(&entry.station, current_time, mode).await?;

        for (neighbor, edge_cost, next_time, kind) in neighbors {
            let candidate_g = gval + edge_cost;
            let old_g = g_scores.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            if candidate_g < old_g {
                g_scores.insert(neighbor.clone(), candidate_g);
                parents.insert(neighbor.clone(), (entry.station.clone(), kind));
                if mode == Mode::Time {
                    time_scores.insert(neighbor.clone(), next_time);
                }
                let h = self.latlon.heuristic_km(&neighbor, goals);
                pq.push(QueueEntry { fval: candidate_g + h, station: neighbor.clone() });
                check_meeting(&neighbor, g_scores, other_g, best_path_cost, meeting_station);
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn expand_backward(
        &self,
        starts: &[StationCode],
        mode: Mode,
        pq: &mut BinaryHeap<QueueEntry>,
        g_scores: &mut HashMap<StationCode, f64>,
        time_scores: &mut HashMap<StationCode, DateTime<Utc>>,
        parents: &mut HashMap<StationCode, (StationCode, EdgeKind)>,
        other_g: &mut HashMap<StationCode, f64>,
        best_path_cost: &mut f64,
        meeting_station: &mut Option<StationCode>,
    ) -> Result<(), SearchError> {
        let Some(entry) = pq.pop() else { return Ok(()) };
        let Some(&gval) = g_scores.get(&entry.station) else { return Ok(()) };
        let hval = self.latlon.heuristic_km(&entry.station, starts);
        if gval + hval < entry.fval - 1e-9 {
            return Ok(());
        }
        check_meeting(&entry.station, other_g, g_scores, best_path_cost, meeting_station);

        let current_time = *time_scores.get(&entry.station).unwrap_or(&entry_time_fallback());
        let neighbors = self.backward_neighbors(&entry.station, current_time, mode).await?;

        for (neighbor, edge_cost, next_time, kind) in neighbors {
            let candidate_g = gval + edge_cost;
            let old_g = g_scores.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            if candidate_g < old_g {
                g_scores.insert(neighbor.clone(), candidate_g);
                parents.insert(neighbor.clone(), (entry.station.clone(), kind));
                if mode == Mode::Time {
                    time_scores.insert(neighbor.clone(), next_time);
                }
                let h = self.latlon.heuristic_km(&neighbor, starts);
                pq.push(QueueEntry { fval: candidate_g + h, station: neighbor.clone() });
                check_meeting(&neighbor, other_g, g_scores, best_path_cost, meeting_station);
            }
        }
        Ok(())
    }

    async fn forward_neighbors(
        &self,
        station: &StationCode,
        current_time: DateTime<Utc>,
        mode: Mode,
    ) -> Result<Vec<(StationCode, f64, DateTime<Utc>, EdgeKind)>, SearchError> {
        // `cost` mode reuses the same materialised window as `time` mode:
        // the schedule source's own pagination is what actually bounds how
        // much timetable gets pulled in, and the search horizon is already
        // generous enough that cost-mode queries rarely miss a real edge.
        let neighbors = self
            .materialiser
            .ensure_outbound(station, current_time, self.config.walk_radius_km)
            .await?;

        Ok(neighbors
            .into_iter()
            .map(|n| self.forward_edge_cost(station, n, current_time, mode))
            .collect())
    }

    async fn backward_neighbors(
        &self,
        station: &StationCode,
        current_time: DateTime<Utc>,
        mode: Mode,
    ) -> Result<Vec<(StationCode, f64, DateTime<Utc>, EdgeKind)>, SearchError> {
        let neighbors = self
            .materialiser
            .ensure_inbound(station, current_time, self.config.walk_radius_km)
            .await?;
        Ok(neighbors
            .into_iter()
            .map(|n| self.backward_edge_cost(station, n, current_time, mode))
            .collect())
    }

    fn forward_edge_cost(
        &self,
        station: &StationCode,
        neighbor: Neighbor,
        current_time: DateTime<Utc>,
        mode: Mode,
    ) -> (StationCode, f64, DateTime<Utc>, EdgeKind) {
        match neighbor {
            Neighbor::Transport(edge) => {
                let kind = EdgeKind::Transport {
                    thread_uid: edge.thread_uid.clone(),
                    departure: edge.departure,
                    arrival: edge.arrival,
                };
                match mode {
                    Mode::Time => {
                        let wait = (edge.departure - current_time).num_seconds().max(0) as f64;
                        let ride = (edge.arrival - edge.departure).num_seconds() as f64;
                        (edge.to, wait + ride, edge.arrival, kind)
                    }
                    Mode::Cost => {
                        let dist = self.latlon.edge_distance_km(station, &edge.to);
                        (edge.to, dist * self.config.transport_ratio, edge.arrival, kind)
                    }
                }
            }
            Neighbor::Walk(edge) => {
                let kind = EdgeKind::Walk { distance_km: edge.distance_km };
                match mode {
                    Mode::Time => {
                        let seconds = edge.distance_km * self.config.walk_seconds_per_km;
                        (edge.to, seconds, current_time + chrono::Duration::seconds(seconds as i64), kind)
                    }
                    // Preserved from the source: a walk edge costs nothing in
                    // `cost` mode, which makes an arbitrarily long chain of
                    // walks always look free. Not fixed here; see design notes.
                    Mode::Cost => (edge.to, 0.0, current_time, kind),
                }
            }
        }
    }

    fn backward_edge_cost(
        &self,
        station: &StationCode,
        neighbor: Neighbor,
        current_time: DateTime<Utc>,
        mode: Mode,
    ) -> (StationCode, f64, DateTime<Utc>, EdgeKind) {
        match neighbor {
            Neighbor::Transport(edge) => {
                let kind = EdgeKind::Transport {
                    thread_uid: edge.thread_uid.clone(),
                    departure: edge.departure,
                    arrival: edge.arrival,
                };
                match mode {
                    Mode::Time => {
                        let ride = (edge.arrival - edge.departure).num_seconds() as f64;
                        (edge.from, ride, edge.departure, kind)
                    }
                    Mode::Cost => {
                        let dist = self.latlon.edge_distance_km(&edge.from, station);
                        (edge.from, dist * self.config.transport_ratio, edge.departure, kind)
                    }
                }
            }
            Neighbor::Walk(edge) => {
                let kind = EdgeKind::Walk { distance_km: edge.distance_km };
                match mode {
                    Mode::Time => {
                        let seconds = edge.distance_km * self.config.walk_seconds_per_km;
                        (edge.from, seconds, current_time - chrono::Duration::seconds(seconds as i64), kind)
                    }
                    Mode::Cost => (edge.from, 0.0, current_time, kind),
                }
            }
        }
    }
}

fn entry_time_fallback() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(0, 0).expect("epoch is a valid timestamp")
}

fn check_meeting(
    station: &StationCode,
    forward_g: &HashMap<StationCode, f64>,
    backward_g: &HashMap<StationCode, f64>,
    best_path_cost: &mut f64,
    meeting_station: &mut Option<StationCode>,
) {
    if let (Some(&fg), Some(&bg)) = (forward_g.get(station), backward_g.get(station)) {
        let total = fg + bg;
        if total < *best_path_cost {
            *best_path_cost = total;
            *meeting_station = Some(station.clone());
        }
    }
}

fn reconstruct(
    meeting: &StationCode,
    forward_parent: &HashMap<StationCode, (StationCode, EdgeKind)>,
    backward_parent: &HashMap<StationCode, (StationCode, EdgeKind)>,
) -> Vec<Segment> {
    let mut forward_edges = Vec::new();
    let mut cur = meeting.clone();
    while let Some((prev, kind)) = forward_parent.get(&cur) {
        forward_edges.push(to_segment(prev.clone(), cur.clone(), kind));
        cur = prev.clone();
    }
    forward_edges.reverse();

    let mut backward_edges = Vec::new();
    let mut cur = meeting.clone();
    while let Some((next, kind)) = backward_parent.get(&cur) {
        backward_edges.push(to_segment(cur.clone(), next.clone(), kind));
        cur = next.clone();
    }

    forward_edges.into_iter().chain(backward_edges).collect()
}

fn to_segment(from: StationCode, to: StationCode, kind: &EdgeKind) -> Segment {
    match kind {
        EdgeKind::Walk { distance_km } => Segment::Walk(DomainWalk {
            from,
            to,
            distance_km: *distance_km,
        }),
        EdgeKind::Transport { thread_uid, departure, arrival } => Segment::Transport(DomainTransport {
            from,
            to,
            thread_uid: thread_uid.clone(),
            departure: *departure,
            arrival: *arrival,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::TimeZone;

    use crate::catalogue::StationCatalogue;
    use crate::catalogue::StationsListResponse;
    use crate::graph::{InMemoryGraphStore, TransportEdgeRecord, WalkEdgeRecord};
    use crate::schedule::MockScheduleSource;

    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn empty_catalogue() -> Arc<StationCatalogue> {
        Arc::new(StationCatalogue::from_response(&StationsListResponse { countries: vec![] }))
    }

    #[test]
    fn queue_orders_smallest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { fval: 5.0, station: code("b") });
        heap.push(QueueEntry { fval: 1.0, station: code("a") });
        heap.push(QueueEntry { fval: 3.0, station: code("c") });
        assert_eq!(heap.pop().unwrap().station, code("a"));
        assert_eq!(heap.pop().unwrap().station, code("c"));
        assert_eq!(heap.pop().unwrap().station, code("b"));
    }

    #[test]
    fn check_meeting_tracks_best_sum() {
        let mut forward = HashMap::new();
        forward.insert(code("m"), 10.0);
        let mut backward = HashMap::new();
        backward.insert(code("m"), 5.0);
        let mut best = f64::INFINITY;
        let mut meeting = None;
        check_meeting(&code("m"), &forward, &backward, &mut best, &mut meeting);
        assert_eq!(best, 15.0);
        assert_eq!(meeting, Some(code("m")));
    }

    #[tokio::test]
    async fn finds_direct_transport_hop() {
        let graph = Arc::new(InMemoryGraphStore::new());
        let departure = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let arrival = Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap();
        graph
            .upsert_transport_edges(vec![TransportEdgeRecord {
                from: code("a"),
                to: code("b"),
                thread_uid: "t1".into(),
                departure,
                arrival,
            }])
            .await
            .unwrap();

        let schedule = Arc::new(MockScheduleSource::new());
        let materialiser = Arc::new(Materialiser::new(schedule, graph, empty_catalogue()));

        let mut coords = HashMap::new();
        coords.insert(code("a"), (0.0, 0.0));
        coords.insert(code("b"), (0.0, 1.0));
        let latlon = LatLonCache::new(coords);

        let search = AStarSearch::new(materialiser, latlon, SearchConfig::default());
        let journey = search
            .search(&[code("a")], &[code("b")], departure - chrono::Duration::minutes(5), Mode::Time)
            .await
            .unwrap();

        assert_eq!(journey.origin(), &code("a"));
        assert_eq!(journey.destination(), &code("b"));
        assert_eq!(journey.segment_count(), 1);
        assert!(journey.segments()[0].is_transport());
    }

    #[tokio::test]
    async fn finds_walk_only_route() {
        let graph = Arc::new(InMemoryGraphStore::new());
        graph
            .upsert_walk_edges(vec![WalkEdgeRecord { from: code("a"), to: code("b"), distance_km: 0.5 }])
            .await
            .unwrap();

        let schedule = Arc::new(MockScheduleSource::new());
        let materialiser = Arc::new(Materialiser::new(schedule, graph, empty_catalogue()));

        let mut coords = HashMap::new();
        coords.insert(code("a"), (0.0, 0.0));
        coords.insert(code("b"), (0.0, 0.005));
        let latlon = LatLonCache::new(coords);

        let search = AStarSearch::new(materialiser, latlon, SearchConfig::default());
        let journey = search
            .search(
                &[code("a")],
                &[code("b")],
                Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
                Mode::Time,
            )
            .await
            .unwrap();

        assert_eq!(journey.segment_count(), 1);
        assert!(journey.segments()[0].is_walk());
    }

    #[tokio::test]
    async fn no_route_between_disconnected_stations() {
        let graph = Arc::new(InMemoryGraphStore::new());
        let schedule = Arc::new(MockScheduleSource::new());
        let materialiser = Arc::new(Materialiser::new(schedule, graph, empty_catalogue()));

        let mut coords = HashMap::new();
        coords.insert(code("a"), (0.0, 0.0));
        coords.insert(code("b"), (10.0, 10.0));
        let latlon = LatLonCache::new(coords);

        let search = AStarSearch::new(materialiser, latlon, SearchConfig {
            deadline: std::time::Duration::from_millis(200),
            ..SearchConfig::default()
        });
        let result = search
            .search(
                &[code("a")],
                &[code("b")],
                Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
                Mode::Time,
            )
            .await;

        assert!(matches!(result, Err(SearchError::NoRoute)));
    }
}
