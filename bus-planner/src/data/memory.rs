//! In-memory route data.
//!
//! Holds stops, routes, timetables and walking distances loaded up front,
//! typically from a JSON route file, and serves them through `RouteData`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use crate::domain::{
    DomainError, Leg, Point, Route, RouteId, RouteStop, ScheduleTime, Stop, StopSymbol,
};
use crate::planner::{DataError, RouteData};
use crate::schedule::{DaySchedule, DayType, Schedule};
use crate::walk::{DistanceTable, Metric};

use super::types::{RouteFile, RouteRecord};

/// Route data held in memory.
///
/// Routes are kept ordered by `RouteId`, so `legs_between` returns legs in
/// a deterministic order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteData {
    stops: HashMap<StopSymbol, Stop>,
    routes: BTreeMap<RouteId, Route>,
    schedules: HashMap<RouteId, Arc<Schedule>>,
    distances: DistanceTable,
}

impl MemoryRouteData {
    /// Create empty route data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load route data from a JSON route file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let data = Self::from_json_str(&json)?;
        debug!(
            path = %path.display(),
            stops = data.stops.len(),
            routes = data.routes.len(),
            "Loaded route file"
        );
        Ok(data)
    }

    /// Parse route data from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let file: RouteFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Build route data from a parsed route file.
    pub fn from_file(file: RouteFile) -> Result<Self, DataError> {
        let mut data = Self::new();

        for record in file.stops {
            let symbol = parse_symbol(&record.symbol)?;
            data.add_stop(Stop::new(
                symbol,
                record.name,
                Point::new(record.lat, record.lon),
            ));
        }

        for record in file.routes {
            data.add_route_record(record)?;
        }

        for record in file.distances {
            let from = parse_symbol(&record.from)?;
            let to = parse_symbol(&record.to)?;
            data.distances.add(from, to, record.metres);
        }

        Ok(data)
    }

    fn add_route_record(&mut self, record: RouteRecord) -> Result<(), DataError> {
        let id = RouteId::new(record.name.clone(), record.direction);

        let mut stops = Vec::with_capacity(record.stops.len());
        for (index, rs) in record.stops.iter().enumerate() {
            let symbol = parse_symbol(&rs.symbol)?;
            let stop = self
                .stops
                .get(&symbol)
                .cloned()
                .ok_or(DataError::UnknownStop(symbol))?;
            let offset = ScheduleTime::parse_hhmm(&rs.offset).map_err(DomainError::from)?;
            stops.push(RouteStop::new(
                stop,
                index,
                Duration::seconds(i64::from(offset.seconds())),
            ));
        }

        let mut days = Vec::with_capacity(record.schedules.len());
        for (day_type, times) in record.schedules {
            let times = times
                .iter()
                .map(|t| ScheduleTime::parse_hhmm(t))
                .collect::<Result<Vec<_>, _>>()
                .map_err(DomainError::from)?;
            days.push(DaySchedule::new(DayType::new(day_type), times));
        }

        let route = Route {
            id: id.clone(),
            label: record.label.unwrap_or(record.name),
            title: record.title,
            stops,
        };
        self.add_route(route, days)
    }

    /// Add or replace a stop.
    pub fn add_stop(&mut self, stop: Stop) {
        self.stops.insert(stop.symbol.clone(), stop);
    }

    /// Add or replace a route together with its timetables.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the route's stop offsets decrease along the route or
    /// its stop indices do not match their positions.
    pub fn add_route(&mut self, route: Route, days: Vec<DaySchedule>) -> Result<(), DataError> {
        for (pos, pair) in route.stops.windows(2).enumerate() {
            if pair[1].offset < pair[0].offset {
                return Err(DataError::InvalidRoute {
                    route: route.id.clone(),
                    reason: "stop offsets must not decrease",
                });
            }
            if pair[0].index != pos {
                return Err(DataError::InvalidRoute {
                    route: route.id.clone(),
                    reason: "stop index must match its position",
                });
            }
        }
        if let Some(last) = route.stops.last() {
            if last.index != route.stops.len() - 1 {
                return Err(DataError::InvalidRoute {
                    route: route.id.clone(),
                    reason: "stop index must match its position",
                });
            }
        }

        let schedule = Arc::new(Schedule::new(route.id.clone(), days));
        self.schedules.insert(route.id.clone(), schedule);
        self.routes.insert(route.id.clone(), route);
        Ok(())
    }

    /// Add a walking distance between two stops.
    pub fn add_distance(&mut self, from: StopSymbol, to: StopSymbol, metres: f64) {
        self.distances.add(from, to, metres);
    }

    pub fn stop(&self, symbol: &StopSymbol) -> Option<&Stop> {
        self.stops.get(symbol)
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Routes in `RouteId` order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    /// Build the leg of route `id` from `from` to `to` (or a terminal leg
    /// boarding at `from` when `to` is `None`).
    ///
    /// Stops visited more than once are matched as in `Route::ride_between`.
    pub fn leg(
        &self,
        id: &RouteId,
        from: &StopSymbol,
        to: Option<&StopSymbol>,
    ) -> Result<Leg, DataError> {
        let route = self
            .routes
            .get(id)
            .ok_or_else(|| DataError::UnknownRoute(id.clone()))?;

        let first = route
            .position_of(from.as_str(), 0)
            .ok_or_else(|| DataError::UnknownStop(from.clone()))?;

        match to {
            None => Ok(Leg::terminal(id.clone(), route.stops[first].clone())),
            Some(to) => {
                let (pos1, pos2) = route
                    .ride_between(from.as_str(), to.as_str())
                    .ok_or_else(|| DataError::UnknownStop(to.clone()))?;
                Ok(Leg::new(
                    id.clone(),
                    route.stops[pos1].clone(),
                    Some(route.stops[pos2].clone()),
                )?)
            }
        }
    }
}

impl RouteData for MemoryRouteData {
    fn legs_between(
        &self,
        stop1: &StopSymbol,
        stop2: &StopSymbol,
    ) -> Result<Vec<Leg>, DataError> {
        let mut legs = Vec::new();
        for route in self.routes.values() {
            let Some((pos1, pos2)) = route.ride_between(stop1.as_str(), stop2.as_str()) else {
                continue;
            };
            legs.push(Leg::new(
                route.id.clone(),
                route.stops[pos1].clone(),
                Some(route.stops[pos2].clone()),
            )?);
        }
        Ok(legs)
    }

    fn schedule(&self, route_id: &RouteId) -> Result<Arc<Schedule>, DataError> {
        self.schedules
            .get(route_id)
            .cloned()
            .ok_or_else(|| DataError::UnknownRoute(route_id.clone()))
    }

    fn metric(&self) -> &dyn Metric {
        &self.distances
    }
}

fn parse_symbol(s: &str) -> Result<StopSymbol, DataError> {
    StopSymbol::parse(s).map_err(|e| DataError::Invalid(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "stops": [
            {"symbol": "A", "name": "Alpha", "lat": 37.97, "lon": 23.73},
            {"symbol": "B", "name": "Beta"},
            {"symbol": "C", "name": "Gamma"}
        ],
        "routes": [
            {
                "name": "040", "direction": "1", "title": "Alpha - Gamma",
                "stops": [
                    {"symbol": "A", "offset": "00:00"},
                    {"symbol": "B", "offset": "00:05"},
                    {"symbol": "C", "offset": "00:12"}
                ],
                "schedules": {"weekday": ["07:00", "06:30"], "sunday": ["09:00"]}
            },
            {
                "name": "022", "direction": "2",
                "stops": [
                    {"symbol": "B", "offset": "00:00"},
                    {"symbol": "C", "offset": "00:04"}
                ],
                "schedules": {"weekday": ["06:50"]}
            },
            {
                "name": "550",
                "stops": [
                    {"symbol": "C", "offset": "00:00"},
                    {"symbol": "B", "offset": "00:06"}
                ]
            }
        ],
        "distances": [{"from": "B", "to": "C", "metres": 300.0}]
    }"#;

    fn sym(s: &str) -> StopSymbol {
        StopSymbol::parse(s).unwrap()
    }

    fn t(s: &str) -> ScheduleTime {
        ScheduleTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn parse_sample() {
        let data = MemoryRouteData::from_json_str(SAMPLE).unwrap();

        assert_eq!(data.routes().count(), 3);
        assert_eq!(data.stop(&sym("A")).unwrap().name, "Alpha");
        assert_eq!(data.stop(&sym("A")).unwrap().location, Point::new(37.97, 23.73));

        let route = data.route(&RouteId::new("040", "1")).unwrap();
        assert_eq!(route.label, "040");
        assert_eq!(route.title, "Alpha - Gamma");
        assert_eq!(route.stops[2].offset, Duration::minutes(12));
        assert_eq!(route.stops[2].index, 2);
    }

    #[test]
    fn timetables_are_sorted_by_day_type() {
        let data = MemoryRouteData::from_json_str(SAMPLE).unwrap();
        let schedule = data.schedule(&RouteId::new("040", "1")).unwrap();

        let weekday = schedule.day(&DayType::new("weekday")).unwrap();
        assert_eq!(weekday.times(), &[t("06:30"), t("07:00")]);

        let none = data.schedule(&RouteId::new("550", "")).unwrap();
        assert!(none.days().is_empty());
    }

    #[test]
    fn unknown_route_schedule_is_an_error() {
        let data = MemoryRouteData::from_json_str(SAMPLE).unwrap();
        let result = data.schedule(&RouteId::new("999", ""));
        assert!(matches!(result, Err(DataError::UnknownRoute(_))));
    }

    #[test]
    fn legs_between_spans_routes() {
        let data = MemoryRouteData::from_json_str(SAMPLE).unwrap();
        let legs = data.legs_between(&sym("B"), &sym("C")).unwrap();

        // Ordered by route id: 022/2 before 040/1
        let routes: Vec<_> = legs.iter().map(|l| l.route_id().to_string()).collect();
        assert_eq!(routes, vec!["022/2", "040/1"]);
        assert_eq!(legs[1].duration(), Duration::minutes(7));
    }

    #[test]
    fn legs_between_respects_direction() {
        let data = MemoryRouteData::from_json_str(SAMPLE).unwrap();

        let legs = data.legs_between(&sym("C"), &sym("B")).unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].route_id(), &RouteId::new("550", ""));

        assert!(data.legs_between(&sym("C"), &sym("A")).unwrap().is_empty());
        assert!(data.legs_between(&sym("X"), &sym("A")).unwrap().is_empty());
    }

    #[test]
    fn loop_route_boards_at_nearest_visit() {
        let json = r#"{
            "stops": [{"symbol": "A"}, {"symbol": "B"}, {"symbol": "C"}],
            "routes": [{
                "name": "L", "direction": "1",
                "stops": [
                    {"symbol": "A", "offset": "00:00"},
                    {"symbol": "B", "offset": "00:05"},
                    {"symbol": "A", "offset": "00:10"},
                    {"symbol": "C", "offset": "00:14"}
                ]
            }]
        }"#;
        let data = MemoryRouteData::from_json_str(json).unwrap();

        let legs = data.legs_between(&sym("A"), &sym("C")).unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].route_stop1().index, 2);
        assert_eq!(legs[0].duration(), Duration::minutes(4));

        let leg = data.leg(&RouteId::new("L", "1"), &sym("A"), Some(&sym("C"))).unwrap();
        assert_eq!(leg, legs[0]);

        // Riding A to B still uses the first pass
        let legs = data.legs_between(&sym("A"), &sym("B")).unwrap();
        assert_eq!(legs[0].route_stop1().index, 0);
    }

    #[test]
    fn build_leg_by_route() {
        let data = MemoryRouteData::from_json_str(SAMPLE).unwrap();
        let id = RouteId::new("040", "1");

        let leg = data.leg(&id, &sym("A"), Some(&sym("C"))).unwrap();
        assert_eq!(leg.duration(), Duration::minutes(12));

        let terminal = data.leg(&id, &sym("B"), None).unwrap();
        assert!(terminal.is_terminal());

        assert!(matches!(
            data.leg(&id, &sym("C"), Some(&sym("A"))),
            Err(DataError::UnknownStop(_))
        ));
        assert!(matches!(
            data.leg(&RouteId::new("999", ""), &sym("A"), None),
            Err(DataError::UnknownRoute(_))
        ));
    }

    #[test]
    fn metric_uses_distance_table() {
        let data = MemoryRouteData::from_json_str(SAMPLE).unwrap();
        let b = data.stop(&sym("B")).unwrap();
        let c = data.stop(&sym("C")).unwrap();
        assert_eq!(data.metric().distance(b, c), 300.0);
        assert_eq!(data.distances().len(), 1);
    }

    #[test]
    fn route_with_unknown_stop_is_rejected() {
        let json = r#"{"routes": [{"name": "1", "stops": [{"symbol": "Z", "offset": "00:00"}]}]}"#;
        let result = MemoryRouteData::from_json_str(json);
        assert!(matches!(result, Err(DataError::UnknownStop(_))));
    }

    #[test]
    fn decreasing_offsets_are_rejected() {
        let json = r#"{
            "stops": [{"symbol": "A"}, {"symbol": "B"}],
            "routes": [{"name": "1", "stops": [
                {"symbol": "A", "offset": "00:10"},
                {"symbol": "B", "offset": "00:05"}
            ]}]
        }"#;
        let result = MemoryRouteData::from_json_str(json);
        assert!(matches!(result, Err(DataError::InvalidRoute { .. })));
    }

    #[test]
    fn bad_time_is_rejected() {
        let json = r#"{
            "stops": [{"symbol": "A"}],
            "routes": [{"name": "1", "stops": [{"symbol": "A", "offset": "00:00"}],
                        "schedules": {"weekday": ["7am"]}}]
        }"#;
        let result = MemoryRouteData::from_json_str(json);
        assert!(matches!(result, Err(DataError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = MemoryRouteData::from_json_str("{ not json");
        assert!(matches!(result, Err(DataError::Json(_))));
    }

    #[test]
    fn load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let data = MemoryRouteData::from_path(file.path()).unwrap();
        assert_eq!(data.routes().count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = MemoryRouteData::from_path(dir.path().join("missing.json"));
        assert!(matches!(result, Err(DataError::Io(_))));
    }

    #[test]
    fn load_bundled_sample() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_routes.json");
        let data = MemoryRouteData::from_path(path).unwrap();
        assert!(data.routes().count() > 0);
    }
}
