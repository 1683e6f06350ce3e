//! Read-side views over a population snapshot.
//!
//! All functions are pure and total: they accept any slice whose items expose
//! an [`OrbitalObject`] (bare objects or stored records), never fail, and
//! return borrowed items. Every sort is stable, so ties keep the order the
//! objects were inserted in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::{LatBand, Quadrant, Sector};
use crate::constants::risk;
use crate::object::{ObjectType, OrbitClass, OrbitalObject, RiskLevel, UnknownVariant};

fn obj<T: AsRef<OrbitalObject>>(item: &T) -> &OrbitalObject {
    item.as_ref()
}

pub fn filter_by_orbit<T: AsRef<OrbitalObject>>(population: &[T], orbit: OrbitClass) -> Vec<&T> {
    population.iter().filter(|o| obj(*o).orbit == orbit).collect()
}

pub fn filter_by_type<T: AsRef<OrbitalObject>>(
    population: &[T],
    object_type: ObjectType,
) -> Vec<&T> {
    population
        .iter()
        .filter(|o| obj(*o).object_type == object_type)
        .collect()
}

/// Numeric attribute a ranking can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Size,
    Mass,
    Velocity,
    Altitude,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Size, Metric::Mass, Metric::Velocity, Metric::Altitude];

    pub fn value(self, object: &OrbitalObject) -> f64 {
        match self {
            Metric::Size => object.size,
            Metric::Mass => object.mass,
            Metric::Velocity => object.velocity,
            Metric::Altitude => object.altitude as f64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Size => "size",
            Metric::Mass => "mass",
            Metric::Velocity => "velocity",
            Metric::Altitude => "altitude",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Size => "m",
            Metric::Mass => "kg",
            Metric::Velocity => "km/s",
            Metric::Altitude => "km",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                kind: "Metric",
                value: s.to_string(),
            })
    }
}

/// Top `n` objects by `metric`, largest first.
pub fn rank_by<T: AsRef<OrbitalObject>>(population: &[T], metric: Metric, n: usize) -> Vec<&T> {
    let mut ranked: Vec<&T> = population.iter().collect();
    ranked.sort_by(|a, b| metric.value(obj(*b)).total_cmp(&metric.value(obj(*a))));
    ranked.truncate(n);
    ranked
}

/// Highest collision risk first.
pub fn sort_by_risk<T: AsRef<OrbitalObject>>(population: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = population.iter().collect();
    sort_refs_by_risk(&mut sorted);
    sorted
}

fn sort_refs_by_risk<T: AsRef<OrbitalObject>>(items: &mut [&T]) {
    items.sort_by(|a, b| obj(*b).risk_score.cmp(&obj(*a).risk_score));
}

/// Objects with under five years left, highest re-entry risk first.
pub fn critical_lifespan<T: AsRef<OrbitalObject>>(population: &[T]) -> Vec<&T> {
    let mut critical: Vec<&T> = population
        .iter()
        .filter(|o| obj(*o).life_span < risk::SHORT_LIFE_YEARS)
        .collect();
    critical.sort_by(|a, b| obj(*b).reentry_risk.cmp(&obj(*a).reentry_risk));
    critical
}

/// Optional type and orbit constraints for [`list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitClass>,
}

impl ListFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_type(object_type: ObjectType) -> Self {
        Self {
            object_type: Some(object_type),
            orbit: None,
        }
    }

    pub fn by_orbit(orbit: OrbitClass) -> Self {
        Self {
            object_type: None,
            orbit: Some(orbit),
        }
    }

    pub fn with_orbit(mut self, orbit: OrbitClass) -> Self {
        self.orbit = Some(orbit);
        self
    }

    pub fn matches(&self, object: &OrbitalObject) -> bool {
        self.object_type.map_or(true, |t| object.object_type == t)
            && self.orbit.map_or(true, |o| object.orbit == o)
    }
}

/// The single read entrypoint: type filter, then orbit filter, then highest
/// risk first.
pub fn list<'a, T: AsRef<OrbitalObject>>(population: &'a [T], filter: &ListFilter) -> Vec<&'a T> {
    let mut selected = match filter.object_type {
        Some(object_type) => filter_by_type(population, object_type),
        None => population.iter().collect(),
    };
    if let Some(orbit) = filter.orbit {
        selected.retain(|o| obj(*o).orbit == orbit);
    }
    sort_refs_by_risk(&mut selected);
    selected
}

/// Object counts per sector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorCounts {
    /// Indexed `[quadrant][band]`.
    pub cells: [[u32; 3]; 4],
}

impl SectorCounts {
    pub fn get(&self, sector: Sector) -> u32 {
        self.cells[sector.quadrant.index()][sector.band.index()]
    }

    pub fn quadrant_total(&self, quadrant: Quadrant) -> u32 {
        self.cells[quadrant.index()].iter().sum()
    }

    pub fn band_total(&self, band: LatBand) -> u32 {
        self.cells.iter().map(|row| row[band.index()]).sum()
    }

    /// Smallest sector and its count.
    pub fn sparsest(&self) -> (Sector, u32) {
        Sector::all()
            .map(|s| (s, self.get(s)))
            .min_by_key(|(_, count)| *count)
            .unwrap_or((Sector::new(Quadrant::Ne, LatBand::Low), 0))
    }
}

pub fn sector_counts<T: AsRef<OrbitalObject>>(population: &[T]) -> SectorCounts {
    let mut counts = SectorCounts::default();
    for item in population {
        let sector = Sector::of(obj(item));
        counts.cells[sector.quadrant.index()][sector.band.index()] += 1;
    }
    counts
}

/// One quadrant's objects, highest risk first, also split by latitude band.
#[derive(Debug, Clone)]
pub struct ZoneView<'a, T> {
    pub quadrant: Quadrant,
    pub objects: Vec<&'a T>,
    pub low: Vec<&'a T>,
    pub mid: Vec<&'a T>,
    pub high: Vec<&'a T>,
}

impl<'a, T> ZoneView<'a, T> {
    pub fn band(&self, band: LatBand) -> &[&'a T] {
        match band {
            LatBand::Low => &self.low,
            LatBand::Mid => &self.mid,
            LatBand::High => &self.high,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

pub fn zone_view<T: AsRef<OrbitalObject>>(population: &[T], quadrant: Quadrant) -> ZoneView<'_, T> {
    let mut objects: Vec<&T> = population
        .iter()
        .filter(|o| Quadrant::of(obj(*o).latitude, obj(*o).longitude) == quadrant)
        .collect();
    sort_refs_by_risk(&mut objects);

    let mut view = ZoneView {
        quadrant,
        objects: Vec::new(),
        low: Vec::new(),
        mid: Vec::new(),
        high: Vec::new(),
    };
    for &item in &objects {
        match LatBand::of(obj(item).latitude) {
            LatBand::Low => view.low.push(item),
            LatBand::Mid => view.mid.push(item),
            LatBand::High => view.high.push(item),
        }
    }
    view.objects = objects;
    view
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total: u32,
    pub satellites: u32,
    pub other: u32,
    /// Risk score above 70.
    pub high_risk: u32,
    pub leo: u32,
    pub meo: u32,
    pub geo: u32,
    /// Under two years of orbit left.
    pub imminent_reentry: u32,
}

pub fn summarize<T: AsRef<OrbitalObject>>(population: &[T]) -> FleetSummary {
    let mut summary = FleetSummary::default();
    for item in population {
        let o = obj(item);
        summary.total += 1;
        match o.object_type {
            ObjectType::Satellite => summary.satellites += 1,
            ObjectType::Other => summary.other += 1,
        }
        match o.orbit {
            OrbitClass::Leo => summary.leo += 1,
            OrbitClass::Meo => summary.meo += 1,
            OrbitClass::Geo => summary.geo += 1,
        }
        if o.risk_level() == RiskLevel::High {
            summary.high_risk += 1;
        }
        if o.is_reentry_imminent() {
            summary.imminent_reentry += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Origin, Shape};

    fn object(name: &str, mass: f64, velocity: f64, orbit: OrbitClass) -> OrbitalObject {
        OrbitalObject {
            name: name.to_string(),
            object_type: ObjectType::Other,
            orbit,
            mass,
            size: 1.0,
            shape: Shape::Fragment,
            velocity,
            altitude: orbit.altitude_range().start,
            origin: Origin::Esa,
            risk_score: 10,
            latitude: 0.0,
            longitude: 0.0,
            life_span: 10.0,
            reentry_risk: 5,
        }
    }

    fn with_risk(name: &str, risk_score: u8, object_type: ObjectType) -> OrbitalObject {
        OrbitalObject {
            risk_score,
            object_type,
            ..object(name, 100.0, 5.0, OrbitClass::Meo)
        }
    }

    fn names<T: AsRef<OrbitalObject>>(items: &[&T]) -> Vec<String> {
        items.iter().map(|o| obj(*o).name.clone()).collect()
    }

    #[test]
    fn rank_by_mass_picks_heaviest() {
        let pop = vec![
            object("heavy", 100.0, 10.0, OrbitClass::Leo),
            object("light", 50.0, 5.0, OrbitClass::Geo),
        ];
        let top = rank_by(&pop, Metric::Mass, 1);
        assert_eq!(names(&top), vec!["heavy"]);
    }

    #[test]
    fn rank_by_truncates_to_population() {
        let pop = vec![object("a", 1.0, 3.0, OrbitClass::Meo)];
        assert_eq!(rank_by(&pop, Metric::Size, 20).len(), 1);
        let empty: Vec<OrbitalObject> = Vec::new();
        assert!(rank_by(&empty, Metric::Velocity, 20).is_empty());
    }

    #[test]
    fn rank_ties_keep_insertion_order() {
        let pop = vec![
            object("first", 10.0, 3.0, OrbitClass::Meo),
            object("big", 99.0, 3.0, OrbitClass::Meo),
            object("second", 10.0, 3.0, OrbitClass::Meo),
        ];
        let ranked = rank_by(&pop, Metric::Mass, 3);
        assert_eq!(names(&ranked), vec!["big", "first", "second"]);
    }

    #[test]
    fn sort_by_risk_descends_and_keeps_ties_in_order() {
        let pop = vec![
            with_risk("low", 12, ObjectType::Other),
            with_risk("tie-a", 55, ObjectType::Satellite),
            with_risk("top", 90, ObjectType::Other),
            with_risk("tie-b", 55, ObjectType::Other),
            with_risk("tie-c", 55, ObjectType::Satellite),
        ];
        assert_eq!(
            names(&sort_by_risk(&pop)),
            vec!["top", "tie-a", "tie-b", "tie-c", "low"]
        );
        assert!(sort_by_risk(&Vec::<OrbitalObject>::new()).is_empty());
    }

    #[test]
    fn rank_by_altitude() {
        let pop = vec![
            object("leo", 10.0, 7.0, OrbitClass::Leo),
            object("geo", 10.0, 3.0, OrbitClass::Geo),
            object("meo", 10.0, 3.0, OrbitClass::Meo),
        ];
        assert_eq!(
            names(&rank_by(&pop, Metric::Altitude, 2)),
            vec!["geo", "meo"]
        );
    }

    #[test]
    fn list_filters_then_sorts() {
        let pop = vec![
            with_risk("s-low", 20, ObjectType::Satellite),
            with_risk("o-high", 90, ObjectType::Other),
            with_risk("s-high", 80, ObjectType::Satellite),
            with_risk("s-tie", 20, ObjectType::Satellite),
        ];
        let sats = list(&pop, &ListFilter::by_type(ObjectType::Satellite));
        assert_eq!(names(&sats), vec!["s-high", "s-low", "s-tie"]);

        let all = list(&pop, &ListFilter::all());
        assert_eq!(names(&all)[0], "o-high");
        assert_eq!(all.len(), 4);

        let none = list(&pop, &ListFilter::by_orbit(OrbitClass::Geo));
        assert!(none.is_empty());
    }

    #[test]
    fn list_combines_type_and_orbit() {
        let mut leo_sat = with_risk("leo-sat", 50, ObjectType::Satellite);
        leo_sat.orbit = OrbitClass::Leo;
        let pop = vec![
            leo_sat,
            with_risk("meo-sat", 60, ObjectType::Satellite),
            with_risk("meo-other", 70, ObjectType::Other),
        ];
        let filter = ListFilter::by_type(ObjectType::Satellite).with_orbit(OrbitClass::Meo);
        assert_eq!(names(&list(&pop, &filter)), vec!["meo-sat"]);
    }

    #[test]
    fn critical_lifespan_filters_and_orders() {
        let mut a = object("a", 1.0, 7.0, OrbitClass::Leo);
        a.life_span = 4.9;
        a.reentry_risk = 50;
        let mut b = object("b", 1.0, 7.0, OrbitClass::Leo);
        b.life_span = 5.0;
        b.reentry_risk = 99;
        let mut c = object("c", 1.0, 7.0, OrbitClass::Leo);
        c.life_span = 0.3;
        c.reentry_risk = 95;
        let pop = vec![a, b, c];
        assert_eq!(names(&critical_lifespan(&pop)), vec!["c", "a"]);
    }

    #[test]
    fn zone_view_splits_by_band() {
        let mut pop = Vec::new();
        for (i, lat) in [10.0, -10.0, 45.0, 75.0, 29.9999].iter().enumerate() {
            let mut o = with_risk(&format!("o{i}"), i as u8 * 10, ObjectType::Other);
            o.latitude = *lat;
            o.longitude = 20.0;
            pop.push(o);
        }
        let ne = zone_view(&pop, Quadrant::Ne);
        assert_eq!(names(&ne.objects), vec!["o4", "o3", "o2", "o0"]);
        assert_eq!(names(ne.band(LatBand::Low)), vec!["o4", "o0"]);
        assert_eq!(names(ne.band(LatBand::Mid)), vec!["o2"]);
        assert_eq!(names(ne.band(LatBand::High)), vec!["o3"]);

        let se = zone_view(&pop, Quadrant::Se);
        assert_eq!(names(&se.low), vec!["o1"]);
        assert!(zone_view(&pop, Quadrant::Sw).is_empty());
    }

    #[test]
    fn summary_counts() {
        let mut pop = vec![
            with_risk("a", 71, ObjectType::Satellite),
            with_risk("b", 70, ObjectType::Other),
            with_risk("c", 10, ObjectType::Other),
        ];
        pop[2].orbit = OrbitClass::Leo;
        pop[2].life_span = 1.9;
        let summary = summarize(&pop);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.satellites, 1);
        assert_eq!(summary.other, 2);
        assert_eq!(summary.high_risk, 1);
        assert_eq!(summary.leo, 1);
        assert_eq!(summary.meo, 2);
        assert_eq!(summary.imminent_reentry, 1);
    }

    #[test]
    fn sector_counts_and_sparsest() {
        let mut a = with_risk("a", 1, ObjectType::Other);
        a.latitude = -65.0;
        a.longitude = -1.0;
        let pop = vec![a];
        let counts = sector_counts(&pop);
        assert_eq!(counts.get(Sector::new(Quadrant::Sw, LatBand::High)), 1);
        assert_eq!(counts.quadrant_total(Quadrant::Sw), 1);
        assert_eq!(counts.band_total(LatBand::High), 1);
        assert_eq!(counts.sparsest().1, 0);
    }

    #[test]
    fn filter_serializes_like_the_read_arguments() {
        let filter = ListFilter::by_type(ObjectType::Satellite);
        assert_eq!(serde_json::to_string(&filter).unwrap(), r#"{"type":"satellite"}"#);
        let parsed: ListFilter = serde_json::from_str(r#"{"orbit":"GEO"}"#).unwrap();
        assert_eq!(parsed, ListFilter::by_orbit(OrbitClass::Geo));
    }

    #[test]
    fn metric_parsing() {
        assert_eq!("Mass".parse::<Metric>(), Ok(Metric::Mass));
        assert!("weight".parse::<Metric>().is_err());
    }
}
