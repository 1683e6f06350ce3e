//! Integration tests for the build → classify → query pipeline.
//!
//! Exercises: PopulationConfig → build_population → sector_counts / list /
//! rank_by / critical_lifespan / zone_view over several seeds.
//!
//! All tests are pure logic — no store, no engine.

use orbitwatch_logic::classify::{classify_lat_band, classify_quadrant, LatBand, Quadrant, Sector};
use orbitwatch_logic::object::{ObjectType, OrbitClass, OrbitalObject};
use orbitwatch_logic::population::{build_population, needs_rebuild, PopulationConfig};
use orbitwatch_logic::query::{
    critical_lifespan, filter_by_orbit, list, rank_by, sector_counts, summarize, zone_view,
    ListFilter, Metric,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

const SEEDS: [u64; 5] = [1, 42, 314, 2024, 9999];

fn populations() -> impl Iterator<Item = Vec<OrbitalObject>> {
    SEEDS.iter().map(|&seed| {
        build_population(&PopulationConfig::default(), &mut StdRng::seed_from_u64(seed))
    })
}

// ── Generation invariants ──────────────────────────────────────────────

#[test]
fn scores_are_bounded() {
    for pop in populations() {
        for o in &pop {
            assert!(o.risk_score <= 100, "{}", o.name);
            assert!(o.reentry_risk <= 100, "{}", o.name);
        }
    }
}

#[test]
fn altitude_matches_orbit_class() {
    for pop in populations() {
        for o in &pop {
            assert!(
                o.orbit.altitude_range().contains(&o.altitude),
                "{} {:?} at {} km",
                o.name,
                o.orbit,
                o.altitude
            );
        }
    }
}

#[test]
fn every_sector_has_at_least_twenty_objects() {
    for pop in populations() {
        let counts = sector_counts(&pop);
        for q in Quadrant::ALL {
            for b in LatBand::ALL {
                let n = counts.get(Sector::new(q, b));
                assert!(n >= 20, "{q}/{b:?} has {n}");
            }
        }
        assert!(!needs_rebuild(&pop, 11));
    }
}

#[test]
fn classification_is_pure() {
    let pop = build_population(&PopulationConfig::default(), &mut StdRng::seed_from_u64(5));
    for o in &pop {
        assert_eq!(classify_quadrant(o), classify_quadrant(o));
        assert_eq!(classify_lat_band(o), classify_lat_band(o));
        let copy = o.clone();
        assert_eq!(classify_quadrant(&copy), classify_quadrant(o));
    }
}

// ── Queries over a real build ──────────────────────────────────────────

#[test]
fn rank_by_mass_returns_the_heaviest_twenty() {
    for pop in populations() {
        let top = rank_by(&pop, Metric::Mass, 20);
        assert_eq!(top.len(), 20.min(pop.len()));
        let floor = top.iter().map(|o| o.mass).fold(f64::INFINITY, f64::min);
        let returned: std::collections::HashSet<&str> =
            top.iter().map(|o| o.name.as_str()).collect();
        for o in pop.iter().filter(|o| !returned.contains(o.name.as_str())) {
            assert!(o.mass <= floor, "{} ({}) outranks the cut at {}", o.name, o.mass, floor);
        }
    }
}

#[test]
fn every_metric_ranking_is_non_increasing() {
    let pop = build_population(&PopulationConfig::default(), &mut StdRng::seed_from_u64(17));
    for metric in Metric::ALL {
        let ranked = rank_by(&pop, metric, 20);
        assert!(ranked
            .windows(2)
            .all(|w| metric.value(w[0]) >= metric.value(w[1])));
    }
}

#[test]
fn satellite_listing_is_filtered_and_sorted() {
    for pop in populations() {
        let sats = list(&pop, &ListFilter::by_type(ObjectType::Satellite));
        assert!(!sats.is_empty());
        assert!(sats.iter().all(|o| o.object_type == ObjectType::Satellite));
        assert!(sats.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
    }
}

#[test]
fn critical_lifespan_is_filtered_and_sorted() {
    for pop in populations() {
        let critical = critical_lifespan(&pop);
        assert!(critical.iter().all(|o| o.life_span < 5.0));
        assert!(critical
            .windows(2)
            .all(|w| w[0].reentry_risk >= w[1].reentry_risk));
        let expected = pop.iter().filter(|o| o.life_span < 5.0).count();
        assert_eq!(critical.len(), expected);
    }
}

#[test]
fn orbit_filters_partition_the_population() {
    let pop = build_population(&PopulationConfig::default(), &mut StdRng::seed_from_u64(23));
    let total: usize = OrbitClass::ALL
        .iter()
        .map(|&orbit| filter_by_orbit(&pop, orbit).len())
        .sum();
    assert_eq!(total, pop.len());
}

#[test]
fn zone_views_cover_every_object_once() {
    let pop = build_population(&PopulationConfig::default(), &mut StdRng::seed_from_u64(31));
    let mut seen = 0;
    for q in Quadrant::ALL {
        let view = zone_view(&pop, q);
        assert_eq!(view.low.len() + view.mid.len() + view.high.len(), view.objects.len());
        for b in LatBand::ALL {
            assert!(view.band(b).len() >= 20);
        }
        seen += view.objects.len();
    }
    assert_eq!(seen, pop.len());
}

#[test]
fn summary_matches_population() {
    let pop = build_population(&PopulationConfig::default(), &mut StdRng::seed_from_u64(37));
    let summary = summarize(&pop);
    assert_eq!(summary.total as usize, pop.len());
    assert_eq!(summary.satellites + summary.other, summary.total);
    assert_eq!(summary.leo + summary.meo + summary.geo, summary.total);
}

#[test]
fn empty_population_is_a_valid_input() {
    let empty: Vec<OrbitalObject> = Vec::new();
    assert!(list(&empty, &ListFilter::all()).is_empty());
    assert!(rank_by(&empty, Metric::Mass, 20).is_empty());
    assert!(critical_lifespan(&empty).is_empty());
    assert!(zone_view(&empty, Quadrant::Nw).is_empty());
    assert_eq!(summarize(&empty).total, 0);
    assert!(needs_rebuild(&empty, 11));
}
