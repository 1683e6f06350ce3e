//! OrbitWatch Headless Validation Harness
//!
//! Builds populations and checks every generation, classification and store
//! invariant in-process — no dashboard, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p orbitwatch-simtest
//!   cargo run -p orbitwatch-simtest -- --verbose
//!   cargo run -p orbitwatch-simtest -- --seed 42 --config population.json
//!   cargo run -p orbitwatch-simtest -- --json

use std::collections::HashSet;

use orbitwatch_core::engine::TrackingEngine;
use orbitwatch_logic::classify::{LatBand, Quadrant, Sector};
use orbitwatch_logic::constants::population::RANKING_LENGTH;
use orbitwatch_logic::object::{ObjectType, OrbitClass, OrbitalObject};
use orbitwatch_logic::population::{build_population, validate_config, PopulationConfig};
use orbitwatch_logic::query::{
    critical_lifespan, list, rank_by, sector_counts, summarize, zone_view, ListFilter, Metric,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

// ── Arguments ───────────────────────────────────────────────────────────

struct Args {
    verbose: bool,
    json: bool,
    seed: u64,
    config: PopulationConfig,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        verbose: false,
        json: false,
        seed: 42,
        config: PopulationConfig::default(),
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--seed" => {
                let value = it.next().ok_or("--seed needs a value")?;
                args.seed = value
                    .parse()
                    .map_err(|e| format!("bad seed {:?}: {}", value, e))?;
            }
            "--config" => {
                let path = it.next().ok_or("--config needs a path")?;
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read {}: {}", path, e))?;
                args.config = serde_json::from_str(&text)
                    .map_err(|e| format!("cannot parse {}: {}", path, e))?;
            }
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }
    Ok(args)
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    config: &'a PopulationConfig,
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let config_errors = validate_config(&args.config);
    if !config_errors.is_empty() {
        for e in &config_errors {
            eprintln!("config error: {}", e);
        }
        std::process::exit(2);
    }

    if !args.json {
        println!("=== OrbitWatch Validation Harness (seed {}) ===\n", args.seed);
    }

    let population = build_population(&args.config, &mut StdRng::seed_from_u64(args.seed));
    let quiet = args.json;

    let mut results = Vec::new();

    // 1. Generated attributes
    results.extend(validate_generation(&population, quiet, args.verbose));

    // 2. Sector coverage
    results.extend(validate_sectors(&population, &args.config, quiet, args.verbose));

    // 3. Rankings and listings
    results.extend(validate_queries(&population, quiet, args.verbose));

    // 4. Store and engine
    results.extend(validate_engine(&args.config, args.seed, quiet));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();

    if args.json {
        let report = Report {
            seed: args.seed,
            config: &args.config,
            passed,
            failed,
            results: &results,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: cannot encode report: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || args.verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn section(title: &str, quiet: bool) {
    if !quiet {
        println!("--- {} ---", title);
    }
}

// ── 1. Generation ───────────────────────────────────────────────────────

fn validate_generation(
    population: &[OrbitalObject],
    quiet: bool,
    verbose: bool,
) -> Vec<TestResult> {
    section("Generation", quiet);
    let mut results = Vec::new();

    let bad_scores: Vec<_> = population
        .iter()
        .filter(|o| o.risk_score > 100 || o.reentry_risk > 100)
        .collect();
    results.push(TestResult {
        name: "scores_bounded".into(),
        passed: bad_scores.is_empty(),
        detail: format!("{} objects with a score above 100", bad_scores.len()),
    });

    let bad_altitude: Vec<_> = population
        .iter()
        .filter(|o| !o.altitude_is_consistent())
        .collect();
    results.push(TestResult {
        name: "altitude_matches_orbit".into(),
        passed: bad_altitude.is_empty(),
        detail: if bad_altitude.is_empty() {
            "every altitude inside its orbit band".into()
        } else {
            format!(
                "{} misplaced: {}",
                bad_altitude.len(),
                bad_altitude
                    .iter()
                    .take(5)
                    .map(|o| format!("{} {} @ {} km", o.name, o.orbit, o.altitude))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        },
    });

    let bad_ranges = population
        .iter()
        .filter(|o| {
            !(10.0..5010.0).contains(&o.mass)
                || !(0.1..20.1).contains(&o.size)
                || !(0.0..15.0).contains(&o.life_span)
        })
        .count();
    results.push(TestResult {
        name: "physical_ranges".into(),
        passed: bad_ranges == 0,
        detail: format!("{} objects outside mass/size/lifespan ranges", bad_ranges),
    });

    let bad_reentry = population
        .iter()
        .filter(|o| {
            let elevated = o.orbit == OrbitClass::Leo && o.life_span < 5.0;
            if elevated {
                !(40..100).contains(&o.reentry_risk)
            } else {
                o.reentry_risk >= 30
            }
        })
        .count();
    results.push(TestResult {
        name: "reentry_risk_bands".into(),
        passed: bad_reentry == 0,
        detail: format!("{} objects with re-entry risk outside their band", bad_reentry),
    });

    let unique: HashSet<&str> = population.iter().map(|o| o.name.as_str()).collect();
    results.push(TestResult {
        name: "names_unique".into(),
        passed: unique.len() == population.len(),
        detail: format!("{} names for {} objects", unique.len(), population.len()),
    });

    if verbose {
        let summary = summarize(population);
        println!(
            "  {} objects: {} satellites, {} other | LEO {} MEO {} GEO {} | high risk {} | imminent re-entry {}",
            summary.total,
            summary.satellites,
            summary.other,
            summary.leo,
            summary.meo,
            summary.geo,
            summary.high_risk,
            summary.imminent_reentry
        );
    }

    results
}

// ── 2. Sectors ──────────────────────────────────────────────────────────

fn validate_sectors(
    population: &[OrbitalObject],
    config: &PopulationConfig,
    quiet: bool,
    verbose: bool,
) -> Vec<TestResult> {
    section("Sector Coverage", quiet);
    let mut results = Vec::new();

    results.push(TestResult {
        name: "population_size".into(),
        passed: population.len() as u32 == config.total_size(),
        detail: format!("{} objects (expected {})", population.len(), config.total_size()),
    });

    let counts = sector_counts(population);
    let (sparsest, min_count) = counts.sparsest();
    results.push(TestResult {
        name: "sector_floor".into(),
        passed: min_count >= config.per_sector_count,
        detail: format!(
            "sparsest sector {} holds {} (floor {})",
            sparsest, min_count, config.per_sector_count
        ),
    });

    for quadrant in Quadrant::ALL {
        let view = zone_view(population, quadrant);
        let sorted = view
            .objects
            .windows(2)
            .all(|w| w[0].risk_score >= w[1].risk_score);
        results.push(TestResult {
            name: format!("zone_{}_sorted", quadrant.code().to_lowercase()),
            passed: sorted && view.objects.len() as u32 == counts.quadrant_total(quadrant),
            detail: format!("{} objects in {}", view.objects.len(), quadrant.label()),
        });
    }

    if verbose {
        println!("  Sector counts (low / mid / high):");
        for quadrant in Quadrant::ALL {
            let row: Vec<String> = LatBand::ALL
                .iter()
                .map(|&b| format!("{:4}", counts.get(Sector::new(quadrant, b))))
                .collect();
            println!("    {}: {}", quadrant, row.join(" / "));
        }
    }

    results
}

// ── 3. Queries ──────────────────────────────────────────────────────────

fn validate_queries(population: &[OrbitalObject], quiet: bool, verbose: bool) -> Vec<TestResult> {
    section("Rankings & Listings", quiet);
    let mut results = Vec::new();

    for metric in Metric::ALL {
        let top = rank_by(population, metric, RANKING_LENGTH);
        let cut = top
            .iter()
            .map(|o| metric.value(o))
            .fold(f64::INFINITY, f64::min);
        let returned: HashSet<&str> = top.iter().map(|o| o.name.as_str()).collect();
        let outranked = population
            .iter()
            .filter(|o| !returned.contains(o.name.as_str()) && metric.value(o) > cut)
            .count();
        results.push(TestResult {
            name: format!("rank_by_{}", metric),
            passed: top.len() == RANKING_LENGTH.min(population.len()) && outranked == 0,
            detail: format!(
                "{} returned, cut at {:.2} {}, {} outranked",
                top.len(),
                if top.is_empty() { 0.0 } else { cut },
                metric.unit(),
                outranked
            ),
        });
        if verbose {
            if let Some(first) = top.first() {
                println!(
                    "  top {}: {} ({} {})",
                    metric,
                    first.name,
                    metric.value(first),
                    metric.unit()
                );
            }
        }
    }

    for object_type in ObjectType::ALL {
        let listed = list(population, &ListFilter::by_type(object_type));
        let only_type = listed.iter().all(|o| o.object_type == object_type);
        let sorted = listed.windows(2).all(|w| w[0].risk_score >= w[1].risk_score);
        results.push(TestResult {
            name: format!("list_{}", object_type),
            passed: only_type && sorted,
            detail: format!("{} listed, filtered={} sorted={}", listed.len(), only_type, sorted),
        });
    }

    let critical = critical_lifespan(population);
    let filtered = critical.iter().all(|o| o.life_span < 5.0);
    let sorted = critical
        .windows(2)
        .all(|w| w[0].reentry_risk >= w[1].reentry_risk);
    results.push(TestResult {
        name: "critical_lifespan".into(),
        passed: filtered && sorted,
        detail: format!("{} critical objects", critical.len()),
    });

    results
}

// ── 4. Store & Engine ───────────────────────────────────────────────────

fn validate_engine(config: &PopulationConfig, seed: u64, quiet: bool) -> Vec<TestResult> {
    section("Store & Engine", quiet);
    let mut results = Vec::new();

    let engine = match TrackingEngine::with_config(PopulationConfig {
        seed: Some(seed),
        ..config.clone()
    }) {
        Ok(e) => e,
        Err(errors) => {
            results.push(TestResult {
                name: "engine_config".into(),
                passed: false,
                detail: format!("{} config errors", errors.len()),
            });
            return results;
        }
    };

    let rebuilt = engine.ensure_populated();
    results.push(TestResult {
        name: "engine_initial_rebuild".into(),
        passed: matches!(rebuilt, Ok(true)),
        detail: format!("ensure_populated on empty store → {:?}", rebuilt),
    });

    let stable = engine.ensure_populated();
    results.push(TestResult {
        name: "engine_no_spurious_rebuild".into(),
        passed: matches!(stable, Ok(false)),
        detail: format!("second ensure_populated → {:?}", stable),
    });

    match engine.install(Vec::new()).and_then(|_| engine.list(&ListFilter::all())) {
        Ok(listed) => results.push(TestResult {
            name: "empty_store_lists_empty".into(),
            passed: listed.is_empty(),
            detail: format!("{} records after replace_all([])", listed.len()),
        }),
        Err(e) => results.push(TestResult {
            name: "empty_store_lists_empty".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    let mut buffer = Vec::new();
    let roundtrip = engine
        .rebuild()
        .map_err(|e| e.to_string())
        .and_then(|_| engine.save(&mut buffer).map_err(|e| e.to_string()))
        .and_then(|_| {
            let restored = TrackingEngine::new();
            restored.load(&buffer[..]).map_err(|e| e.to_string())?;
            let before = engine.store().list_all().map_err(|e| e.to_string())?;
            let after = restored.store().list_all().map_err(|e| e.to_string())?;
            Ok(before == after)
        });
    results.push(TestResult {
        name: "snapshot_roundtrip".into(),
        passed: matches!(roundtrip, Ok(true)),
        detail: format!("{} bytes, identical={:?}", buffer.len(), roundtrip),
    });

    results
}
