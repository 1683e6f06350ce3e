//! Single-object generation.
//!
//! Every attribute is drawn from its fixed vocabulary or range; decimal
//! attributes are drawn directly on their storage grid (hundredths for size
//! and velocity, tenths for lifespan, ten-thousandths for coordinates), which
//! keeps them inside their documented bounds after rounding.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::constants::{ranges, COORD_SCALE};
use crate::object::{ObjectType, OrbitClass, OrbitalObject, Origin, Shape};
use crate::risk::{draw_collision_risk, draw_reentry_risk};

/// Whole globe latitude range.
pub fn full_latitude() -> RangeInclusive<f64> {
    ranges::LATITUDE_MIN..=ranges::LATITUDE_MAX
}

/// Whole globe longitude range.
pub fn full_longitude() -> RangeInclusive<f64> {
    ranges::LONGITUDE_MIN..=ranges::LONGITUDE_MAX
}

/// Generate one object inside the given (inclusive) coordinate rectangle.
///
/// `lat` and `long` must be non-empty; they are snapped to the 0.0001° grid.
pub fn generate(
    rng: &mut impl Rng,
    lat: &RangeInclusive<f64>,
    long: &RangeInclusive<f64>,
    prefix: &str,
) -> OrbitalObject {
    let object_type = pick(rng, &ObjectType::ALL);
    let orbit = pick(rng, &OrbitClass::ALL);
    let shape = pick(rng, &Shape::ALL);
    let origin = pick(rng, &Origin::ALL);

    let mass = rng.gen_range(ranges::MASS_KG) as f64;
    let size = rng.gen_range(ranges::SIZE_CM) as f64 / 100.0;
    let jitter = rng.gen_range(ranges::VELOCITY_JITTER_CENTI);
    let velocity = round_to(jitter as f64 / 100.0 + orbit.velocity_baseline(), 100.0);
    let altitude = rng.gen_range(orbit.altitude_range());

    let risk_score = draw_collision_risk(rng, mass, velocity, orbit);

    let latitude = sample_coordinate(rng, lat);
    let longitude = sample_coordinate(rng, long);

    let life_span = rng.gen_range(ranges::LIFE_SPAN_DECI) as f64 / 10.0;
    let reentry_risk = draw_reentry_risk(rng, orbit, life_span);

    OrbitalObject {
        name: draw_name(rng, prefix),
        object_type,
        orbit,
        mass,
        size,
        shape,
        velocity,
        altitude,
        origin,
        risk_score,
        latitude,
        longitude,
        life_span,
        reentry_risk,
    }
}

/// `{prefix}-{NNNN}` with a random four digit suffix.
pub fn draw_name(rng: &mut impl Rng, prefix: &str) -> String {
    format_name(prefix, rng.gen_range(ranges::NAME_SUFFIX))
}

pub fn format_name(prefix: &str, suffix: u32) -> String {
    format!("{}-{}", prefix, suffix)
}

fn pick<T: Copy>(rng: &mut impl Rng, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

/// Uniform draw on the coordinate grid within an inclusive range.
fn sample_coordinate(rng: &mut impl Rng, range: &RangeInclusive<f64>) -> f64 {
    let lo = (range.start() * COORD_SCALE).round() as i64;
    let hi = (range.end() * COORD_SCALE).round() as i64;
    rng.gen_range(lo..=hi.max(lo)) as f64 / COORD_SCALE
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
