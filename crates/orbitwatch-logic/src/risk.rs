//! Derived risk metrics.
//!
//! Both scores are fixed at generation time. The deterministic part of each
//! formula is split from the random draw so it can be checked directly.

use std::ops::Range;

use rand::Rng;

use crate::constants::risk;
use crate::object::OrbitClass;

/// Collision risk for a given noise term.
///
/// `round(mass * velocity / 1000 + leo_penalty + noise)`, clamped to 0..=100.
/// `noise` is expected in `0.0..NOISE_SPAN`.
pub fn collision_risk(mass: f64, velocity: f64, orbit: OrbitClass, noise: f64) -> u8 {
    let penalty = if orbit == OrbitClass::Leo {
        risk::LEO_PENALTY
    } else {
        0.0
    };
    let raw = (mass * velocity / 1000.0 + penalty + noise).round();
    raw.clamp(0.0, risk::MAX_SCORE as f64) as u8
}

/// Collision risk with freshly drawn noise.
pub fn draw_collision_risk(
    rng: &mut impl Rng,
    mass: f64,
    velocity: f64,
    orbit: OrbitClass,
) -> u8 {
    let noise = rng.gen::<f64>() * risk::NOISE_SPAN;
    collision_risk(mass, velocity, orbit, noise)
}

/// Range the re-entry risk is drawn from.
///
/// Short-lived LEO objects are the ones that actually come down.
pub fn reentry_risk_range(orbit: OrbitClass, life_span: f64) -> Range<u8> {
    if orbit == OrbitClass::Leo && life_span < risk::SHORT_LIFE_YEARS {
        risk::REENTRY_ELEVATED
    } else {
        risk::REENTRY_BASELINE
    }
}

pub fn draw_reentry_risk(rng: &mut impl Rng, orbit: OrbitClass, life_span: f64) -> u8 {
    let score = rng.gen_range(reentry_risk_range(orbit, life_span));
    score.min(risk::MAX_SCORE)
}
