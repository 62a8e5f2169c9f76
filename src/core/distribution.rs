//! Random scatter distributions for star placement

use rand::distributions::Open01;
use rand::Rng;

/// Inverted log-normal magnitude with a random sign.
///
/// `u` is drawn from the open interval (0, 1), so the result is always
/// finite and non-zero. Magnitudes are at most `exp(-mu)`.
pub fn signed_log_normal<R: Rng + ?Sized>(rng: &mut R, mu: f64, sigma: f64) -> f64 {
    let u: f64 = rng.sample(Open01);
    let positive = rng.gen_bool(0.5);
    signed_log_normal_from(u, positive, mu, sigma)
}

/// Deterministic core of [`signed_log_normal`] for a given uniform draw
pub fn signed_log_normal_from(u: f64, positive: bool, mu: f64, sigma: f64) -> f64 {
    let log_normal = (mu + sigma * (-2.0 * u.ln()).sqrt()).exp();
    let x = 1.0 / log_normal;
    if positive {
        x
    } else {
        -x
    }
}

/// Absolute value of a Box-Muller normal sample, scaled by `std`.
///
/// Not used by the generator; kept as an alternative scatter profile.
pub fn half_gaussian<R: Rng + ?Sized>(rng: &mut R, std: f64) -> f64 {
    let u1: f64 = rng.sample(Open01);
    let u2: f64 = rng.gen();
    let standard_normal = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    (standard_normal * std).abs()
}
