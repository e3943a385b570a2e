//! Convenience wrappers around methods from the approx crate for working with floating point
//! precision.

use approx::AbsDiffEq;

/// Targeted accuracy instantiated over `f64`
pub const ACC: f64 = 10e-11;

/// Tolerance used when checking that probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Compares if two floats are close via `approx::abs_diff_eq` using a maximum absolute difference
/// (epsilon) of `acc`.
#[must_use]
pub fn almost_eq(a: f64, b: f64, acc: f64) -> bool {
    if a.is_infinite() && b.is_infinite() {
        return a == b;
    }
    a.abs_diff_eq(&b, acc)
}

/// Returns true when `value` is a valid probability.
#[must_use]
pub fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
