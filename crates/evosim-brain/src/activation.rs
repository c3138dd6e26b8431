//! Activation function.

/// Below this net input the sigmoid is reported as exactly 0.
///
/// `exp(709)` is the largest finite `f64` exponential.
pub const SATURATION_FLOOR: f64 = -700.0;

/// Logistic sigmoid `1 / (1 + e^-t)`.
///
/// Large negative inputs saturate to exactly `0.0` instead of computing an
/// overflowing exponential. NaN is treated the same way. Large positive
/// inputs round to `1.0`.
pub fn sigmoid(t: f64) -> f64 {
    if t.is_nan() || t < SATURATION_FLOOR {
        return 0.0;
    }
    1.0 / (1.0 + (-t).exp())
}
