use crate::error::EpiabmError;

/// A delay distribution tabulated as its inverse CDF at evenly spaced
/// quantiles and scaled by `mean`.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseCdf {
    mean: f64,
    icdf: Vec<f64>,
}

impl InverseCdf {
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if the table has fewer than
    /// two entries or `mean` is not finite.
    pub fn new(mean: f64, icdf: Vec<f64>) -> Result<InverseCdf, EpiabmError> {
        if icdf.len() < 2 {
            return Err(EpiabmError::ConfigurationError(format!(
                "inverse CDF table needs at least two entries, got {}",
                icdf.len()
            )));
        }
        if !mean.is_finite() {
            return Err(EpiabmError::ConfigurationError(format!(
                "inverse CDF mean must be finite, got {mean}"
            )));
        }
        Ok(InverseCdf { mean, icdf })
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of intervals in the table.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.icdf.len() - 1
    }

    /// Maps a uniform draw `u` in `[0, 1)` to a delay by interpolating
    /// linearly between neighbouring table entries.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::InvariantViolation` if the delay is negative.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn icdf_choose_noexp(&self, u: f64) -> Result<f64, EpiabmError> {
        let resolution = self.resolution();
        let mut q = u.clamp(0.0, 1.0) * resolution as f64;
        // u == 1 would index past the table
        let i = (q.floor() as usize).min(resolution - 1);
        q -= i as f64;
        let value = self.mean * (q * self.icdf[i + 1] + (1.0 - q) * self.icdf[i]);
        if value < 0.0 || value.is_nan() {
            return Err(EpiabmError::InvariantViolation(format!(
                "sampled a negative transition time {value}"
            )));
        }
        Ok(value)
    }
}
