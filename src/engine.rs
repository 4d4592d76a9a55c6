use std::fmt;

use num_traits::{Float, FromPrimitive};

use crate::report::UncertaintyReport;
use crate::series::MeasurementSeries;
use crate::typeb::TypeBSpec;
use crate::{Error, Result};

/// Coverage factor applied to the combined standard uncertainty, ~95%
/// confidence for the combined result. Independent of the Type B
/// distribution's own k.
pub const COVERAGE_FACTOR: f64 = 2.0;

/// Root-sum-of-squares combination of two standard uncertainties
///
/// Assumes the components are statistically independent; that assumption is
/// documented, not checked.
#[must_use]
pub fn combined_uncertainty<E: Float>(u_a: E, u_b: E) -> E {
    u_a.hypot(u_b)
}

/// One measurement session: a live series of observations and the
/// computation over it
///
/// Owns its series exclusively. Multi-session use is one engine value per
/// session; no process-wide state.
#[derive(Clone, Debug)]
pub struct UncertaintyEngine<E> {
    series: MeasurementSeries<E>,
}

impl<E> Default for UncertaintyEngine<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> UncertaintyEngine<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            series: MeasurementSeries::new(),
        }
    }

    #[must_use]
    pub fn from_series(series: MeasurementSeries<E>) -> Self {
        Self { series }
    }

    /// Number of stored observations, for collaborator gating (compute stays
    /// disabled until the count reaches 2)
    #[must_use]
    pub fn count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series(&self) -> &MeasurementSeries<E> {
        &self.series
    }

    /// Discard all observations; the session returns to the empty state
    pub fn reset(&mut self) {
        self.series.clear();
    }
}

impl<E: Float + fmt::Display> UncertaintyEngine<E> {
    /// Append one observation to the live series
    ///
    /// # Errors
    /// Returns `InvalidInput` for NaN or infinite values.
    pub fn append(&mut self, value: E) -> Result<()> {
        self.series.push(value)
    }
}

impl<E: Float + FromPrimitive> UncertaintyEngine<E> {
    /// Compute the full uncertainty budget against the current series
    ///
    /// Reads the series without mutating it and returns a snapshot report:
    /// mean → sample standard deviation → u_A → u_B → u_c → expanded.
    ///
    /// # Errors
    /// Returns `InsufficientData` when fewer than 2 observations are stored;
    /// the sample standard deviation is undefined below that.
    pub fn compute_report(&self, spec: &TypeBSpec<E>) -> Result<UncertaintyReport<E>> {
        let count = self.series.len();
        if count < 2 {
            return Err(Error::InsufficientData { count });
        }

        let mean = self.series.mean();
        let std_dev = self.series.sample_std_dev();
        let type_a = self.series.type_a_uncertainty();
        let type_b = spec.standard_uncertainty();
        let combined = combined_uncertainty(type_a, type_b);
        let coverage_factor = E::from_f64(COVERAGE_FACTOR).expect("2.0 must fit in `E`");
        let expanded = combined * coverage_factor;

        Ok(UncertaintyReport {
            count,
            mean,
            std_dev,
            type_a,
            limit_error: spec.limit_error(),
            distribution: spec.distribution(),
            type_b,
            combined,
            expanded,
            coverage_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray_rand::rand::{Rng, SeedableRng};
    use rand_isaac::Isaac64Rng;

    use crate::typeb::{Distribution, TypeBSpec};
    use crate::{Error, Result};

    use super::{combined_uncertainty, UncertaintyEngine};

    fn populated_engine(values: &[f64]) -> UncertaintyEngine<f64> {
        let mut engine = UncertaintyEngine::new();
        for &value in values {
            engine.append(value).unwrap();
        }
        engine
    }

    #[test]
    fn compute_fails_below_two_observations() {
        let spec = TypeBSpec::new(0.05, Distribution::Uniform).unwrap();

        let mut engine: UncertaintyEngine<f64> = UncertaintyEngine::new();
        let err = engine.compute_report(&spec).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { count: 0 }));

        engine.append(10.0).unwrap();
        let err = engine.compute_report(&spec).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { count: 1 }));

        // The session stays usable after the error
        engine.append(10.1).unwrap();
        assert!(engine.compute_report(&spec).is_ok());
    }

    #[test]
    fn worked_example_matches_hand_computation() -> Result<()> {
        let engine = populated_engine(&[10.00, 10.02, 9.98, 10.01, 9.99]);
        let spec = TypeBSpec::new(0.05, Distribution::Uniform)?;

        let report = engine.compute_report(&spec)?;

        assert_eq!(report.count, 5);
        approx::assert_relative_eq!(report.mean, 10.0, max_relative = 1e-12);
        approx::assert_relative_eq!(report.std_dev, 0.015_811_388, max_relative = 1e-6);
        approx::assert_relative_eq!(report.type_a, 0.007_071_068, max_relative = 1e-6);
        approx::assert_relative_eq!(report.type_b, 0.028_867_513, max_relative = 1e-6);
        approx::assert_relative_eq!(report.combined, 0.029_720_923, max_relative = 1e-6);
        approx::assert_relative_eq!(report.expanded, 0.059_441_846, max_relative = 1e-6);

        let rendered = report.to_string();
        assert!(rendered.contains("result: 10.000000 ± 0.059442"));

        Ok(())
    }

    #[test]
    fn zero_limit_error_reduces_to_type_a_only() -> Result<()> {
        let seed = 40;
        let mut rng = Isaac64Rng::seed_from_u64(seed);

        let count = rng.gen_range(2..50);
        let mut engine = UncertaintyEngine::new();
        for _ in 0..count {
            engine.append(rng.gen_range(-10.0..10.0))?;
        }

        for distribution in Distribution::ALL {
            let spec = TypeBSpec::new(0.0, distribution)?;
            let report = engine.compute_report(&spec)?;

            assert_eq!(report.type_b, 0.0);
            approx::assert_relative_eq!(report.combined, report.type_a);
            approx::assert_relative_eq!(report.expanded, 2.0 * report.type_a);
        }

        Ok(())
    }

    #[test]
    fn combination_dominates_both_components() {
        let seed = 40;
        let mut rng = Isaac64Rng::seed_from_u64(seed);

        for _ in 0..100 {
            let u_a: f64 = rng.gen_range(0.0..10.0);
            let u_b: f64 = rng.gen_range(0.0..10.0);
            let u_c = combined_uncertainty(u_a, u_b);

            assert!(u_c >= u_a.max(u_b));
            approx::assert_relative_eq!(u_c, (u_a * u_a + u_b * u_b).sqrt(), max_relative = 1e-12);
        }
    }

    #[test]
    fn degenerate_combinations_pass_through() {
        let seed = 40;
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        let u = rng.gen_range(0.0..10.0);

        approx::assert_relative_eq!(combined_uncertainty(u, 0.0), u);
        approx::assert_relative_eq!(combined_uncertainty(0.0, u), u);
    }

    #[test]
    fn report_is_a_snapshot_surviving_reset() -> Result<()> {
        let mut engine = populated_engine(&[1.0, 2.0, 3.0]);
        let spec = TypeBSpec::new(0.1, Distribution::Normal95)?;

        let report = engine.compute_report(&spec)?;
        engine.reset();

        assert_eq!(engine.count(), 0);
        assert_eq!(report.count, 3);
        approx::assert_relative_eq!(report.mean, 2.0);

        Ok(())
    }

    #[test]
    fn compute_never_mutates_the_series() -> Result<()> {
        let engine = populated_engine(&[4.0, 5.0, 6.0]);
        let spec = TypeBSpec::new(0.2, Distribution::Normal99)?;

        let before = engine.series().values().to_vec();
        let _ = engine.compute_report(&spec)?;

        assert_eq!(engine.series().values(), before.as_slice());
        Ok(())
    }
}
