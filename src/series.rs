use std::fs;
use std::path::Path;

use ndarray::aview1;
use num_traits::{Float, FromPrimitive};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{Error, Result};

/// An ordered series of repeated observations of a single measurand
///
/// The series grows by append and is cleared by explicit reset. Append order
/// matters only to display collaborators (1-based row indices); the
/// statistics are order-free.
#[derive(Clone, Debug)]
pub struct MeasurementSeries<E> {
    values: Vec<E>,
}

impl<E> Default for MeasurementSeries<E> {
    fn default() -> Self {
        Self { values: vec![] }
    }
}

impl<E> MeasurementSeries<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[E] {
        &self.values
    }

    /// Discard all stored observations, returning the series to the empty
    /// state. Reports computed earlier are snapshots and stay valid.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<E: Float + std::fmt::Display> MeasurementSeries<E> {
    /// Append one observation
    ///
    /// # Errors
    /// Returns `InvalidInput` for NaN or infinite values. Accepting them
    /// would corrupt every downstream statistic without warning.
    pub fn push(&mut self, value: E) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "non-finite measurement value {value}"
            )));
        }
        self.values.push(value);
        Ok(())
    }
}

impl<E: Float + FromPrimitive> MeasurementSeries<E> {
    /// Arithmetic mean of the stored observations, `0` for an empty series
    ///
    /// The zero return is a defined edge policy, not an error; callers must
    /// gate on `len` before reporting it.
    #[must_use]
    pub fn mean(&self) -> E {
        aview1(&self.values).mean().unwrap_or_else(E::zero)
    }

    /// Unbiased (n − 1 denominator) sample standard deviation, `0` when the
    /// series holds fewer than two observations
    #[must_use]
    pub fn sample_std_dev(&self) -> E {
        if self.values.len() <= 1 {
            return E::zero();
        }
        aview1(&self.values).std(E::one())
    }

    /// Standard uncertainty of the *mean*: s / √n, `0` for an empty series
    ///
    /// Not the uncertainty of a single observation.
    #[must_use]
    pub fn type_a_uncertainty(&self) -> E {
        if self.values.is_empty() {
            return E::zero();
        }
        let count = E::from_usize(self.values.len()).expect("usize must fit in `E`");
        self.sample_std_dev() / count.sqrt()
    }
}

#[derive(Deserialize)]
struct Row<E>(E);

impl<E: Float + DeserializeOwned + std::fmt::Display> MeasurementSeries<E> {
    /// Create a `MeasurementSeries` from an on-disk representation
    ///
    /// Expects a CSV file with a header row and a single `value` column.
    /// Every row passes the same finite-value validation as `push`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, a row fails to parse, or
    /// a row holds a non-finite value.
    pub fn from_file(filepath: &Path) -> Result<Self> {
        let file = fs::read(filepath)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(&file[..]);

        let mut series = Self::new();
        for result in rdr.deserialize() {
            let record: Row<E> = result?;
            series.push(record.0)?;
        }

        Ok(series)
    }
}
