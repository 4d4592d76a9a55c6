use std::fmt;
use std::fs;
use std::path::Path;

use num_traits::{Float, FromPrimitive};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Error, Result};

/// The assumed error distribution behind a stated limit error
///
/// Each distribution carries a fixed coverage factor k relating the limit
/// error to a standard uncertainty (GB/T 27411-2012). The factors are not
/// user-tunable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Uniform (rectangular), k = √3
    Uniform,
    /// Normal at 95% confidence, k = 2
    Normal95,
    /// Normal at 99% confidence, k = 3
    Normal99,
}

impl Distribution {
    /// The three options in the order collaborators present them
    pub const ALL: [Self; 3] = [Self::Uniform, Self::Normal95, Self::Normal99];

    /// Map a wire code (the selector index of front ends) to a distribution
    ///
    /// # Errors
    /// Returns `InvalidDistribution` for codes outside 0..=2. Out-of-range
    /// codes fail closed rather than silently assuming Uniform.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Uniform),
            1 => Ok(Self::Normal95),
            2 => Ok(Self::Normal99),
            code => Err(Error::InvalidDistribution { code }),
        }
    }

    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Uniform => 0,
            Self::Normal95 => 1,
            Self::Normal99 => 2,
        }
    }

    /// The coverage factor k for this distribution assumption
    #[must_use]
    pub fn coverage_factor<E: Float + FromPrimitive>(self) -> E {
        match self {
            Self::Uniform => E::from_f64(3.0).expect("3.0 must fit in `E`").sqrt(),
            Self::Normal95 => E::from_f64(2.0).expect("2.0 must fit in `E`"),
            Self::Normal99 => E::from_f64(3.0).expect("3.0 must fit in `E`"),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uniform => "uniform (k = √3)",
            Self::Normal95 => "normal (95%, k = 2)",
            Self::Normal99 => "normal (99%, k = 3)",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The Type B inputs for one computation: a stated limit error and the
/// distribution assumed to lie behind it
///
/// Transient: supplied fresh per computation, never persisted across resets.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TypeBSpec<E> {
    limit_error: E,
    distribution: Distribution,
}

impl<E: Float + fmt::Display> TypeBSpec<E> {
    /// # Errors
    /// Returns `InvalidInput` when the limit error is NaN or infinite.
    pub fn new(limit_error: E, distribution: Distribution) -> Result<Self> {
        if !limit_error.is_finite() {
            return Err(Error::InvalidInput(format!(
                "non-finite limit error {limit_error}"
            )));
        }
        Ok(Self {
            limit_error,
            distribution,
        })
    }
}

impl<E: Copy> TypeBSpec<E> {
    #[must_use]
    pub const fn limit_error(&self) -> E {
        self.limit_error
    }

    #[must_use]
    pub const fn distribution(&self) -> Distribution {
        self.distribution
    }
}

impl<E: Float + FromPrimitive> TypeBSpec<E> {
    /// The Type B standard uncertainty: limit error divided by the coverage
    /// factor of the assumed distribution
    ///
    /// A limit error ≤ 0 means "no Type B contribution" and yields `0`.
    #[must_use]
    pub fn standard_uncertainty(&self) -> E {
        if self.limit_error <= E::zero() {
            return E::zero();
        }
        self.limit_error / self.distribution.coverage_factor()
    }
}

impl<E: Float + DeserializeOwned + fmt::Display> TypeBSpec<E> {
    /// Create a `TypeBSpec` from an on-disk TOML representation with
    /// `limit_error` and `distribution` keys
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// limit error is non-finite.
    pub fn from_file(filepath: &Path) -> Result<Self> {
        let raw = fs::read_to_string(filepath)?;
        let spec: Self = toml::from_str(&raw)?;
        Self::new(spec.limit_error, spec.distribution)
    }
}
