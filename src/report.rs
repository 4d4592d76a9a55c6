use std::fmt;

use serde::Serialize;

use crate::typeb::Distribution;

/// An immutable snapshot of one uncertainty computation
///
/// Derived purely from the series and the Type B spec at computation time;
/// it holds no reference back to either, so it stays valid after the series
/// is reset or grows.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct UncertaintyReport<E> {
    pub count: usize,
    pub mean: E,
    pub std_dev: E,
    /// Standard uncertainty of the mean, s / √n
    pub type_a: E,
    pub limit_error: E,
    pub distribution: Distribution,
    /// Limit error converted through the distribution's coverage factor
    pub type_b: E,
    /// Root sum of squares of the Type A and Type B components
    pub combined: E,
    /// combined × coverage_factor, ~95% confidence
    pub expanded: E,
    /// Fixed at 2, independent of the Type B distribution's own k
    pub coverage_factor: E,
}

impl<E: fmt::Display> fmt::Display for UncertaintyReport<E> {
    /// Render the report as human-readable text, all numeric fields at 6
    /// fractional digits for reproducible output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "measurement summary (GB/T 27411-2012)")?;
        writeln!(f, "----------------------------------------")?;
        writeln!(f, "observations: {}", self.count)?;
        writeln!(f, "mean: {:.6}", self.mean)?;
        writeln!(f, "sample standard deviation: {:.6}", self.std_dev)?;
        writeln!(f)?;
        writeln!(f, "[type A]")?;
        writeln!(f, "standard uncertainty of the mean: {:.6} (u_A)", self.type_a)?;
        writeln!(f)?;
        writeln!(f, "[type B]")?;
        writeln!(f, "limit error: {:.6}", self.limit_error)?;
        writeln!(f, "distribution: {}", self.distribution)?;
        writeln!(f, "standard uncertainty: {:.6} (u_B)", self.type_b)?;
        writeln!(f)?;
        writeln!(f, "[combined and expanded]")?;
        writeln!(f, "combined standard uncertainty: {:.6} (u_c)", self.combined)?;
        writeln!(
            f,
            "expanded uncertainty (k = {:.0}, ~95% confidence): {:.6}",
            self.coverage_factor, self.expanded
        )?;
        write!(f, "result: {:.6} ± {:.6}", self.mean, self.expanded)
    }
}
