//! Endpoint values and distance metrics.
//!
//! An [`Endpoint`] is anything that can be viewed as a slice of coordinates:
//! a scalar `f64`, a fixed-size array, or a `Vec<f64>`. A [`Metric`] measures
//! the mismatch between two endpoints. For scalar endpoints both provided
//! metrics reduce to `|a - b|`.

use crate::error::{Result, SequencingError};

/// An immutable endpoint value exposing its coordinates.
pub trait Endpoint {
    /// Coordinates of this endpoint. Scalars have exactly one.
    fn coords(&self) -> &[f64];
}

impl Endpoint for f64 {
    fn coords(&self) -> &[f64] {
        std::slice::from_ref(self)
    }
}

impl<const N: usize> Endpoint for [f64; N] {
    fn coords(&self) -> &[f64] {
        self
    }
}

impl Endpoint for Vec<f64> {
    fn coords(&self) -> &[f64] {
        self
    }
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn coords(&self) -> &[f64] {
        (**self).coords()
    }
}

/// A distance between two endpoint values.
///
/// Implementations must be pure and total for same-shaped inputs, return a
/// finite non-negative value, and return exactly `0.0` for equal inputs.
/// Symmetry is not required: the solvers only ever call
/// `distance(left.end, right.start)`.
///
/// # Examples
///
/// ```
/// use u_chainsort::metric::{Euclidean, Manhattan, Metric};
///
/// assert_eq!(Manhattan.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 7.0);
/// assert_eq!(Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
/// ```
pub trait Metric {
    /// Distance between the coordinate slices `a` and `b`.
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64>;

    /// Human-readable name, used in log events.
    fn name(&self) -> &str;
}

impl<M: Metric + ?Sized> Metric for &M {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        (**self).distance(a, b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

fn check_shape(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(SequencingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Sum of absolute per-dimension differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Manhattan;

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_shape(a, b)?;
        Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
    }

    fn name(&self) -> &str {
        "manhattan"
    }
}

/// Square root of the sum of squared per-dimension differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_shape(a, b)?;
        if a.len() == 1 {
            // exact for scalars, sqrt(x^2) may round
            return Ok((a[0] - b[0]).abs());
        }
        Ok(a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt())
    }

    fn name(&self) -> &str {
        "euclidean"
    }
}
