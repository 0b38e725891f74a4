//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Numerical breakdown during integration (overflow, runaway growth, passing a
//! turning point) is *not* an error; solver functions return early with the
//! best available result instead. The types here cover inputs that could not
//! be integrated at all.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;
use crate::shell::MAX_Z;

/// Returned from [`ExponentialGrid::new`][crate::grid::ExponentialGrid::new].
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when a non-positive or non-finite decay parameter is
    /// encountered.
    #[error("grid decay parameter must be finite and greater than 0; got {0}")]
    BadDelta(f64),

    /// Returned when a non-positive or non-finite outer radius is encountered.
    #[error("outer grid radius must be finite and greater than 0; got {0}")]
    BadRadius(f64),

    /// Returned when fewer than 2 grid points are requested.
    #[error("grids must have at least 2 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when the grid shape leaves no usable radial scale, e.g. when
    /// `(points - 1) δ` is large enough that exp overflows.
    #[error("grid shape gives a degenerate radial scale; got {0}")]
    BadScale(f64),
}

impl GridError {
    pub(crate) fn check_delta(delta: f64) -> Result<(), Self> {
        (delta.is_finite() && delta > 0.0)
            .then_some(()).ok_or(Self::BadDelta(delta))
    }

    pub(crate) fn check_radius(r_max: f64) -> Result<(), Self> {
        (r_max.is_finite() && r_max > 0.0)
            .then_some(()).ok_or(Self::BadRadius(r_max))
    }

    pub(crate) fn check_points(points: usize) -> Result<(), Self> {
        (points >= 2).then_some(()).ok_or(Self::TooFewPoints(points))
    }

    pub(crate) fn check_scale(rp: f64) -> Result<(), Self> {
        (rp.is_finite() && rp > 0.0).then_some(()).ok_or(Self::BadScale(rp))
    }
}

/// Returned from radial Numerov solver functions.
#[derive(Debug, Error)]
pub enum NumerovError {
    /// Returned when a non-finite trial energy is encountered.
    #[error("trial energy must be finite; got {0}")]
    BadEnergy(f64),

    /// Returned when a non-positive or non-finite integration extent is
    /// encountered.
    #[error("integration extent must be finite and greater than 0; got {0}")]
    BadExtent(f64),

    /// Returned when the integration range, after capping at the grid's cutoff
    /// radius, holds fewer than 3 steps.
    #[error("integration needs at least 3 steps; got {0}")]
    TooFewSteps(usize),

    /// Returned when the potential has no sample for the outermost index the
    /// integration would touch.
    #[error("potential has {len} samples but integration needs {needed}")]
    PotentialTooShort { needed: usize, len: usize },

    /// Returned when the inward branch of a matched solution is zero (or the
    /// rescaling factor is otherwise non-finite) at the match point.
    #[error("inward branch cannot be rescaled at match point {0}")]
    SingularMatch(usize),
}

impl NumerovError {
    pub(crate) fn check_energy(E: f64) -> Result<(), Self> {
        E.is_finite().then_some(()).ok_or(Self::BadEnergy(E))
    }

    pub(crate) fn check_extent(extent: f64) -> Result<(), Self> {
        (extent.is_finite() && extent > 0.0)
            .then_some(()).ok_or(Self::BadExtent(extent))
    }

    pub(crate) fn check_steps(steps: usize) -> Result<(), Self> {
        (steps >= 3).then_some(()).ok_or(Self::TooFewSteps(steps))
    }

    pub(crate) fn check_potential(needed: usize, len: usize)
        -> Result<(), Self>
    {
        (len >= needed).then_some(())
            .ok_or(Self::PotentialTooShort { needed, len })
    }
}

/// Returned from [`try_subshells`][crate::shell::try_subshells].
#[derive(Debug, Error)]
pub enum ShellError {
    /// Returned when the atomic number lies outside `1..=MAX_Z`.
    #[error("atomic number must be in 1..={max}; got {0}", max = MAX_Z)]
    BadAtomicNumber(u32),

    /// Returned when the shell group ceiling was reached before all electrons
    /// were placed.
    #[error("shell filling placed only {filled} of {z} electrons")]
    Incomplete { z: u32, filled: u32 },
}

impl ShellError {
    pub(crate) fn check_z(z: u32) -> Result<(), Self> {
        (1..=MAX_Z).contains(&z).then_some(()).ok_or(Self::BadAtomicNumber(z))
    }
}
