//! Radial grids over which the Numerov solver integrates.
//!
//! A grid maps an integer index to a radial position and supplies the
//! coefficient of the radial equation at that index, built from a caller-owned
//! [`Potential`] sampled one value per index. Two grids are provided:
//!
//! - [`UniformGrid`]: position = *h* × index.
//! - [`ExponentialGrid`]: position = *R*ₚ (exp(*iδ*) − 1), integrated in the
//!   index variable with a transformed equation. See
//!   [`docs`][crate::docs#exponential-grid].
//!
//! Energies are in Hartree and lengths in Bohr radii.

use std::ops::Index;
use ndarray as nd;
use crate::{
    Arr1,
    error::GridError,
};

pub type GridResult<T> = Result<T, GridError>;

/// Cutoff numerator for [`UniformGrid`]: integration never starts beyond
/// `UNIFORM_CUTOFF / sqrt(2|E|)`.
pub const UNIFORM_CUTOFF: f64 = 323.0;

/// Cutoff numerator for [`ExponentialGrid`]: integration never starts beyond
/// `EXPONENTIAL_CUTOFF / sqrt(2|E|)`.
pub const EXPONENTIAL_CUTOFF: f64 = 15.0;

/// Potential energy sampled at each grid index.
///
/// The solver reads samples by index only, so a potential must be at least
/// one element longer than the largest index an integration reaches.
#[derive(Clone, Debug, PartialEq)]
pub struct Potential(nd::Array1<f64>);

impl Potential {
    /// Wrap an existing array of samples.
    pub fn from_array(V: nd::Array1<f64>) -> Self { Self(V) }

    /// Sample a function of radius at each point of `r`.
    pub fn sample<S, F>(r: &Arr1<S>, V: F) -> Self
    where
        S: nd::Data<Elem = f64>,
        F: FnMut(f64) -> f64,
    {
        Self(r.mapv(V))
    }

    /// Get the number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.0.len() }

    /// Get a reference to the underlying array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.0 }
}

impl Index<usize> for Potential {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 { &self.0[idx] }
}

/// Everything the Numerov solver needs from a grid.
///
/// `position` arguments are what the solver passes along as it steps (`h` ×
/// index); a grid is free to ignore them in favor of the index.
pub trait RadialGrid {
    /// Number of potential samples available.
    fn potential_len(&self) -> usize;

    /// Physical radius of grid point `idx` when stepping by `h`.
    fn position(&self, idx: usize, h: f64) -> f64;

    /// Potential plus the centrifugal term *l*(*l* + 1)/(2*r*²).
    fn effective_potential(&self, l: u32, position: f64, idx: usize) -> f64;

    /// Coefficient *f* in the equation *y*'' = *f* *y* being integrated.
    fn coefficient(&self, l: u32, E: f64, position: f64, idx: usize) -> f64;

    /// Approximate solution deep in the classically forbidden region.
    fn boundary_far(&self, position: f64, E: f64) -> f64;

    /// Regular solution near the origin.
    fn boundary_zero(&self, position: f64, l: u32) -> f64;

    /// Radius beyond which integration is not started for energy `E`.
    fn max_radius(&self, E: f64) -> f64;

    /// Index of the grid point at [`Self::max_radius`].
    fn max_radius_index(&self, E: f64) -> usize;

    /// Local spacing *dr* around grid point `idx`.
    fn derivative_step(&self, idx: usize, h: f64) -> f64;

    /// Convert a value of the integrated variable at `idx` to the radial
    /// function *u*(*r*) = *r* *R*(*r*).
    fn to_radial(&self, y: f64, idx: usize) -> f64;
}

fn centrifugal(l: u32, r: f64) -> f64 {
    let l = l as f64;
    l * (l + 1.0) / (r * r) * 0.5
}

fn decay_constant(E: f64) -> f64 { (2.0 * E.abs()).sqrt() }

/// Uniformly spaced radial grid.
///
/// Grid point *i* sits at radius *h* *i*, where *h* is the step chosen by the
/// solver (1 for [`Span::UnitStep`][crate::solve::Span::UnitStep]).
#[derive(Copy, Clone, Debug)]
pub struct UniformGrid<'a> {
    V: &'a Potential,
}

impl<'a> UniformGrid<'a> {
    /// Create a new `UniformGrid` over a potential sampled at *h* *i*.
    pub fn new(V: &'a Potential) -> Self { Self { V } }

    /// Index of the cutoff radius for energy `E` on a grid with step `h`.
    pub fn max_radius_index_with_step(E: f64, h: f64) -> usize {
        (UNIFORM_CUTOFF / decay_constant(E) / h) as usize
    }
}

impl<'a> RadialGrid for UniformGrid<'a> {
    fn potential_len(&self) -> usize { self.V.len() }

    fn position(&self, idx: usize, h: f64) -> f64 { h * idx as f64 }

    fn effective_potential(&self, l: u32, position: f64, idx: usize) -> f64 {
        self.V[idx] + centrifugal(l, position)
    }

    fn coefficient(&self, l: u32, E: f64, position: f64, idx: usize) -> f64 {
        2.0 * (self.effective_potential(l, position, idx) - E)
    }

    // asymptotic decay only; not validated against exact solutions
    fn boundary_far(&self, position: f64, E: f64) -> f64 {
        (-position * decay_constant(E)).exp()
    }

    fn boundary_zero(&self, position: f64, l: u32) -> f64 {
        position.powi(l as i32 + 1)
    }

    fn max_radius(&self, E: f64) -> f64 { UNIFORM_CUTOFF / decay_constant(E) }

    fn max_radius_index(&self, E: f64) -> usize {
        Self::max_radius_index_with_step(E, 1.0)
    }

    fn derivative_step(&self, _idx: usize, h: f64) -> f64 { h }

    fn to_radial(&self, y: f64, _idx: usize) -> f64 { y }
}

/// Exponentially spaced radial grid.
///
/// Grid point *i* sits at radius *R*ₚ (exp(*iδ*) − 1), with *R*ₚ chosen so
/// that the last of `points` grid points lands on `r_max`. The solver always
/// steps through the index with unit step on this grid; the radial equation
/// is transformed accordingly.
///
/// ```
/// use xatom::grid::{ ExponentialGrid, Potential, RadialGrid };
///
/// let r = ExponentialGrid::radii(50.0, 1e-3, 1001).unwrap();
/// let V = Potential::sample(&r, |rk| if rk > 0.0 { -1.0 / rk } else { 0.0 });
/// let grid = ExponentialGrid::new(&V, 50.0, 1e-3, 1001).unwrap();
/// assert_eq!(grid.position(0, 1.0), 0.0);
/// assert!((grid.position(1000, 1.0) - 50.0).abs() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ExponentialGrid<'a> {
    V: &'a Potential,
    delta: f64,
    // radial scale
    rp: f64,
    // 2 δ
    two_delta: f64,
    // Rₚ² δ²
    rp2_delta2: f64,
    // δ² / 4
    delta2_4: f64,
}

impl<'a> ExponentialGrid<'a> {
    /// Create a new `ExponentialGrid` spanning `[0, r_max]` in `points` points
    /// with decay parameter `delta`.
    pub fn new(V: &'a Potential, r_max: f64, delta: f64, points: usize)
        -> GridResult<Self>
    {
        let rp = Self::scale_for(r_max, delta, points)?;
        Ok(Self {
            V,
            delta,
            rp,
            two_delta: 2.0 * delta,
            rp2_delta2: rp.powi(2) * delta.powi(2),
            delta2_4: delta.powi(2) / 4.0,
        })
    }

    /// Compute the radial scale *R*ₚ for the given grid shape.
    pub fn scale_for(r_max: f64, delta: f64, points: usize) -> GridResult<f64> {
        GridError::check_radius(r_max)?;
        GridError::check_delta(delta)?;
        GridError::check_points(points)?;
        let rp = r_max / ((points - 1) as f64 * delta).exp_m1();
        GridError::check_scale(rp)?;
        Ok(rp)
    }

    /// Generate the radii of all grid points for the given grid shape, e.g.
    /// to sample a [`Potential`] before the grid is built.
    pub fn radii(r_max: f64, delta: f64, points: usize)
        -> GridResult<nd::Array1<f64>>
    {
        let rp = Self::scale_for(r_max, delta, points)?;
        let r: nd::Array1<f64>
            = (0..points)
            .map(|i| rp * (i as f64 * delta).exp_m1())
            .collect();
        Ok(r)
    }

    /// Get the decay parameter δ.
    pub fn get_delta(&self) -> f64 { self.delta }

    /// Get the radial scale *R*ₚ.
    pub fn get_rp(&self) -> f64 { self.rp }

    fn radius(&self, idx: usize) -> f64 {
        self.rp * (idx as f64 * self.delta).exp_m1()
    }
}

impl<'a> RadialGrid for ExponentialGrid<'a> {
    fn potential_len(&self) -> usize { self.V.len() }

    fn position(&self, idx: usize, _h: f64) -> f64 { self.radius(idx) }

    // the position passed by the solver is an index-space value; the true
    // radius comes from the index
    fn effective_potential(&self, l: u32, _position: f64, idx: usize) -> f64 {
        self.V[idx] + centrifugal(l, self.radius(idx))
    }

    fn coefficient(&self, l: u32, E: f64, position: f64, idx: usize) -> f64 {
        let veff = self.effective_potential(l, position, idx);
        2.0 * (veff - E) * self.rp2_delta2 * (idx as f64 * self.two_delta).exp()
            + self.delta2_4
    }

    fn boundary_far(&self, position: f64, E: f64) -> f64 {
        let r = self.radius(position as usize);
        (-r * decay_constant(E)).exp()
    }

    fn boundary_zero(&self, position: f64, l: u32) -> f64 {
        let r = self.radius(position as usize);
        r.powi(l as i32 + 1) * (-position * self.delta * 0.5).exp()
    }

    fn max_radius(&self, E: f64) -> f64 { EXPONENTIAL_CUTOFF / decay_constant(E) }

    fn max_radius_index(&self, E: f64) -> usize {
        ((self.max_radius(E) / self.rp).ln_1p() / self.delta) as usize
    }

    fn derivative_step(&self, idx: usize, _h: f64) -> f64 {
        self.rp * (idx as f64 * self.delta).exp() * (-(-self.delta).exp_m1())
    }

    fn to_radial(&self, y: f64, idx: usize) -> f64 {
        y * (idx as f64 * self.delta * 0.5).exp()
    }
}
