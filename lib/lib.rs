#![allow(dead_code, non_snake_case)]

//! Provides the two primitives an atomic electronic-structure solver needs
//! before it can do anything self-consistent: the ground-state subshell
//! configuration of an atom, and Numerov solutions to the radial Schrödinger
//! equation for a given angular momentum, trial energy, and potential.
//!
//! Provides implementations for the following:
//! - Shell filling:
//!     - Madelung (*n* + *l*) ordering with the known transition-metal,
//!       lanthanide, and actinide exceptions
//! - Radial grids:
//!     - Uniform grid
//!     - Exponential grid (fine near the origin, coarse far out)
//! - Radial Numerov integration (generic over the grid):
//!     - Inward node counting with turning-point bail-out
//!     - Extrapolated value at the origin, for driving a root-finder
//!     - Two-sided matched wavefunction
//!
//! Choosing trial energies and building the potential are left to the caller.
//!
//! ```
//! use xatom::shell::subshells;
//!
//! // chromium: 4s¹ 3d⁵
//! let cr = subshells(24);
//! let s4 = cr.iter().find(|s| s.n == 3 && s.l == 0).unwrap();
//! assert_eq!(s4.occupation, 1);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod shell;
pub mod solve;
pub mod utils;

pub mod docs;

/// Inward integration in [`solve::Numerov::matched_solution`] is stopped once
/// the wavefunction magnitude exceeds this value.
pub const MATCH_GROWTH_LIMIT: f64 = 1e50;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
