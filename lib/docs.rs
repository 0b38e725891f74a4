//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Radial Numerov](#radial-numerov)
//! - [Exponential grid](#exponential-grid)
//! - [Shooting](#shooting)
//! - [Shell filling](#shell-filling)
//!
//! # Background
//! For a spherically symmetric potential *V*(*r*), the wavefunction of an
//! electron separates into a radial part and a spherical harmonic. Writing the
//! radial part as *R*(*r*) = *u*(*r*) / *r*, the radial Schrödinger equation in
//! Hartree atomic units is
//! ```text
//! ∂²u
//! --- = 2 (V_eff(r) - E) u(r)
//! ∂r²
//!
//!                      l (l + 1)
//! V_eff(r) = V(r) + -----------
//!                        2 r²
//! ```
//! with boundary conditions *u*(0) = 0 and *u*(*r*) → 0 as *r* → ∞. Near the
//! origin the regular solution behaves as *r*<sup>*l* + 1</sup>; far outside
//! the classically allowed region (where *V*<sub>eff</sub> > *E*) it decays as
//! exp(−*r* √(2|*E*|)). Both limits are used as starting values for
//! integration.
//!
//! # Radial Numerov
//! With the equation in the form *y*'' = *f* *y* and grid spacing *h*,
//! Numerov's method[^1] works with the auxiliary sequence
//! ```text
//!          h²
//! w = (1 - -- f) y
//!          12
//! ```
//! which obeys the three-point recurrence
//! ```text
//! w[i - 1] = 2 w[i] - w[i + 1] + h² f[i] y[i]
//! ```
//! with an error term of *O*(*h*⁶) per step. Each new *y* is recovered by
//! dividing out the (1 − *h*²*f*/12) factor. The same recurrence runs outward
//! with the roles of *i* − 1 and *i* + 1 swapped.
//!
//! # Exponential grid
//! Bound-state wavefunctions vary quickly near the nucleus and slowly far from
//! it, so a grid with spacing proportional to *r* is more economical than a
//! uniform one. With
//! ```text
//! r(i) = Rp (exp(i δ) - 1)
//! ```
//! and the substitution *u*(*r*) = exp(*i* δ / 2) *y*(*i*), the first
//! derivative term produced by the change of variables vanishes and *y*
//! satisfies
//! ```text
//! ∂²y
//! --- = [2 (V_eff - E) Rp² δ² exp(2 i δ) + δ² / 4] y
//! ∂i²
//! ```
//! which is again of Numerov form, now with unit step in *i*. *R*ₚ is fixed by
//! requiring the last grid point to land on the outer radius. The regular
//! starting value becomes *r*<sup>*l* + 1</sup> exp(−*i* δ / 2), and the local
//! spacing used for quadrature is *R*ₚ exp(*i* δ) (1 − exp(−δ)).
//!
//! # Shooting
//! A trial energy *E* is an eigenvalue when the solution started from the
//! decaying tail also satisfies *u*(0) = 0. Two quantities help an outer loop
//! locate such energies:
//!
//! - The number of sign changes of the inward solution. For fixed *l*, it
//!   increases by one each time *E* passes an eigenvalue, so bisecting on the
//!   node count isolates the level with *n* − *l* − 1 nodes. Integration can
//!   stop once the solution re-enters a classically forbidden region near the
//!   origin (the centrifugal barrier), since no further nodes appear there for
//!   energies near an eigenvalue.
//! - The value of the inward solution extrapolated to the origin, which
//!   changes sign at each eigenvalue and can be refined with any bracketing
//!   root-finder.
//!
//! Once an energy is found, a complete wavefunction is assembled from an
//! inward branch (stopped at its first maximum, where it is most reliable) and
//! an outward branch started from the regular solution, rescaled to agree at
//! the match point.
//!
//! # Shell filling
//! Ground-state configurations follow the Madelung rule: subshells fill in
//! order of increasing *n* + *l*, and for equal *n* + *l* in order of
//! increasing *n*, each holding up to 2(2*l* + 1) electrons. The rule is
//! broken by a number of elements in which a half-filled or filled *d*
//! subshell is favored (Cr, Cu, Nb, Mo, Ru, Rh, Pd, Ag, Pt, Au), by early
//! lanthanides and actinides that place an *f* electron in *d* instead (La,
//! Ce, Gd, Ac, Th, Pa, U, Np, Cm), and by Lr, whose last electron goes to 7*p*.
//!
//! [^1]: B. Numerov, "Note on the numerical integration of d2x/dt2 = f(x,t)."
//! Astronomische Nachrichten **230** 19 (1927).
