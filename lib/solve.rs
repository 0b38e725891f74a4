//! Numerov integration of the radial Schrödinger equation for fixed energy.
//!
//! The solver is generic over a [`RadialGrid`] and integrates
//! ```text
//! y''(x) = f(x) y(x)
//! ```
//! with *f* supplied by the grid, using the three-point recurrence on
//! *w* = (1 − *h*²*f*/12) *y*:
//! ```text
//! w[i - 1] = 2 w[i] - w[i + 1] + h² f[i] y[i]
//! ```
//! None of the functions here search for eigenvalues; they are meant to be
//! called repeatedly by an outer loop that adjusts the trial energy until
//! [`Numerov::count_nodes`] or [`Numerov::solution_at_origin`] says it has
//! found the state it is looking for.
//!
//! ```
//! use xatom::grid::{ ExponentialGrid, Potential };
//! use xatom::solve::{ Numerov, Span };
//!
//! // hydrogen
//! let (r_max, delta, n) = (50.0, 1e-3, 10001);
//! let r = ExponentialGrid::radii(r_max, delta, n).unwrap();
//! let V = Potential::sample(&r, |rk| if rk > 0.0 { -1.0 / rk } else { 0.0 });
//! let solver = Numerov::new(ExponentialGrid::new(&V, r_max, delta, n).unwrap());
//! let span = Span::UnitStep { steps: n - 1 };
//!
//! // below the 1s level there are no nodes; between 1s and 2s there is one
//! assert_eq!(solver.count_nodes(span, 0, -0.7, 10).unwrap(), 0);
//! assert_eq!(solver.count_nodes(span, 0, -0.3, 10).unwrap(), 1);
//! ```

use std::cmp;
use ndarray as nd;
use crate::{
    error::NumerovError,
    grid::RadialGrid,
    utils::{ wf_norm_grid, wf_renormalize_grid },
    MATCH_GROWTH_LIMIT,
};

pub type NResult<T> = Result<T, NumerovError>;

/// How the solver steps over the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Span {
    /// Step through grid indices one at a time, starting from index `steps`
    /// or from the grid's own cutoff index for the trial energy, whichever is
    /// smaller.
    UnitStep {
        /// Outermost grid index.
        steps: usize,
    },
    /// Divide a physical extent into equal steps, starting from `extent` or
    /// the grid's cutoff radius for the trial energy, whichever is smaller.
    /// The potential must then be sampled at multiples of `extent / steps`.
    Range {
        /// Outermost radius.
        extent: f64,
        /// Number of steps over `extent`.
        steps: usize,
    },
}

impl Span {
    /// Get the requested number of steps.
    pub fn steps(&self) -> usize {
        match self {
            Self::UnitStep { steps } => *steps,
            Self::Range { steps, .. } => *steps,
        }
    }

    /// Return `true` if `self` is `UnitStep`.
    pub fn is_unit_step(&self) -> bool { matches!(self, Self::UnitStep { .. }) }

    /// Return `true` if `self` is `Range`.
    pub fn is_range(&self) -> bool { matches!(self, Self::Range { .. }) }
}

// step constants for a single solve call
#[derive(Copy, Clone, Debug)]
struct Stepping {
    h: f64,
    h2: f64,
    h2_12: f64,
    // starting position
    start: f64,
    // index of the starting position
    steps: usize,
}

impl Stepping {
    fn new<G>(grid: &G, span: Span, E: f64) -> NResult<Self>
    where G: RadialGrid
    {
        NumerovError::check_energy(E)?;
        let (h, start, steps) = match span {
            Span::UnitStep { steps } => {
                let capped = cmp::min(steps, grid.max_radius_index(E));
                (1.0, capped as f64, capped)
            },
            Span::Range { extent, steps } => {
                NumerovError::check_extent(extent)?;
                NumerovError::check_steps(steps)?;
                let h = extent / steps as f64;
                let start = extent.min(grid.max_radius(E));
                let capped = cmp::min((start / h) as usize, steps);
                NumerovError::check_steps(capped)?;
                (start / capped as f64, start, capped)
            },
        };
        NumerovError::check_steps(steps)?;
        NumerovError::check_potential(steps + 1, grid.potential_len())?;
        if steps < span.steps() {
            tracing::debug!(
                requested = span.steps(),
                steps,
                E,
                "integration range capped at grid cutoff"
            );
        }
        Ok(Self { h, h2: h * h, h2_12: h * h / 12.0, start, steps })
    }

    fn y(&self, w: f64, f: f64) -> f64 { w / (1.0 - self.h2_12 * f) }

    fn w(&self, y: f64, f: f64) -> f64 { (1.0 - self.h2_12 * f) * y }
}

// running state of the three-point recurrence, in either direction
#[derive(Copy, Clone, Debug)]
struct Recurrence {
    w: f64,
    wprev: f64,
    y: f64,
    yprev: f64,
    f: f64,
}

impl Recurrence {
    // first two points at the outer boundary
    fn inward<G>(grid: &G, st: &Stepping, l: u32, E: f64) -> Self
    where G: RadialGrid
    {
        let mut position = st.start;
        let yprev = grid.boundary_far(position, E);
        let fprev = grid.coefficient(l, E, position, st.steps);
        let wprev = st.w(yprev, fprev);
        position -= st.h;
        let y = grid.boundary_far(position, E);
        let f = grid.coefficient(l, E, position, st.steps - 1);
        let w = st.w(y, f);
        Self { w, wprev, y, yprev, f }
    }

    // first two points at the origin; the solution vanishes at index 0
    fn outward<G>(grid: &G, st: &Stepping, l: u32, E: f64) -> Self
    where G: RadialGrid
    {
        let position = st.h;
        let y = grid.boundary_zero(position, l);
        let f = grid.coefficient(l, E, position, 1);
        let w = st.w(y, f);
        Self { w, wprev: 0.0, y, yprev: 0.0, f }
    }

    // move to grid index `idx` and return its position
    fn advance<G>(&mut self, grid: &G, st: &Stepping, l: u32, E: f64, idx: usize)
        -> f64
    where G: RadialGrid
    {
        let wnext = 2.0 * self.w - self.wprev + st.h2 * self.y * self.f;
        let position = st.h * idx as f64;
        self.wprev = self.w;
        self.w = wnext;
        self.f = grid.coefficient(l, E, position, idx);
        self.yprev = self.y;
        self.y = st.y(self.w, self.f);
        position
    }

    // one plain finite-difference step past the last Numerov point
    fn extrapolate(&self, st: &Stepping) -> f64 {
        self.y * (2.0 + st.h2 * self.f) - self.yprev
    }
}

/// A matched solution to the radial equation.
///
/// `wf` holds the integrated variable at each grid index, not *u*(*r*)
/// itself; use [`Self::radial`] to convert. Index 0 is the origin.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Energy
    pub e: f64,
    /// Wavefunction
    pub wf: nd::Array1<f64>,
    /// Index where the inward and outward branches were joined.
    pub match_point: usize,
    /// Step size used for the integration.
    pub h: f64,
}

impl Solution {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }

    /// Radial positions of each point of the wavefunction.
    pub fn positions<G>(&self, grid: &G) -> nd::Array1<f64>
    where G: RadialGrid
    {
        (0..self.wf.len()).map(|k| grid.position(k, self.h)).collect()
    }

    /// Radial function *u*(*r*) = *r* *R*(*r*) at each point.
    pub fn radial<G>(&self, grid: &G) -> nd::Array1<f64>
    where G: RadialGrid
    {
        self.wf.iter().enumerate()
            .map(|(k, yk)| grid.to_radial(*yk, k))
            .collect()
    }

    /// Compute ∫ *u*² d*r* over the grid.
    pub fn norm<G>(&self, grid: &G) -> f64
    where G: RadialGrid
    {
        wf_norm_grid(&self.wf, grid, self.h)
    }

    /// Rescale the wavefunction so that ∫ *u*² d*r* = 1.
    pub fn normalize<G>(&mut self, grid: &G)
    where G: RadialGrid
    {
        wf_renormalize_grid(&mut self.wf, grid, self.h);
    }

    /// Like [`Self::normalize`], but create a copy of `self`.
    pub fn normalized<G>(&self, grid: &G) -> Self
    where G: RadialGrid
    {
        let mut new = self.clone();
        new.normalize(grid);
        new
    }

    /// Radial charge density `occupation` × *u*² contributed by this state.
    pub fn density<G>(&self, grid: &G, occupation: f64) -> nd::Array1<f64>
    where G: RadialGrid
    {
        self.radial(grid).mapv(|uk| occupation * uk * uk)
    }
}

/// Numerov solver over a particular grid.
///
/// Holds no state besides the grid, so repeated calls with the same arguments
/// give identical results and one solver can be shared across threads.
#[derive(Copy, Clone, Debug)]
pub struct Numerov<G> {
    grid: G,
}

impl<G> Numerov<G>
where G: RadialGrid
{
    /// Create a new `Numerov` solver over `grid`.
    pub fn new(grid: G) -> Self { Self { grid } }

    /// Get a reference to the grid.
    pub fn grid(&self) -> &G { &self.grid }

    /// Integrate inward from the outer boundary and count sign changes in the
    /// solution.
    ///
    /// Integration stops early, returning the count so far, when the solution
    /// overflows, when more than `node_limit` nodes have been counted, or when
    /// the effective potential rises back above `E` after the classically
    /// allowed region has been entered. Otherwise a final extrapolated point
    /// at the origin may add one more node.
    pub fn count_nodes(&self, span: Span, l: u32, E: f64, node_limit: usize)
        -> NResult<usize>
    {
        let st = Stepping::new(&self.grid, span, E)?;
        let mut rec = Recurrence::inward(&self.grid, &st, l, E);
        let mut sign = rec.y > 0.0;
        let mut nodes: usize = 0;
        let mut allowed = false;
        for idx in (1..=st.steps - 2).rev() {
            let position = rec.advance(&self.grid, &st, l, E, idx);
            if rec.y.is_infinite() {
                tracing::trace!(idx, nodes, "node count stopped on overflow");
                return Ok(nodes);
            }
            let new_sign = rec.y > 0.0;
            if new_sign != sign {
                nodes += 1;
                if nodes > node_limit {
                    tracing::trace!(idx, nodes, "node count passed its limit");
                    return Ok(nodes);
                }
                sign = new_sign;
            }
            if self.grid.effective_potential(l, position, idx) <= E {
                allowed = true;
            } else if allowed {
                tracing::trace!(idx, nodes, "node count stopped at inner turning point");
                return Ok(nodes);
            }
        }
        if (rec.extrapolate(&st) > 0.0) != sign { nodes += 1; }
        Ok(nodes)
    }

    /// Integrate inward from the outer boundary all the way down and return
    /// the solution extrapolated to the origin.
    ///
    /// This vanishes for eigenstates, so it can serve as the objective of a
    /// root-finder over `E`.
    pub fn solution_at_origin(&self, span: Span, l: u32, E: f64)
        -> NResult<f64>
    {
        let st = Stepping::new(&self.grid, span, E)?;
        let mut rec = Recurrence::inward(&self.grid, &st, l, E);
        for idx in (1..=st.steps - 2).rev() {
            rec.advance(&self.grid, &st, l, E, idx);
        }
        Ok(rec.extrapolate(&st))
    }

    /// Integrate inward from the outer boundary and outward from the origin,
    /// and join the two branches into a single wavefunction.
    ///
    /// The inward branch runs until its magnitude first decreases or exceeds
    /// [`MATCH_GROWTH_LIMIT`]; that index (but at least 2) becomes the match
    /// point. The outward branch runs up to the match point, and the inward
    /// branch is rescaled beyond it so that the two agree there. The returned
    /// wavefunction has `span.steps() + 1` points, zero past the (possibly
    /// capped) integration range and zero at the origin. It is not
    /// normalized.
    ///
    /// Returns [`NumerovError::SingularMatch`] if the inward branch is zero at
    /// the match point.
    pub fn matched_solution(&self, span: Span, l: u32, E: f64)
        -> NResult<Solution>
    {
        let st = Stepping::new(&self.grid, span, E)?;
        let steps = st.steps;
        let mut wf: nd::Array1<f64> = nd::Array1::zeros(span.steps() + 1);

        let mut inward = Recurrence::inward(&self.grid, &st, l, E);
        wf[steps] = inward.yprev;
        wf[steps - 1] = inward.y;
        let mut m: usize = 2;
        for idx in (1..=steps - 2).rev() {
            inward.advance(&self.grid, &st, l, E, idx);
            wf[idx] = inward.y;
            if inward.y.abs() < wf[idx + 1].abs()
                || inward.y.abs() > MATCH_GROWTH_LIMIT
            {
                m = idx;
                break;
            }
        }
        let m = cmp::max(m, 2);

        let mut outward = Recurrence::outward(&self.grid, &st, l, E);
        wf[0] = 0.0;
        wf[1] = outward.y;
        for idx in 2..m {
            outward.advance(&self.grid, &st, l, E, idx);
            wf[idx] = outward.y;
        }
        outward.advance(&self.grid, &st, l, E, m);

        let factor = outward.y / wf[m];
        if wf[m] == 0.0 || !factor.is_finite() {
            return Err(NumerovError::SingularMatch(m));
        }
        wf[m] = outward.y;
        wf.slice_mut(nd::s![m + 1..=steps]).map_inplace(|yk| { *yk *= factor; });
        tracing::debug!(match_point = m, steps, E, "joined inward and outward branches");
        Ok(Solution { e: E, wf, match_point: m, h: st.h })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::grid::{ ExponentialGrid, Potential, UniformGrid };

    const R_MAX: f64 = 50.0;
    const DELTA: f64 = 5e-4;
    const POINTS: usize = 20001;

    fn hydrogen() -> Potential {
        let r = ExponentialGrid::radii(R_MAX, DELTA, POINTS).unwrap();
        Potential::sample(&r, |rk| if rk > 0.0 { -1.0 / rk } else { 0.0 })
    }

    // uniform grid whose far-boundary start vanishes, so the inward branch is
    // zero everywhere
    struct ZeroTail<'a>(UniformGrid<'a>);

    impl<'a> RadialGrid for ZeroTail<'a> {
        fn potential_len(&self) -> usize { self.0.potential_len() }

        fn position(&self, idx: usize, h: f64) -> f64 { self.0.position(idx, h) }

        fn effective_potential(&self, l: u32, position: f64, idx: usize) -> f64 {
            self.0.effective_potential(l, position, idx)
        }

        fn coefficient(&self, l: u32, E: f64, position: f64, idx: usize) -> f64 {
            self.0.coefficient(l, E, position, idx)
        }

        fn boundary_far(&self, _position: f64, _E: f64) -> f64 { 0.0 }

        fn boundary_zero(&self, position: f64, l: u32) -> f64 {
            self.0.boundary_zero(position, l)
        }

        fn max_radius(&self, E: f64) -> f64 { self.0.max_radius(E) }

        fn max_radius_index(&self, E: f64) -> usize { self.0.max_radius_index(E) }

        fn derivative_step(&self, idx: usize, h: f64) -> f64 {
            self.0.derivative_step(idx, h)
        }

        fn to_radial(&self, y: f64, idx: usize) -> f64 { self.0.to_radial(y, idx) }
    }

    #[test]
    fn span_kind() {
        let unit = Span::UnitStep { steps: 10 };
        let range = Span::Range { extent: 5.0, steps: 20 };
        assert!(unit.is_unit_step() && !unit.is_range());
        assert!(range.is_range() && !range.is_unit_step());
        assert_eq!((unit.steps(), range.steps()), (10, 20));
    }

    #[test]
    fn unit_step_caps_at_cutoff() {
        let V = hydrogen();
        let grid = ExponentialGrid::new(&V, R_MAX, DELTA, POINTS).unwrap();
        let st = Stepping::new(&grid, Span::UnitStep { steps: POINTS - 1 }, -0.5)
            .unwrap();
        assert_eq!(st.steps, grid.max_radius_index(-0.5));
        assert_eq!(st.start, st.steps as f64);
        assert_eq!(st.h, 1.0);
        assert_relative_eq!(st.h2_12, 1.0 / 12.0);

        // shallow enough that the cutoff lies past the end of the grid
        let st = Stepping::new(&grid, Span::UnitStep { steps: POINTS - 1 }, -0.01)
            .unwrap();
        assert_eq!(st.steps, POINTS - 1);
    }

    #[test]
    fn range_recomputes_step() {
        let V = Potential::from_array(nd::Array1::zeros(1025));
        let grid = UniformGrid::new(&V);
        // sqrt(2|E|) = 323 / 32, so the cutoff radius is 32 bohr, inside the
        // 128-bohr extent
        let E = -(323.0_f64 / 32.0).powi(2) / 2.0;
        let st = Stepping::new(&grid, Span::Range { extent: 128.0, steps: 1024 }, E)
            .unwrap();
        assert_eq!(st.start, 32.0);
        assert_eq!(st.steps, 256);
        assert_eq!(st.h, 0.125);
        assert_eq!(st.h2_12, 0.125 * 0.125 / 12.0);

        // no cap
        let st = Stepping::new(&grid, Span::Range { extent: 8.0, steps: 64 }, E)
            .unwrap();
        assert_eq!((st.start, st.steps, st.h), (8.0, 64, 0.125));
    }

    #[test]
    fn bad_inputs() {
        let V = hydrogen();
        let grid = ExponentialGrid::new(&V, R_MAX, DELTA, POINTS).unwrap();
        let solver = Numerov::new(grid);
        assert!(matches!(
            solver.count_nodes(Span::UnitStep { steps: 2 }, 0, -0.5, 10),
            Err(NumerovError::TooFewSteps(2)),
        ));
        assert!(matches!(
            solver.solution_at_origin(Span::UnitStep { steps: 100 }, 0, f64::NAN),
            Err(NumerovError::BadEnergy(_)),
        ));
        assert!(matches!(
            solver.matched_solution(Span::Range { extent: -1.0, steps: 100 }, 0, -0.5),
            Err(NumerovError::BadExtent(_)),
        ));

        let short = Potential::from_array(nd::Array1::zeros(50));
        let solver = Numerov::new(UniformGrid::new(&short));
        assert!(matches!(
            solver.count_nodes(Span::UnitStep { steps: 100 }, 0, -0.5, 10),
            Err(NumerovError::PotentialTooShort { needed: 101, len: 50 }),
        ));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let V = hydrogen();
        let solver = Numerov::new(ExponentialGrid::new(&V, R_MAX, DELTA, POINTS).unwrap());
        let span = Span::UnitStep { steps: POINTS - 1 };
        for E in [-0.55, -0.3, -0.1] {
            assert_eq!(
                solver.count_nodes(span, 0, E, 10).unwrap(),
                solver.count_nodes(span, 0, E, 10).unwrap(),
            );
            assert_eq!(
                solver.solution_at_origin(span, 1, E).unwrap().to_bits(),
                solver.solution_at_origin(span, 1, E).unwrap().to_bits(),
            );
            let a = solver.matched_solution(span, 0, E).unwrap();
            let b = solver.matched_solution(span, 0, E).unwrap();
            assert_eq!(a.match_point, b.match_point);
            assert!(a.wf.iter().zip(&b.wf).all(|(x, y)| x.to_bits() == y.to_bits()));
        }
    }

    #[test]
    fn node_limit_stops_early() {
        let V = hydrogen();
        let solver = Numerov::new(ExponentialGrid::new(&V, R_MAX, DELTA, POINTS).unwrap());
        let span = Span::UnitStep { steps: POINTS - 1 };
        // between 3s and 4s: three nodes, but stop after the first one past
        // the limit
        assert_eq!(solver.count_nodes(span, 0, -0.045, 10).unwrap(), 3);
        assert_eq!(solver.count_nodes(span, 0, -0.045, 0).unwrap(), 1);
        assert_eq!(solver.count_nodes(span, 0, -0.045, 1).unwrap(), 2);
    }

    #[test]
    fn matched_shape() {
        let V = hydrogen();
        let solver = Numerov::new(ExponentialGrid::new(&V, R_MAX, DELTA, POINTS).unwrap());
        let span = Span::UnitStep { steps: POINTS - 1 };
        let sol = solver.matched_solution(span, 0, -0.5).unwrap();
        let cutoff = solver.grid().max_radius_index(-0.5);
        assert_eq!(sol.wf.len(), POINTS);
        assert_eq!(sol.wf[0], 0.0);
        assert!(sol.match_point >= 2 && sol.match_point < cutoff);
        assert!(sol.wf.iter().skip(cutoff + 1).all(|yk| *yk == 0.0));
        assert!(sol.wf.iter().take(cutoff + 1).skip(1).all(|yk| *yk != 0.0));
    }

    #[test]
    fn matched_stops_on_runaway_growth() {
        // flat barrier above E: the inward branch grows monotonically until it
        // passes the growth limit
        let V = Potential::from_array(nd::Array1::from_elem(400, 1.0));
        let grid = UniformGrid::new(&V);
        let solver = Numerov::new(grid);
        let span = Span::UnitStep { steps: 323 };
        let E = -0.5;

        let st = Stepping::new(&grid, span, E).unwrap();
        assert_eq!(st.steps, 323);
        let mut rec = Recurrence::inward(&grid, &st, 0, E);
        let mut expected = None;
        for idx in (1..=st.steps - 2).rev() {
            let yprev = rec.y;
            rec.advance(&grid, &st, 0, E, idx);
            assert!(rec.y.abs() > yprev.abs());
            if rec.y.abs() > MATCH_GROWTH_LIMIT {
                expected = Some(idx);
                break;
            }
        }
        let expected = expected.unwrap();

        let sol = solver.matched_solution(span, 0, E).unwrap();
        assert_eq!(sol.match_point, expected);
        assert!(sol.match_point > 2);
        assert!(sol.wf.iter().all(|yk| yk.is_finite()));
        assert_eq!(sol.wf[0], 0.0);
        assert!(sol.wf.iter().skip(1).all(|yk| *yk > 0.0));
    }

    #[test]
    fn matched_zero_inward_branch() {
        let V = Potential::from_array(nd::Array1::from_elem(400, 10.0));
        let solver = Numerov::new(ZeroTail(UniformGrid::new(&V)));
        let span = Span::UnitStep { steps: 323 };
        assert!(matches!(
            solver.matched_solution(span, 0, -0.5),
            Err(NumerovError::SingularMatch(2)),
        ));
        // the other operations carry on with the zero solution
        assert_eq!(solver.solution_at_origin(span, 0, -0.5).unwrap(), 0.0);
    }
}
