#![allow(non_snake_case)]

use xatom::{
    grid::{ ExponentialGrid, Potential, RadialGrid },
    shell,
    solve::{ NResult, Numerov, Span },
};

// find hydrogen levels the way a self-consistent driver would: bracket a level
// using node counts, then bisect on the origin value inside the bracket

const R_MAX: f64 = 60.0;
const DELTA: f64 = 5e-4;
const POINTS: usize = 24001;
const E_MIN: f64 = -1.0;
const E_MAX: f64 = -1e-3;

// lowest energy at which more than `k` nodes are counted
fn transition<G>(solver: &Numerov<G>, span: Span, l: u32, k: usize)
    -> NResult<f64>
where G: RadialGrid
{
    let (mut lo, mut hi) = (E_MIN, E_MAX);
    while hi - lo > 1e-6 {
        let mid = (lo + hi) / 2.0;
        if solver.count_nodes(span, l, mid, k)? <= k { lo = mid; } else { hi = mid; }
    }
    Ok(hi)
}

fn main() -> anyhow::Result<()> {
    let r = ExponentialGrid::radii(R_MAX, DELTA, POINTS)?;
    let V = Potential::sample(&r, |rk| if rk > 0.0 { -1.0 / rk } else { 0.0 });
    let grid = ExponentialGrid::new(&V, R_MAX, DELTA, POINTS)?;
    let solver = Numerov::new(grid);
    let span = Span::UnitStep { steps: POINTS - 1 };

    // solve for the subshells neon would occupy
    for sub in shell::try_subshells(10)? {
        let l = sub.l;
        let k = (sub.n - sub.l) as usize;
        let mut a
            = if k == 0 { E_MIN } else { transition(&solver, span, l, k - 1)? + 1e-4 };
        let mut b = transition(&solver, span, l, k)? + 1e-4;

        let fa = solver.solution_at_origin(span, l, a)?;
        for _ in 0..60 {
            let mid = (a + b) / 2.0;
            let fm = solver.solution_at_origin(span, l, mid)?;
            if (fm > 0.0) == (fa > 0.0) { a = mid; } else { b = mid; }
        }
        let E = (a + b) / 2.0;

        let sol = solver.matched_solution(span, l, E)?.normalized(&grid);
        let expected = -0.5 / ((sub.n + 1) * (sub.n + 1)) as f64;
        println!(
            "{}: E = {:.6} (expected {:.6}), norm = {:.6}, match at r = {:.3}",
            sub,
            E,
            expected,
            sol.norm(&grid),
            r[sol.match_point],
        );
    }
    Ok(())
}
