//! Quadrature and normalization over radial grids.

use ndarray as nd;
use crate::{ Arr1, grid::RadialGrid };

/// Integrate using the trapezoidal rule over a (possibly non-uniform) radial
/// grid, where `h` is the step the samples were computed with.
///
/// The spacing between points *k* − 1 and *k* is taken to be
/// [`RadialGrid::derivative_step`] at *k*.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz_grid<S, G>(y: &Arr1<S>, grid: &G, h: f64) -> f64
where
    S: nd::Data<Elem = f64>,
    G: RadialGrid,
{
    assert!(y.len() >= 2, "trapz_grid: need at least 2 samples");
    y.iter().zip(y.iter().skip(1)).enumerate()
        .map(|(k, (ykm1, yk))| 0.5 * (ykm1 + yk) * grid.derivative_step(k + 1, h))
        .sum()
}

/// Calculate ∫ *u*² d*r* for a wavefunction in the grid's integration
/// variable.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm_grid<S, G>(q: &Arr1<S>, grid: &G, h: f64) -> f64
where
    S: nd::Data<Elem = f64>,
    G: RadialGrid,
{
    let u2: nd::Array1<f64>
        = q.iter().enumerate()
        .map(|(k, qk)| grid.to_radial(*qk, k).powi(2))
        .collect();
    trapz_grid(&u2, grid, h)
}

/// Renormalize a wavefunction in place. Wavefunctions with zero norm are left
/// untouched.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_renormalize_grid<S, G>(q: &mut Arr1<S>, grid: &G, h: f64)
where
    S: nd::DataMut<Elem = f64>,
    G: RadialGrid,
{
    let norm = wf_norm_grid(q, grid, h).sqrt();
    if norm > 0.0 && norm.is_finite() {
        q.map_inplace(|qk| { *qk /= norm; });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::grid::{ ExponentialGrid, Potential, UniformGrid };

    #[test]
    fn uniform_trapz() {
        let V = Potential::from_array(nd::Array1::zeros(101));
        let grid = UniformGrid::new(&V);
        let h = 0.01;
        let y: nd::Array1<f64> = (0..101).map(|k| (k as f64 * h).powi(2)).collect();
        // exact up to the trapezoid error h²/6
        assert_relative_eq!(trapz_grid(&y, &grid, h), 1.0 / 3.0 + h * h / 6.0, max_relative = 1e-10);
    }

    #[test]
    fn exponential_norm() {
        // u = 2 r exp(-r), the normalized hydrogen 1s state
        let (r_max, delta, n) = (40.0, 1e-3, 12001);
        let r = ExponentialGrid::radii(r_max, delta, n).unwrap();
        let V = Potential::sample(&r, |_| 0.0);
        let grid = ExponentialGrid::new(&V, r_max, delta, n).unwrap();
        let mut q: nd::Array1<f64>
            = r.iter().enumerate()
            .map(|(k, rk)| 2.0 * rk * (-rk).exp() * (-(k as f64) * delta / 2.0).exp())
            .collect();
        assert_relative_eq!(wf_norm_grid(&q, &grid, 1.0), 1.0, max_relative = 1e-4);
        q *= 3.0;
        wf_renormalize_grid(&mut q, &grid, 1.0);
        assert_relative_eq!(wf_norm_grid(&q, &grid, 1.0), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn zero_norm_untouched() {
        let V = Potential::from_array(nd::Array1::zeros(10));
        let grid = UniformGrid::new(&V);
        let mut q: nd::Array1<f64> = nd::Array1::zeros(10);
        wf_renormalize_grid(&mut q, &grid, 0.1);
        assert!(q.iter().all(|qk| *qk == 0.0));
    }
}
