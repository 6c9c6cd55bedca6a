//! Newton's method for systems of equations.

use nalgebra::{DMatrix, DVector};

use super::{MultiRootFinder, MultiRootResult, SolverConfig};
use crate::error::MathError;
use crate::linear_algebra::{max_norm, solve_linear_system};

/// Maximum number of step halvings per iteration.
const MAX_BACKTRACKS: u32 = 20;

/// Newton root finder using the exact Jacobian.
///
/// Each iteration solves `J(x) dx = -f(x)`. If the full step does not reduce
/// the residual max-norm, the step is halved up to [`MAX_BACKTRACKS`] times;
/// the last trial point is accepted when no halving helps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonVectorRootFinder {
    config: SolverConfig,
}

impl NewtonVectorRootFinder {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

fn ensure_finite<E: From<MathError>>(v: &DVector<f64>, operation: &str) -> Result<(), E> {
    if v.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(MathError::non_finite(operation).into())
    }
}

impl MultiRootFinder for NewtonVectorRootFinder {
    fn find_root<F, J, E>(
        &self,
        f: F,
        jacobian: J,
        initial_guess: DVector<f64>,
    ) -> Result<MultiRootResult, E>
    where
        F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
        J: Fn(&DVector<f64>) -> Result<DMatrix<f64>, E>,
        E: From<MathError>,
    {
        let config = &self.config;
        let mut x = initial_guess;
        let mut fx = f(&x)?;
        ensure_finite::<E>(&fx, "initial residual")?;
        let mut residual = max_norm(&fx);

        for iteration in 0..config.max_iterations {
            if residual < config.absolute_tolerance {
                log::debug!("newton converged in {iteration} iterations, residual {residual:.3e}");
                return Ok(MultiRootResult {
                    root: x,
                    iterations: iteration,
                    residual,
                });
            }

            let jac = jacobian(&x)?;
            let delta = solve_linear_system(&jac, &(-&fx))?;

            let mut lambda = 1.0;
            let mut trial_x = &x + &delta;
            let mut trial_f = f(&trial_x)?;
            let mut backtracks = 0;
            while backtracks < MAX_BACKTRACKS
                && !(trial_f.iter().all(|v| v.is_finite()) && max_norm(&trial_f) < residual)
            {
                lambda *= 0.5;
                trial_x = &x + &delta * lambda;
                trial_f = f(&trial_x)?;
                backtracks += 1;
            }
            ensure_finite::<E>(&trial_f, "residual after newton step")?;

            let step = lambda * max_norm(&delta);
            x = trial_x;
            fx = trial_f;
            residual = max_norm(&fx);
            log::trace!(
                "newton iteration {}: residual {:.3e}, step {:.3e}, backtracks {}",
                iteration + 1,
                residual,
                step,
                backtracks
            );

            if step < config.relative_tolerance * (1.0 + max_norm(&x))
                && residual < config.absolute_tolerance.sqrt()
            {
                return Ok(MultiRootResult {
                    root: x,
                    iterations: iteration + 1,
                    residual,
                });
            }
        }

        if residual < config.absolute_tolerance {
            return Ok(MultiRootResult {
                root: x,
                iterations: config.max_iterations,
                residual,
            });
        }
        Err(MathError::convergence_failed(config.max_iterations, residual).into())
    }

    fn name(&self) -> &'static str {
        "Newton"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    type R<T> = Result<T, MathError>;

    #[test]
    fn test_linear_system_one_step() {
        let a = DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 2.0]);
        let b = DVector::from_vec(vec![9.0, 8.0]);
        let f = |x: &DVector<f64>| -> R<DVector<f64>> { Ok(&a * x - &b) };
        let j = |_: &DVector<f64>| -> R<DMatrix<f64>> { Ok(a.clone()) };

        let solver = NewtonVectorRootFinder::default();
        let result = solver.find_root(f, j, DVector::zeros(2)).unwrap();
        assert_relative_eq!(result.root[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.root[1], 3.0, epsilon = 1e-12);
        assert!(result.iterations <= 2);
    }

    #[test]
    fn test_exponential_system() {
        // discount-factor style equations: exp(-x_i * t_i) = p_i
        let t = [0.25, 1.0];
        let p = [0.995, 0.98];
        let f = |x: &DVector<f64>| -> R<DVector<f64>> {
            Ok(DVector::from_iterator(2, (0..2).map(|i| (-x[i] * t[i]).exp() - p[i])))
        };
        let j = |x: &DVector<f64>| -> R<DMatrix<f64>> {
            Ok(DMatrix::from_fn(2, 2, |r, c| {
                if r == c {
                    -t[r] * (-x[r] * t[r]).exp()
                } else {
                    0.0
                }
            }))
        };
        let result = NewtonVectorRootFinder::default()
            .find_root(f, j, DVector::from_vec(vec![0.0, 0.0]))
            .unwrap();
        assert_relative_eq!(result.root[0], -p[0].ln() / t[0], epsilon = 1e-10);
        assert_relative_eq!(result.root[1], -p[1].ln() / t[1], epsilon = 1e-10);
        assert!(result.residual < 1e-12);
    }

    #[test]
    fn test_singular_jacobian() {
        let f = |x: &DVector<f64>| -> R<DVector<f64>> { Ok(DVector::from_vec(vec![x[0] + x[1] - 1.0, x[0] + x[1] - 2.0])) };
        let j = |_: &DVector<f64>| -> R<DMatrix<f64>> { Ok(DMatrix::from_element(2, 2, 1.0)) };
        let err = NewtonVectorRootFinder::default()
            .find_root(f, j, DVector::zeros(2))
            .unwrap_err();
        assert_eq!(err, MathError::SingularMatrix);
    }

    #[test]
    fn test_no_root_fails_to_converge() {
        // exp(x) = 0 has no root; each newton step moves x by -1
        let f = |x: &DVector<f64>| -> R<DVector<f64>> { Ok(x.map(f64::exp)) };
        let j = |x: &DVector<f64>| -> R<DMatrix<f64>> { Ok(DMatrix::from_element(1, 1, x[0].exp())) };
        let solver = NewtonVectorRootFinder::new(SolverConfig::default().with_max_iterations(10));
        let err = solver.find_root(f, j, DVector::from_vec(vec![0.5])).unwrap_err();
        assert!(matches!(err, MathError::ConvergenceFailed { iterations: 10, .. }));
    }

    #[test]
    fn test_caller_error_propagates() {
        let f = |_: &DVector<f64>| -> R<DVector<f64>> { Err(MathError::invalid_input("missing curve")) };
        let j = |_: &DVector<f64>| -> R<DMatrix<f64>> { Ok(DMatrix::identity(1, 1)) };
        let err = NewtonVectorRootFinder::default()
            .find_root(f, j, DVector::zeros(1))
            .unwrap_err();
        assert_eq!(err, MathError::invalid_input("missing curve"));
    }
}
