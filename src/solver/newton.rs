//! Bounded Newton–Raphson iteration for one implicit Euler step
//!
//! # Mathematical Background
//!
//! Given the state `x0` at the start of a step of size `dt` and the time `t`
//! at its end, the implicit Euler update of the companion system is the root
//! `x` of
//!
//! ```text
//! F_j(x)     = x0[j]   + dt * x[j+1]    - x[j]       j < n-1
//! F_{n-1}(x) = x0[n-1] + dt * rhs(t, x) - x[n-1]
//! ```
//!
//! Its Jacobian is constant except for the last row:
//!
//! ```text
//!     ┌ -1  dt   0  …   0 ┐
//! J = │  0  -1  dt  …   0 │
//!     │  …               … │
//!     └ dt·∂rhs/∂x[k] - δ(k, n-1) ┘
//! ```
//!
//! Each iteration solves `J · delta = F` with a full-pivoting LU
//! decomposition and applies `x ← x - delta`. The iteration stops as soon as
//! every `|delta[k]|` drops below the threshold (the last correction is still
//! applied).
//!
//! # Divergence
//!
//! The step is abandoned with a [`Divergence`] when the LU reports a singular
//! Jacobian, when `J · delta` does not reproduce `F`, or when a correction is
//! not finite. Running out of iterations is only a divergence in
//! [strict](NewtonOptions::strict) mode; otherwise the last iterate is used.

use crate::error::{SolverError, SolverResult};
use crate::rhs::{gradient_into, DifferentiableRhs};
use nalgebra::{DMatrix, DVector};

/// Default iteration budget per step
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Default convergence threshold on every correction component
pub const DEFAULT_THRESHOLD: f64 = 1e-4;

/// Default relative tolerance of the `J · delta = F` consistency check
pub const DEFAULT_CONSISTENCY_TOLERANCE: f64 = 1e-8;

// =================================================================================================
// Options
// =================================================================================================

/// Newton iteration parameters
///
/// # Example
///
/// ```rust
/// use orange_drum::solver::NewtonOptions;
///
/// let options = NewtonOptions::default()
///     .with_threshold(1e-8)
///     .with_max_iterations(20)
///     .strict(true);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
    /// Iteration budget per step
    pub max_iterations: usize,

    /// Converged when every `|delta[k]|` is below this value
    pub threshold: f64,

    /// Accepted `‖J·delta - F‖∞` relative to `max(1, ‖F‖∞)`
    pub consistency_tolerance: f64,

    /// Treat an exhausted iteration budget as a divergence
    pub strict: bool,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            consistency_tolerance: DEFAULT_CONSISTENCY_TOLERANCE,
            strict: false,
        }
    }
}

impl NewtonOptions {
    /// Builder pattern: set the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder pattern: set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder pattern: set the consistency tolerance
    pub fn with_consistency_tolerance(mut self, tolerance: f64) -> Self {
        self.consistency_tolerance = tolerance;
        self
    }

    /// Builder pattern: choose whether an exhausted budget is a divergence
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate that parameters are usable
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::invalid("Newton max_iterations must be positive"));
        }
        if !(self.threshold > 0.0) || !self.threshold.is_finite() {
            return Err(SolverError::invalid(format!(
                "Newton threshold must be positive and finite (got {})",
                self.threshold
            )));
        }
        if !(self.consistency_tolerance > 0.0) || !self.consistency_tolerance.is_finite() {
            return Err(SolverError::invalid(format!(
                "Newton consistency tolerance must be positive and finite (got {})",
                self.consistency_tolerance
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Outcome types
// =================================================================================================

/// Reason a Newton step was abandoned
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Divergence {
    /// The LU decomposition found a zero pivot
    #[error("Jacobian is singular")]
    SingularJacobian,

    /// `J · delta` does not reproduce the residual
    #[error("linear solve is inconsistent (residual {residual:e})")]
    InconsistentSolve { residual: f64 },

    /// A correction component is NaN or infinite
    #[error("Newton correction component {index} is not finite")]
    NonFiniteCorrection { index: usize },

    /// Budget exhausted in strict mode
    #[error("Newton iteration did not converge within {iterations} iterations")]
    MaxIterations { iterations: usize },
}

/// Result of a successful Newton step
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonStep {
    /// State at the end of the step
    pub state: Vec<f64>,

    /// Iterations performed
    pub iterations: usize,

    /// `false` when the budget ran out before the threshold was met
    pub converged: bool,
}

// =================================================================================================
// Dense linear solve
// =================================================================================================

/// Solve `matrix · x = rhs` with a full-pivoting LU decomposition
///
/// The solution is rejected when the decomposition is not invertible, when a
/// component is not finite, or when it fails [`check_consistency`].
pub fn solve_dense(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    tolerance: f64,
) -> Result<DVector<f64>, Divergence> {
    let lu = matrix.clone().full_piv_lu();
    if !lu.is_invertible() {
        return Err(Divergence::SingularJacobian);
    }

    let solution = lu.solve(rhs).ok_or(Divergence::SingularJacobian)?;

    if let Some(index) = solution.iter().position(|v| !v.is_finite()) {
        return Err(Divergence::NonFiniteCorrection { index });
    }

    check_consistency(matrix, &solution, rhs, tolerance)?;
    Ok(solution)
}

/// Verify `‖matrix · solution - rhs‖∞ ≤ tolerance · max(1, ‖rhs‖∞)`
pub fn check_consistency(
    matrix: &DMatrix<f64>,
    solution: &DVector<f64>,
    rhs: &DVector<f64>,
    tolerance: f64,
) -> Result<(), Divergence> {
    let residual = (matrix * solution - rhs).amax();
    let scale = rhs.amax().max(1.0);

    // Negated so that a NaN residual is rejected
    if !(residual <= tolerance * scale) {
        return Err(Divergence::InconsistentSolve { residual });
    }
    Ok(())
}

// =================================================================================================
// Newton solver
// =================================================================================================

/// Newton–Raphson root finder for the implicit Euler relations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NewtonSolver {
    options: NewtonOptions,
}

impl NewtonSolver {
    /// Create a solver with the given options
    pub fn new(options: NewtonOptions) -> Self {
        Self { options }
    }

    /// Current options
    pub fn options(&self) -> &NewtonOptions {
        &self.options
    }

    /// Find the state at time `t`, one step `dt` after the state `x0`
    pub fn solve<R: DifferentiableRhs>(
        &self,
        rhs: &R,
        x0: &[f64],
        t: f64,
        dt: f64,
    ) -> Result<NewtonStep, Divergence> {
        let n = x0.len();
        let Some(last) = n.checked_sub(1) else {
            return Ok(NewtonStep {
                state: Vec::new(),
                iterations: 0,
                converged: true,
            });
        };

        let mut x = x0.to_vec();
        let mut residual = DVector::<f64>::zeros(n);
        let mut partials = vec![0.0; n];

        // Rows 0..n-1 never change within a step
        let mut jacobian = DMatrix::<f64>::zeros(n, n);
        for j in 0..last {
            jacobian[(j, j)] = -1.0;
            jacobian[(j, j + 1)] = dt;
        }

        for iteration in 0..self.options.max_iterations {
            let value = gradient_into(rhs, t, &x, &mut partials);

            for j in 0..last {
                residual[j] = x0[j] + dt * x[j + 1] - x[j];
            }
            residual[last] = x0[last] + dt * value - x[last];

            for (k, partial) in partials.iter().enumerate() {
                jacobian[(last, k)] = dt * partial;
            }
            jacobian[(last, last)] -= 1.0;

            let delta = solve_dense(&jacobian, &residual, self.options.consistency_tolerance)?;
            let converged = delta.iter().all(|d| d.abs() < self.options.threshold);

            for (xk, dk) in x.iter_mut().zip(delta.iter()) {
                *xk -= dk;
            }

            log::trace!(
                "Newton t={} iteration {}: |delta|max={:e}",
                t,
                iteration + 1,
                delta.amax()
            );

            if converged {
                return Ok(NewtonStep {
                    state: x,
                    iterations: iteration + 1,
                    converged: true,
                });
            }
        }

        let iterations = self.options.max_iterations;
        if self.options.strict {
            return Err(Divergence::MaxIterations { iterations });
        }

        log::warn!(
            "Newton iteration at t={} did not reach threshold {:e} within {} iterations; keeping last iterate",
            t,
            self.options.threshold,
            iterations
        );
        Ok(NewtonStep {
            state: x,
            iterations,
            converged: false,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
