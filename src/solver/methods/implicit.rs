//! Backward Euler on the companion system
//!
//! # Mathematical Background
//!
//! One backward Euler step evaluates the derivative at the end of the step:
//!
//! ```text
//! y_{i+1}[j]   = y_i[j] + dt * y_{i+1}[j+1]                 for j < n-1
//! y_{i+1}[n-1] = y_i[n-1] + dt * rhs(t_{i+1}, y_{i+1})
//! ```
//!
//! The new state is the root of a nonlinear system, found by the bounded
//! [`NewtonSolver`] with a Jacobian from forward-mode automatic
//! differentiation. `t_{i+1}` is computed from the grid index, not
//! accumulated.
//!
//! # Divergence
//!
//! When Newton diverges at some step, every sample from that step onward is
//! `NaN` and the run ends. Earlier samples are kept. The returned
//! [`StepReport`] names the step and the reason.

use crate::error::SolverResult;
use crate::rhs::DifferentiableRhs;
use crate::solver::{
    Divergence, DivergenceReport, Domain, Method, NewtonOptions, NewtonSolver, SolutionBuffer,
    Solver, StepReport,
};

// =================================================================================================
// Backward Euler Solver
// =================================================================================================

/// Backward Euler stepper for differentiable RHS functions
///
/// # Example
///
/// ```rust
/// use num_dual::DualNum;
/// use orange_drum::rhs::DifferentiableRhs;
/// use orange_drum::solver::EulerImplicit;
///
/// // y' = -y, y(0) = 1
/// struct Decay;
///
/// impl DifferentiableRhs for Decay {
///     fn eval<D: DualNum<f64> + Copy>(&self, _t: D, y: &[D]) -> D {
///         -y[0]
///     }
/// }
///
/// let mut solver = EulerImplicit::new();
/// solver.set_step(0.25)?;
/// let result = solver.solve(&Decay, &[1.0])?;
///
/// assert_eq!(result.len(), 5);
/// assert!((result[1] - 0.8).abs() < 1e-12);
/// # Ok::<(), orange_drum::SolverError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitEuler {
    newton: NewtonSolver,
}

impl ImplicitEuler {
    /// Create a Backward Euler stepper with default Newton options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Backward Euler stepper with validated Newton options
    pub fn with_options(options: NewtonOptions) -> SolverResult<Self> {
        options.validate()?;
        Ok(Self {
            newton: NewtonSolver::new(options),
        })
    }

    /// Newton options used for every step
    pub fn options(&self) -> &NewtonOptions {
        self.newton.options()
    }

    /// Replace the Newton options; nothing changes when they are invalid
    pub fn set_options(&mut self, options: NewtonOptions) -> SolverResult<()> {
        options.validate()?;
        self.newton = NewtonSolver::new(options);
        Ok(())
    }

    /// Change only the convergence threshold
    pub fn set_threshold(&mut self, threshold: f64) -> SolverResult<()> {
        self.set_options(self.options().with_threshold(threshold))
    }

    fn diverge(
        &self,
        report: &mut StepReport,
        step: usize,
        time: f64,
        reason: Divergence,
        solution: &mut SolutionBuffer,
    ) {
        log::warn!(
            "{} diverged at step {} (t={}): {}; remaining samples set to NaN",
            self.name(),
            step,
            time,
            reason
        );
        solution.fill_remaining_nan();
        report.divergence = Some(DivergenceReport { step, time, reason });
    }
}

impl Method for ImplicitEuler {
    fn name(&self) -> &'static str {
        "Backward Euler"
    }
}

impl<R: DifferentiableRhs> Solver<R> for ImplicitEuler {
    fn integrate(
        &self,
        domain: &Domain,
        rhs: &R,
        y0: &[f64],
        solution: &mut SolutionBuffer,
    ) -> StepReport {
        let mut report = StepReport::new(self.name(), domain.low());

        // ====== Step 1: Setup ======

        if y0.is_empty() {
            return report;
        }
        let dt = domain.step();
        let mut state = y0.to_vec();

        solution.push(state[0]);

        // ====== Step 2: Time Integration ======

        for step in 0..domain.step_count() {
            let t = domain.time_at(step + 1);

            match self.newton.solve(rhs, &state, t, dt) {
                Ok(newton) => {
                    report.newton_iterations += newton.iterations;
                    if !newton.converged {
                        report.unconverged_steps += 1;
                    }
                    state = newton.state;
                }
                Err(reason) => {
                    self.diverge(&mut report, step, t, reason, solution);
                    return report;
                }
            }

            // A "converged" iterate can still blow up on a finite correction
            if let Some(index) = state.iter().position(|v| !v.is_finite()) {
                let reason = Divergence::NonFiniteCorrection { index };
                self.diverge(&mut report, step, t, reason, solution);
                return report;
            }

            solution.push(state[0]);
            report.steps = step + 1;
            report.final_time = t;
        }

        report
    }
}

// =================================================================================================
// Tests
// =================================================================================================
