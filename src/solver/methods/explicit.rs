//! Forward Euler on the companion system
//!
//! # Mathematical Background
//!
//! An order-`n` ODE `f⁽ⁿ⁾ = rhs(t, y)` is rewritten as a first-order system on
//! the state `y = [f, f', …, f⁽ⁿ⁻¹⁾]`. One forward Euler step reads
//!
//! ```text
//! y_{i+1}[j]   = y_i[j] + dt * y_i[j+1]        for j < n-1
//! y_{i+1}[n-1] = y_i[n-1] + dt * rhs(t_i, y_i)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: first-order accurate, global error O(dt)
//! - **Stability**: conditional, needs a small step on stiff problems
//! - **Cost**: one RHS evaluation per step, no linear algebra
//!
//! Use [`ImplicitEuler`](super::ImplicitEuler) when the step cannot be made
//! small enough for stability.

use crate::rhs::Rhs;
use crate::solver::{Domain, Method, SolutionBuffer, Solver, StepReport};

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler stepper for plain RHS functions
///
/// # Example
///
/// ```rust
/// use orange_drum::solver::{EulerExplicit, ExplicitEuler, Method};
///
/// assert_eq!(ExplicitEuler::new().name(), "Forward Euler");
///
/// // y' = 1, y(0) = 0
/// let mut solver = EulerExplicit::new();
/// let result = solver.solve(&|_t: f64, _y: &[f64]| 1.0, &[0.0])?;
/// assert!((result[100] - 1.0).abs() < 1e-12);
/// # Ok::<(), orange_drum::SolverError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl ExplicitEuler {
    /// Create a new Forward Euler stepper
    pub fn new() -> Self {
        Self
    }
}

impl Method for ExplicitEuler {
    fn name(&self) -> &'static str {
        "Forward Euler"
    }
}

impl<R: Rhs + ?Sized> Solver<R> for ExplicitEuler {
    fn integrate(
        &self,
        domain: &Domain,
        rhs: &R,
        y0: &[f64],
        solution: &mut SolutionBuffer,
    ) -> StepReport {
        let mut report = StepReport::new(self.name(), domain.low());

        // ====== Step 1: Setup ======

        let Some(last) = y0.len().checked_sub(1) else {
            return report;
        };
        let dt = domain.step();
        let steps = domain.step_count();

        let mut state = y0.to_vec();
        let mut next = vec![0.0; y0.len()];
        let mut t = domain.low();

        solution.push(state[0]);

        // ====== Step 2: Time Integration ======

        for _ in 0..steps {
            for j in 0..last {
                next[j] = state[j] + dt * state[j + 1];
            }
            next[last] = state[last] + dt * rhs.value(t, &state);

            std::mem::swap(&mut state, &mut next);
            solution.push(state[0]);

            // Accumulated, so the coarse-grid check sees where the loop ended
            t += dt;
        }

        // ====== Step 3: Diagnostics ======

        if t < domain.high() - dt {
            log::warn!(
                "Forward Euler stopped at t={} short of {} by more than one step (dt={})",
                t,
                domain.high(),
                dt
            );
        }

        report.steps = steps;
        report.final_time = t;
        report
    }
}

// =================================================================================================
// Tests
// =================================================================================================
