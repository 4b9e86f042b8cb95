//! Time integrators for order-n ODEs
//!
//! An ODE of order `n`, solved for its highest derivative
//!
//! ```text
//! f⁽ⁿ⁾(t) = rhs(t, f, f', …, f⁽ⁿ⁻¹⁾)
//! ```
//!
//! is integrated on a uniform grid over `[low, high]` through its companion
//! first-order system on the state `y = [f, f', …, f⁽ⁿ⁻¹⁾]`. Only the first
//! component `f` is recorded at each grid point.
//!
//! # Core Concepts
//!
//! 1. **Domain** ([`Domain`]) - WHERE to solve
//!    - Limits `low < high`, step `0 < dt ≤ (high - low) / 2`
//!    - `step_count = floor((high - low) / dt)` steps, `step_count + 1` samples
//!
//! 2. **Method** ([`Solver`]) - HOW to step
//!    - [`ExplicitEuler`]: plain RHS, one evaluation per step
//!    - [`ImplicitEuler`]: differentiable RHS, one bounded Newton solve per step
//!
//! 3. **Integrator** ([`Integrator`]) - the owner
//!    - Holds domain, pre-sized [`SolutionBuffer`] and method
//!    - Tracks whether a cached solution exists, for saving
//!
//! # Module Organization
//!
//! - **`domain`**: validated limits and step size
//! - **`buffer`**: fallibly reserved solution storage
//! - **`newton`**: bounded Newton–Raphson with dense LU and divergence detection
//! - **`traits`**: `Solver` trait, `StepReport` and the `Integrator` owner
//! - **`methods`**: the two Euler steppers
//!
//! # Quick Start Example
//!
//! ```rust
//! use num_dual::DualNum;
//! use orange_drum::rhs::DifferentiableRhs;
//! use orange_drum::solver::{EulerExplicit, EulerImplicit};
//!
//! // y'' = t + y' - 3y, y(0) = 1, y'(0) = -2
//! struct Damped;
//!
//! impl DifferentiableRhs for Damped {
//!     fn eval<D: DualNum<f64> + Copy>(&self, t: D, y: &[D]) -> D {
//!         t + y[1] - y[0] * 3.0
//!     }
//! }
//!
//! let mut explicit = EulerExplicit::with_limits(0.0, 4.0)?;
//! explicit.set_step(4.0 / 128.0)?;
//! let forward = explicit.solve(&Damped.as_plain(), &[1.0, -2.0])?;
//!
//! let mut implicit = EulerImplicit::with_limits(0.0, 4.0)?;
//! implicit.set_step(4.0 / 128.0)?;
//! let backward = implicit.solve(&Damped, &[1.0, -2.0])?;
//!
//! assert_eq!(forward.len(), 129);
//! assert_eq!(backward.len(), 129);
//! # Ok::<(), orange_drum::SolverError>(())
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────┐   set_limits / set_step / configure
//! │  Integrator  │ ─────────────────────────────────────┐
//! │ (unsolved)   │ ◄────────────────────────────────────┘
//! └──────┬───────┘
//!        │ solve(rhs, y0)
//! ┌──────▼───────┐   save_solution → one value per line
//! │  Integrator  │ ─────────────────────────────────────►
//! │ (solved)     │
//! └──────┬───────┘
//!        │ any reconfiguration
//!        └──────────► back to unsolved
//! ```
//!
//! # Error Handling
//!
//! Configuration and I/O problems are [`SolverError`](crate::SolverError)s.
//! A Newton divergence during an implicit solve is NOT an error: the samples
//! from the failed step onward are `NaN` and
//! [`Integrator::last_report`] explains what happened.
//!
//! # Concurrency
//!
//! Integrators hold no shared state. Distinct instances may run on distinct
//! threads; a single instance needs external synchronization.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod buffer;
mod domain;
mod methods;
pub mod newton;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use buffer::SolutionBuffer;
pub use domain::{DEFAULT_DIVISIONS, DEFAULT_HIGH, DEFAULT_LOW, Domain};
pub use methods::{ExplicitEuler, ImplicitEuler};
pub use newton::{Divergence, NewtonOptions, NewtonSolver, NewtonStep};
pub use traits::{
    DEFAULT_SOLUTION_FILE, DivergenceReport, Integrator, Method, Solver, StepReport,
};

/// Integrator using [`ExplicitEuler`]
pub type EulerExplicit = Integrator<ExplicitEuler>;

/// Integrator using [`ImplicitEuler`]
pub type EulerImplicit = Integrator<ImplicitEuler>;

impl EulerImplicit {
    /// Replace the Newton options of the stepper
    pub fn set_newton_options(&mut self, options: NewtonOptions) -> crate::SolverResult<()> {
        self.solver_mut().set_options(options)
    }

    /// Change the Newton convergence threshold
    pub fn set_threshold(&mut self, threshold: f64) -> crate::SolverResult<()> {
        self.solver_mut().set_threshold(threshold)
    }
}

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{SolverError, SolverResult};

/// Validate an initial state before integrating
///
/// The state must hold at least one component and contain no `NaN` or
/// infinite value.
pub(crate) fn validate_initial_state(y0: &[f64]) -> SolverResult<()> {
    if y0.is_empty() {
        return Err(SolverError::invalid(
            "initial state must hold at least one value",
        ));
    }

    if let Some(index) = y0.iter().position(|v| v.is_nan()) {
        return Err(SolverError::invalid(format!(
            "NaN detected in initial state component {}",
            index
        )));
    }

    if let Some(index) = y0.iter().position(|v| v.is_infinite()) {
        return Err(SolverError::invalid(format!(
            "Infinity detected in initial state component {}",
            index
        )));
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
