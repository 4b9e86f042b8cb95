//! orange-drum: embeddable ODE integration
//!
//! Integrates an ordinary differential equation of arbitrary order `n`,
//! given in explicit form for its highest derivative, over a bounded domain
//! with a uniform step. Two first-order schemes are available:
//!
//! - **Explicit Euler**: plain `Fn(f64, &[f64]) -> f64` right-hand sides
//! - **Implicit Euler**: differentiable right-hand sides; each step runs a
//!   bounded Newton–Raphson iteration whose Jacobian comes from forward-mode
//!   automatic differentiation, with divergence detection
//!
//! # Architecture
//!
//! 1. **Right-hand side** ([`rhs`]) - WHAT to integrate
//!    - `Rhs` for plain evaluation, `DifferentiableRhs` for dual numbers
//!
//! 2. **Solver** ([`solver`]) - HOW to integrate
//!    - Validated domain, pre-sized solution buffer, Euler steppers, Newton
//!
//! 3. **Output** ([`output`]) - persistence of the last solution
//!
//! # Quick Start
//!
//! ```rust
//! use orange_drum::prelude::*;
//!
//! # fn main() -> Result<(), SolverError> {
//! // y'' = t + y' - 3y on [0, 4], y(0) = 1, y'(0) = -2
//! let mut solver = EulerExplicit::with_limits(0.0, 4.0)?;
//! solver.set_step(4.0 / 128.0)?;
//!
//! let rhs = |t: f64, y: &[f64]| t + y[1] - 3.0 * y[0];
//! let result = solver.solve(&rhs, &[1.0, -2.0])?;
//!
//! assert_eq!(result.len(), 129);
//! assert_eq!(result[0], 1.0);
//!
//! let mut text = Vec::new();
//! solver.save_solution(&mut text)?;
//! assert_eq!(text.iter().filter(|&&b| b == b'\n').count(), 129);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`rhs`]: right-hand-side traits and the gradient provider
//! - [`solver`]: domain, integrators and Newton iteration
//! - [`output`]: solution export
//! - [`error`]: error type shared by the crate

pub mod error;
pub mod output;
pub mod rhs;
pub mod solver;

pub use error::{SolverError, SolverResult};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use orange_drum::prelude::*;
    //! ```
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::rhs::{DifferentiableRhs, Rhs};
    pub use crate::solver::{
        Divergence, Domain, EulerExplicit, EulerImplicit, ExplicitEuler, ImplicitEuler,
        Integrator, Method, NewtonOptions, Solver, StepReport,
    };
}
