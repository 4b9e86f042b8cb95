//! Numerical methods for integrating order-n ODEs
//!
//! This module contains concrete implementations of the
//! [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`ExplicitEuler`]**: Forward Euler
//!   - Order: first-order O(dt)
//!   - Cost: 1 RHS evaluation per step
//!   - RHS: any `Fn(f64, &[f64]) -> f64`
//!
//! - **[`ImplicitEuler`]**: Backward Euler
//!   - Order: first-order O(dt)
//!   - Cost: one Newton solve per step, each iteration `n` RHS evaluations
//!     on dual numbers plus an `n × n` LU decomposition
//!   - RHS: a [`DifferentiableRhs`](crate::rhs::DifferentiableRhs)
//!   - Stays stable on stiff problems where forward Euler blows up
//!
//! Both steppers are stateless between runs and can be shared across
//! integrators.

mod explicit;
mod implicit;

// Re-exports for convenience
pub use explicit::ExplicitEuler;
pub use implicit::ImplicitEuler;
