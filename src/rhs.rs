//! Right-hand-side contract
//!
//! An order-`n` ODE is supplied in explicit form, solved for its highest
//! derivative:
//!
//! ```text
//! f⁽ⁿ⁾(t) = rhs(t, [f, f', …, f⁽ⁿ⁻¹⁾])
//! ```
//!
//! Two flavours of the same function exist:
//!
//! - [`Rhs`]: plain `f64` evaluation. Every `Fn(f64, &[f64]) -> f64` closure
//!   implements it, which is all the explicit stepper needs.
//! - [`DifferentiableRhs`]: evaluation generic over dual numbers, so the
//!   implicit stepper can read back `∂rhs/∂y[k]` for its Jacobian.
//!
//! # Example
//!
//! ```rust
//! use num_dual::DualNum;
//! use orange_drum::rhs::{gradient, DifferentiableRhs, Rhs};
//!
//! // y'' = t + y' - 3y
//! struct Damped;
//!
//! impl DifferentiableRhs for Damped {
//!     fn eval<D: DualNum<f64> + Copy>(&self, t: D, y: &[D]) -> D {
//!         t + y[1] - y[0] * 3.0
//!     }
//! }
//!
//! let (value, partials) = gradient(&Damped, 1.0, &[1.0, -2.0]);
//! assert_eq!(value, -4.0);
//! assert_eq!(partials, vec![-3.0, 1.0]);
//!
//! let plain = |t: f64, y: &[f64]| t + y[1] - 3.0 * y[0];
//! assert_eq!(plain.value(1.0, &[1.0, -2.0]), -4.0);
//! ```

use num_dual::{Dual64, DualNum};

// =================================================================================================
// Plain form
// =================================================================================================

/// Highest derivative of the ODE, evaluated on plain floats
pub trait Rhs {
    /// Evaluate `f⁽ⁿ⁾` at time `t` for the state `y = [f, f', …, f⁽ⁿ⁻¹⁾]`
    fn value(&self, t: f64, y: &[f64]) -> f64;
}

impl<F> Rhs for F
where
    F: Fn(f64, &[f64]) -> f64,
{
    fn value(&self, t: f64, y: &[f64]) -> f64 {
        self(t, y)
    }
}

// =================================================================================================
// Differentiable form
// =================================================================================================

/// Highest derivative of the ODE, evaluated generically over dual numbers
///
/// Implementations must build their result only from `t`, `y` and constants
/// so that derivative information flows through every operation. Reading
/// `y[k].re()` and branching on it is fine; rebuilding a value from its real
/// part is not (the partial derivative is silently lost).
pub trait DifferentiableRhs {
    /// Evaluate `f⁽ⁿ⁾` for any scalar type that behaves like a real number
    fn eval<D: DualNum<f64> + Copy>(&self, t: D, y: &[D]) -> D;

    /// Borrow this function as a plain closure for the explicit stepper
    fn as_plain(&self) -> impl Fn(f64, &[f64]) -> f64 + '_
    where
        Self: Sized,
    {
        move |t: f64, y: &[f64]| self.eval(t, y)
    }
}

impl<T: DifferentiableRhs> DifferentiableRhs for &T {
    fn eval<D: DualNum<f64> + Copy>(&self, t: D, y: &[D]) -> D {
        (**self).eval(t, y)
    }
}

// =================================================================================================
// Gradient provider
// =================================================================================================

/// Evaluate `rhs(t, y)` and write `∂rhs/∂y[k]` into `partials[k]`
///
/// Forward-mode automatic differentiation: one pass per state component, each
/// seeding a unit tangent on `y[k]`. All dual numbers live on this call's
/// stack, so no derivative record survives between calls.
///
/// # Panics
///
/// Panics when `partials.len() != y.len()`.
pub fn gradient_into<R: DifferentiableRhs>(rhs: &R, t: f64, y: &[f64], partials: &mut [f64]) -> f64 {
    assert_eq!(
        partials.len(),
        y.len(),
        "gradient buffer has {} slots for a state of {} components",
        partials.len(),
        y.len()
    );

    let time = Dual64::from(t);
    let mut seeded: Vec<Dual64> = y.iter().map(|&v| Dual64::from(v)).collect();

    if seeded.is_empty() {
        return rhs.eval(time, &seeded).re;
    }

    let mut value = 0.0;
    for k in 0..seeded.len() {
        seeded[k].eps = 1.0;
        let output = rhs.eval(time, &seeded);
        seeded[k].eps = 0.0;

        value = output.re;
        partials[k] = output.eps;
    }
    value
}

/// Evaluate `rhs(t, y)` together with its gradient with respect to `y`
pub fn gradient<R: DifferentiableRhs>(rhs: &R, t: f64, y: &[f64]) -> (f64, Vec<f64>) {
    let mut partials = vec![0.0; y.len()];
    let value = gradient_into(rhs, t, y, &mut partials);
    (value, partials)
}

// =================================================================================================
// Tests
// =================================================================================================
