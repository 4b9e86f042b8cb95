//! Mock right-hand sides for testing
//!
//! Most of these have known analytical solutions, making them
//! ideal for validating numerical solver accuracy.

use num_dual::DualNum;
use orange_drum::rhs::DifferentiableRhs;

// =================================================================================================
// Exponential Decay: y' = -k*y
// =================================================================================================

/// Exponential decay: y' = -k*y
///
/// Analytical solution: y(t) = y₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(decay_rate: f64) -> Self {
        Self { decay_rate }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl DifferentiableRhs for ExponentialDecay {
    fn eval<D: DualNum<f64> + Copy>(&self, _t: D, y: &[D]) -> D {
        y[0] * -self.decay_rate
    }
}

// =================================================================================================
// Constant Growth: y' = c
// =================================================================================================

/// Constant growth: y' = c
///
/// Analytical solution: y(t) = y₀ + c*t. Both Euler variants are exact.
pub struct ConstantGrowth {
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(growth_rate: f64) -> Self {
        Self { growth_rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 + self.growth_rate * t
    }
}

impl DifferentiableRhs for ConstantGrowth {
    fn eval<D: DualNum<f64> + Copy>(&self, t: D, _y: &[D]) -> D {
        // Built from t so the result carries the dual type
        t * 0.0 + self.growth_rate
    }
}

// =================================================================================================
// Damped second-order: y'' = t + y' - 3y
// =================================================================================================

/// y'' - y' + 3y = t, solved for y''
///
/// Reference problem on `[0, 4]` with `dt = 4/128`, `y(0) = 1`, `y'(0) = -2`.
pub struct Damped;

impl Damped {
    pub const INITIAL: [f64; 2] = [1.0, -2.0];

    pub fn plain(t: f64, y: &[f64]) -> f64 {
        t + y[1] - 3.0 * y[0]
    }
}

impl DifferentiableRhs for Damped {
    fn eval<D: DualNum<f64> + Copy>(&self, t: D, y: &[D]) -> D {
        t + y[1] - y[0] * 3.0
    }
}

// =================================================================================================
// Stiff relaxation: y' = -λ(y - cos t)
// =================================================================================================

/// Fast relaxation toward `cos t`
///
/// Forward Euler is unstable for `λ * dt > 2`; backward Euler is not.
pub struct StiffRelaxation {
    pub stiffness: f64,
}

impl DifferentiableRhs for StiffRelaxation {
    fn eval<D: DualNum<f64> + Copy>(&self, t: D, y: &[D]) -> D {
        (y[0] - t.cos()) * -self.stiffness
    }
}

// =================================================================================================
// Resonant: y' = y / dt
// =================================================================================================

/// Makes the backward Euler Jacobian `dt * rate - 1` vanish when `rate = 1 / dt`
pub struct Resonant {
    pub rate: f64,
}

impl DifferentiableRhs for Resonant {
    fn eval<D: DualNum<f64> + Copy>(&self, _t: D, y: &[D]) -> D {
        y[0] * self.rate
    }
}

// =================================================================================================
// Powered rollers: y''' = Σ forces of rollers under the package
// =================================================================================================

/// Package moving over rollers with random forces, third order
///
/// The acceleration sums the forces of every roller within `package_length`
/// of the package position. Expensive on purpose: one pass over all rollers
/// per evaluation.
pub struct PoweredRollers {
    pub locations: Vec<f64>,
    pub forces: Vec<f64>,
    pub package_length: f64,
}

impl PoweredRollers {
    pub const INITIAL: [f64; 3] = [0.0, 10.0, -1.0];

    /// Deterministic roller layout from a linear congruential generator
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut state = seed;
        let mut next_unit = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        };

        let forces = (0..count).map(|_| -5.0 + 10.0 * next_unit()).collect();
        let locations = (0..count).map(|_| -1000.0 + 2000.0 * next_unit()).collect();

        Self {
            locations,
            forces,
            package_length: 3.0,
        }
    }

    pub fn acceleration(&self, _t: f64, y: &[f64]) -> f64 {
        self.locations
            .iter()
            .zip(&self.forces)
            .filter(|(location, _)| (*location - y[0]).abs() < self.package_length)
            .map(|(_, force)| force)
            .sum()
    }
}
