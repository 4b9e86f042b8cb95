//! Integration domain and step size
//!
//! A [`Domain`] is the validated triple `(low, high, step)`:
//!
//! ```text
//! low < high,   0 < step ≤ (high - low) / 2
//! step_count = floor((high - low) / step)
//! ```
//!
//! Because `step_count` truncates toward zero, the last grid point may fall
//! short of `high` by up to one step.

use crate::error::{SolverError, SolverResult};
use std::fmt;

/// Default lower limit of the integration domain
pub const DEFAULT_LOW: f64 = 0.0;

/// Default upper limit of the integration domain
pub const DEFAULT_HIGH: f64 = 1.0;

/// Number of steps used to derive the default step from the domain width
pub const DEFAULT_DIVISIONS: f64 = 100.0;

/// Validated integration domain
///
/// # Example
///
/// ```rust
/// use orange_drum::solver::Domain;
///
/// let domain = Domain::new(0.0, 4.0, 4.0 / 128.0)?;
/// assert_eq!(domain.step_count(), 128);
/// assert_eq!(domain.samples(), Some(129));
/// # Ok::<(), orange_drum::SolverError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    low: f64,
    high: f64,
    step: f64,
}

impl Domain {
    /// Create a domain, validating limits and step together
    pub fn new(low: f64, high: f64, step: f64) -> SolverResult<Self> {
        Self::validate_limits(low, high)?;
        Self::validate_step(low, high, step)?;
        Ok(Self { low, high, step })
    }

    /// Create a domain with the default step `(high - low) / 100`
    pub fn with_limits(low: f64, high: f64) -> SolverResult<Self> {
        Self::validate_limits(low, high)?;
        Self::new(low, high, (high - low) / DEFAULT_DIVISIONS)
    }

    /// Copy of this domain with new limits, keeping the current step
    pub fn with_new_limits(&self, low: f64, high: f64) -> SolverResult<Self> {
        Self::new(low, high, self.step)
    }

    /// Copy of this domain with a new step, keeping the current limits
    pub fn with_new_step(&self, step: f64) -> SolverResult<Self> {
        Self::new(self.low, self.high, step)
    }

    fn validate_limits(low: f64, high: f64) -> SolverResult<()> {
        if !low.is_finite() || !high.is_finite() {
            return Err(SolverError::invalid(format!(
                "limits must be finite (got low={}, high={})",
                low, high
            )));
        }
        if high <= low {
            return Err(SolverError::invalid(format!(
                "upper limit must be larger than lower limit (got low={}, high={})",
                low, high
            )));
        }
        Ok(())
    }

    fn validate_step(low: f64, high: f64, step: f64) -> SolverResult<()> {
        // Written as a negated comparison so that NaN is rejected too
        if !(step > 0.0) {
            return Err(SolverError::invalid(format!(
                "step must be larger than 0 (got {})",
                step
            )));
        }
        let half_width = (high - low) / 2.0;
        if step > half_width {
            return Err(SolverError::invalid(format!(
                "step must not exceed half the domain width {} (got {})",
                half_width, step
            )));
        }
        Ok(())
    }

    /// Lower limit
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper limit
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Step size
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Domain width `high - low`
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Number of steps, `floor((high - low) / step)`
    ///
    /// Saturates at `usize::MAX` for absurdly small steps.
    pub fn step_count(&self) -> usize {
        // Float to int casts saturate, and the quotient is positive by construction
        (self.width() / self.step).floor() as usize
    }

    /// Number of samples in a solution, `step_count + 1`
    ///
    /// `None` when the step count cannot be represented.
    pub fn samples(&self) -> Option<usize> {
        self.step_count().checked_add(1)
    }

    /// Time at grid index `i`, computed directly from the index
    pub fn time_at(&self, i: usize) -> f64 {
        self.low + i as f64 * self.step
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
            step: (DEFAULT_HIGH - DEFAULT_LOW) / DEFAULT_DIVISIONS,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] step {} ({} steps)", self.low, self.high, self.step, self.step_count())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
