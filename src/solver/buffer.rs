//! Pre-sized storage for one sampled solution
//!
//! The buffer holds `step_count + 1` samples of the first state component,
//! index 0 being the initial value. Its capacity is reserved whenever the
//! domain changes; a solve only writes into the reserved slots.

use crate::error::{SolverError, SolverResult};
use crate::solver::Domain;

/// Solution samples plus the "has a finished solution" flag
#[derive(Debug, Clone, Default)]
pub struct SolutionBuffer {
    values: Vec<f64>,
    samples: usize,
    solved: bool,
}

impl SolutionBuffer {
    /// Reserve a buffer for the grid of `domain`
    pub fn for_domain(domain: &Domain) -> SolverResult<Self> {
        let mut buffer = Self::default();
        buffer.reallocate(domain)?;
        Ok(buffer)
    }

    /// Buffer for a grid known to be small (the default domain)
    pub(crate) fn preallocated(samples: usize) -> Self {
        Self {
            values: Vec::with_capacity(samples),
            samples,
            solved: false,
        }
    }

    /// Re-reserve for a new grid and forget any cached solution
    ///
    /// On failure the buffer is left exactly as it was.
    pub fn reallocate(&mut self, domain: &Domain) -> SolverResult<()> {
        let samples = domain.samples().ok_or(SolverError::AllocationFailure {
            capacity: usize::MAX,
            source: None,
        })?;

        let mut values = Vec::new();
        values
            .try_reserve_exact(samples)
            .map_err(|source| SolverError::AllocationFailure {
                capacity: samples,
                source: Some(source),
            })?;

        self.values = values;
        self.samples = samples;
        self.solved = false;
        Ok(())
    }

    /// Number of samples a finished solution holds
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Reserved capacity
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Discard previous samples before a new solve
    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.solved = false;
    }

    /// Append the next sample
    pub(crate) fn push(&mut self, value: f64) {
        debug_assert!(
            self.values.len() < self.samples,
            "solution buffer overflow: {} samples reserved",
            self.samples
        );
        self.values.push(value);
    }

    /// Fill every remaining slot with `NaN`
    pub(crate) fn fill_remaining_nan(&mut self) {
        let missing = self.samples.saturating_sub(self.values.len());
        self.values.extend(std::iter::repeat_n(f64::NAN, missing));
    }

    /// Flag the buffer as holding a finished solution
    pub(crate) fn mark_solved(&mut self) {
        self.solved = true;
    }

    /// Whether a solve has produced output since the last reconfiguration
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Samples written so far
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples written so far
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// No sample written yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
