//! Solver traits and the integrator that owns domain and solution
//!
//! # Design
//!
//! - [`Solver`]: the stepping strategy. Stateless with respect to a run: it
//!   reads a [`Domain`], an RHS and an initial state, and writes samples into
//!   a [`SolutionBuffer`]. Generic over the RHS type so each method states the
//!   RHS form it needs (plain for explicit, differentiable for implicit).
//! - [`Integrator`]: owns one validated domain, one pre-sized buffer and one
//!   solver value. Reconfiguration reallocates the buffer and drops any
//!   cached solution.
//!
//! The same integrator can be reconfigured and solved many times; each
//! `solve` returns an owned copy of the samples, so nothing handed to the
//! caller is invalidated by a later reconfiguration.

use std::io::Write;
use std::path::Path;

use crate::error::{SolverError, SolverResult};
use crate::output::export::{Exporter, LineExporter};
use crate::solver::{self, Divergence, Domain, SolutionBuffer};

/// File written by [`Integrator::save_solution_default`]
pub const DEFAULT_SOLUTION_FILE: &str = "solution.txt";

// =================================================================================================
// Method traits
// =================================================================================================

/// Name of a numerical method, independent of the RHS type
pub trait Method {
    /// Human-readable method name
    fn name(&self) -> &'static str;
}

/// A one-step time integrator for the companion system of an order-`n` ODE
///
/// # Contract
///
/// - `y0` is non-empty; implementations return an empty report otherwise.
/// - `solution` has been cleared and holds `domain.samples()` reserved slots.
/// - On return `solution` holds exactly `domain.samples()` values: the first
///   state component at each grid point, `NaN` after a divergence.
pub trait Solver<R: ?Sized>: Method {
    /// Integrate from `domain.low()` with initial state `y0`
    fn integrate(
        &self,
        domain: &Domain,
        rhs: &R,
        y0: &[f64],
        solution: &mut SolutionBuffer,
    ) -> StepReport;
}

// =================================================================================================
// Step report
// =================================================================================================

/// Where and why an implicit run stopped early
#[derive(Debug, Clone, PartialEq)]
pub struct DivergenceReport {
    /// Index of the step that failed (its sample index is `step + 1`)
    pub step: usize,

    /// Time at the end of the failed step
    pub time: f64,

    /// Newton failure reason
    pub reason: Divergence,
}

/// Summary of one `solve` call
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Name of the method that produced the samples
    pub method: &'static str,

    /// Steps completed successfully
    pub steps: usize,

    /// Time reached by the last completed step
    pub final_time: f64,

    /// Total Newton iterations (0 for explicit methods)
    pub newton_iterations: usize,

    /// Steps whose Newton iteration ran out of budget without converging
    pub unconverged_steps: usize,

    /// Set when the run stopped early
    pub divergence: Option<DivergenceReport>,
}

impl StepReport {
    /// Report for a run that has not taken any step yet
    pub fn new(method: &'static str, start: f64) -> Self {
        Self {
            method,
            steps: 0,
            final_time: start,
            newton_iterations: 0,
            unconverged_steps: 0,
            divergence: None,
        }
    }

    /// Whether every step of the grid was computed
    pub fn is_complete(&self) -> bool {
        self.divergence.is_none()
    }

    /// Index of the first `NaN` sample, if the run diverged
    pub fn diverged_at(&self) -> Option<usize> {
        self.divergence.as_ref().map(|d| d.step + 1)
    }
}

// =================================================================================================
// Integrator
// =================================================================================================

/// Owner of a domain, a solution buffer and a stepping method
///
/// # Example
///
/// ```rust
/// use orange_drum::solver::EulerExplicit;
///
/// let mut solver = EulerExplicit::with_limits(0.0, 4.0)?;
/// solver.set_step(4.0 / 128.0)?;
///
/// // y'' = t + y' - 3y, y(0) = 1, y'(0) = -2
/// let rhs = |t: f64, y: &[f64]| t + y[1] - 3.0 * y[0];
/// let result = solver.solve(&rhs, &[1.0, -2.0])?;
///
/// assert_eq!(result.len(), 129);
/// assert!(solver.check_solution_cache());
/// # Ok::<(), orange_drum::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Integrator<S> {
    domain: Domain,
    solution: SolutionBuffer,
    solver: S,
    report: Option<StepReport>,
}

impl<S: Default> Integrator<S> {
    /// Default domain `[0, 1]` with step `0.01`
    pub fn new() -> Self {
        let domain = Domain::default();
        Self {
            domain,
            solution: SolutionBuffer::preallocated(domain.step_count() + 1),
            solver: S::default(),
            report: None,
        }
    }

    /// Domain `[low, high]` with step `(high - low) / 100`
    pub fn with_limits(low: f64, high: f64) -> SolverResult<Self> {
        Self::with_domain(Domain::with_limits(low, high)?)
    }

    /// Fully specified domain
    pub fn with_domain(domain: Domain) -> SolverResult<Self> {
        Self::with_solver(S::default(), domain)
    }
}

impl<S: Default> Default for Integrator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Integrator<S> {
    /// Integrator using a configured solver value
    pub fn with_solver(solver: S, domain: Domain) -> SolverResult<Self> {
        Ok(Self {
            domain,
            solution: SolutionBuffer::for_domain(&domain)?,
            solver,
            report: None,
        })
    }

    // ====================================== Configuration ======================================

    /// Set the domain limits, keeping the current step
    ///
    /// Fails with `InvalidArgument` unless `high > low` and the current step
    /// still fits in half of the new domain. Nothing changes on failure.
    pub fn set_limits(&mut self, low: f64, high: f64) -> SolverResult<()> {
        let domain = self.domain.with_new_limits(low, high)?;
        self.apply(domain)
    }

    /// Set the step size, keeping the current limits
    ///
    /// Fails with `InvalidArgument` unless `0 < step ≤ (high - low) / 2`.
    pub fn set_step(&mut self, step: f64) -> SolverResult<()> {
        let domain = self.domain.with_new_step(step)?;
        self.apply(domain)
    }

    /// Set limits and step at once
    pub fn configure(&mut self, low: f64, high: f64, step: f64) -> SolverResult<()> {
        self.apply(Domain::new(low, high, step)?)
    }

    fn apply(&mut self, domain: Domain) -> SolverResult<()> {
        self.solution.reallocate(&domain)?;
        self.domain = domain;
        self.report = None;
        log::debug!("Integrator reconfigured: {}", domain);
        Ok(())
    }

    /// Current domain
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Stepping method
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Mutable stepping method; the cached solution stays valid
    pub fn solver_mut(&mut self) -> &mut S {
        &mut self.solver
    }

    // ========================================= Solving =========================================

    /// Integrate `rhs` from the initial state `y0` over the current domain
    ///
    /// Returns `step_count + 1` samples of the first state component. A
    /// divergence of an implicit method is not an error: the samples from the
    /// failed step onward are `NaN` and [`last_report`](Self::last_report)
    /// records where it happened.
    ///
    /// Fails with `InvalidArgument` when `y0` is empty or not finite.
    pub fn solve<R: ?Sized>(&mut self, rhs: &R, y0: &[f64]) -> SolverResult<Vec<f64>>
    where
        S: Solver<R>,
    {
        solver::validate_initial_state(y0)?;

        self.solution.clear();
        let report = self.solver.integrate(&self.domain, rhs, y0, &mut self.solution);
        self.solution.mark_solved();

        log::debug!(
            "{} finished {} of {} steps on {} ({} Newton iterations)",
            report.method,
            report.steps,
            self.domain.step_count(),
            self.domain,
            report.newton_iterations
        );

        self.report = Some(report);
        Ok(self.solution.as_slice().to_vec())
    }

    /// Whether a solve has produced output since the last reconfiguration
    pub fn check_solution_cache(&self) -> bool {
        self.solution.is_solved()
    }

    /// Cached samples of the last solve
    pub fn solution(&self) -> Option<&[f64]> {
        self.check_solution_cache().then(|| self.solution.as_slice())
    }

    /// Summary of the last solve
    pub fn last_report(&self) -> Option<&StepReport> {
        self.report.as_ref()
    }

    // ======================================= Persistence =======================================

    /// Write the cached solution to `sink`, one value per line
    pub fn save_solution<W: Write>(&self, sink: W) -> SolverResult<()> {
        let values = self.solution().ok_or(SolverError::NoCachedSolution)?;
        LineExporter::default().export(values, sink)?;
        Ok(())
    }

    /// Create (or truncate) `path` and write the cached solution to it
    pub fn save_solution_to_file<P: AsRef<Path>>(&self, path: P) -> SolverResult<()> {
        // Checked before touching the file system
        let values = self.solution().ok_or(SolverError::NoCachedSolution)?;
        LineExporter::default().export_to_file(values, path.as_ref())?;
        log::debug!("Solution saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Write the cached solution to [`DEFAULT_SOLUTION_FILE`]
    pub fn save_solution_default(&self) -> SolverResult<()> {
        self.save_solution_to_file(DEFAULT_SOLUTION_FILE)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{EulerExplicit, ExplicitEuler};

    fn unit_growth(_t: f64, _y: &[f64]) -> f64 {
        1.0
    }

    #[test]
    fn test_default_integrator() {
        let mut solver = EulerExplicit::new();
        assert_eq!(solver.domain(), &Domain::default());
        assert!(!solver.check_solution_cache());
        assert!(solver.solution().is_none());

        let result = solver.solve(&unit_growth, &[1.0]).unwrap();
        assert_eq!(result.len(), 101);
    }

    #[test]
    fn test_custom_limits_default_step() {
        let mut solver = EulerExplicit::with_limits(0.0, 4.0).unwrap();
        let result = solver.solve(&unit_growth, &[1.0]).unwrap();
        assert_eq!(result.len(), 101);
    }

    #[test]
    fn test_set_limits_keeps_step() {
        let mut solver = EulerExplicit::new();
        solver.set_limits(-2.0, 0.0).unwrap();
        let result = solver.solve(&unit_growth, &[1.0]).unwrap();
        assert_eq!(result.len(), 201);
    }

    #[test]
    fn test_set_step() {
        let mut solver = EulerExplicit::new();
        solver.set_step(0.05).unwrap();
        let result = solver.solve(&unit_growth, &[1.0]).unwrap();
        assert_eq!(result.len(), 21);
    }

    #[test]
    fn test_rejected_limits_keep_previous_state() {
        let mut solver = EulerExplicit::new();
        solver.solve(&unit_growth, &[0.0]).unwrap();

        assert!(matches!(
            solver.set_limits(1.0, 0.0),
            Err(SolverError::InvalidArgument(_))
        ));
        assert_eq!(solver.domain(), &Domain::default());
        assert!(solver.check_solution_cache());
    }

    #[test]
    fn test_reconfiguration_drops_cached_solution() {
        let mut solver = EulerExplicit::new();
        solver.solve(&unit_growth, &[0.0]).unwrap();
        assert!(solver.last_report().is_some());

        solver.set_step(0.1).unwrap();
        assert!(!solver.check_solution_cache());
        assert!(solver.last_report().is_none());
        assert!(matches!(
            solver.save_solution(Vec::new()),
            Err(SolverError::NoCachedSolution)
        ));
    }

    #[test]
    fn test_configure_is_atomic() {
        let mut solver = EulerExplicit::new();
        assert!(solver.configure(0.0, 10.0, 6.0).is_err());
        assert_eq!(solver.domain(), &Domain::default());

        solver.configure(0.0, 10.0, 0.5).unwrap();
        assert_eq!(solver.domain().step_count(), 20);
    }

    #[test]
    fn test_empty_initial_state_rejected() {
        let mut solver = EulerExplicit::new();
        assert!(matches!(
            solver.solve(&unit_growth, &[]),
            Err(SolverError::InvalidArgument(_))
        ));
        assert!(!solver.check_solution_cache());
    }

    #[test]
    fn test_non_finite_initial_state_rejected() {
        let mut solver = EulerExplicit::new();
        let result = solver.solve(&unit_growth, &[0.0, f64::NAN]);
        match result {
            Err(SolverError::InvalidArgument(message)) => assert!(message.contains("component 1")),
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_save_before_solve_fails() {
        let solver = EulerExplicit::new();
        assert!(matches!(
            solver.save_solution(Vec::new()),
            Err(SolverError::NoCachedSolution)
        ));
    }

    #[test]
    fn test_save_writes_one_line_per_sample() {
        let mut solver = EulerExplicit::new();
        solver.set_step(0.25).unwrap();
        solver.solve(&unit_growth, &[0.0]).unwrap();

        let mut sink = Vec::new();
        solver.save_solution(&mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert_eq!(text, "0\n0.25\n0.5\n0.75\n1\n");
    }

    #[test]
    fn test_save_to_file_truncates_previous_content() {
        let mut solver = EulerExplicit::new();
        solver.set_step(0.25).unwrap();
        solver.solve(&unit_growth, &[0.0]).unwrap();

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "stale\nstale\nstale\nstale\nstale\nstale\nstale\n").unwrap();

        solver.save_solution_to_file(file.path()).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "0\n0.25\n0.5\n0.75\n1\n");
    }

    #[test]
    fn test_save_to_file_without_solution_leaves_path_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.txt");

        let solver = EulerExplicit::new();
        assert!(matches!(
            solver.save_solution_to_file(&path),
            Err(SolverError::NoCachedSolution)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_allocation_failure_keeps_configuration() {
        let mut solver = EulerExplicit::with_limits(0.0, 4.0).unwrap();
        solver.solve(&unit_growth, &[0.0]).unwrap();
        let domain = *solver.domain();

        // 2^62 samples cannot be reserved
        assert!(matches!(
            solver.set_step(4.0 / (1u64 << 62) as f64),
            Err(SolverError::AllocationFailure { .. })
        ));
        assert_eq!(solver.domain(), &domain);
        assert!(solver.check_solution_cache());
        assert_eq!(solver.solution().map(<[f64]>::len), Some(101));
    }

    #[test]
    fn test_with_solver_uses_given_method() {
        let solver = Integrator::with_solver(ExplicitEuler, Domain::default()).unwrap();
        assert_eq!(solver.solver().name(), "Forward Euler");
    }

    #[test]
    fn test_report_diverged_at() {
        let mut report = StepReport::new("Backward Euler", 0.0);
        assert!(report.is_complete());
        assert_eq!(report.diverged_at(), None);

        report.divergence = Some(DivergenceReport {
            step: 2,
            time: 0.75,
            reason: Divergence::SingularJacobian,
        });
        assert!(!report.is_complete());
        assert_eq!(report.diverged_at(), Some(3));
    }
}
