//! Example: second-order ODE with both Euler methods
//!
//! Solves
//!
//! ```text
//! y'' - y' + 3y = t,   y(0) = 1,   y'(0) = -2
//! ```
//!
//! on `[0, 4]` with `dt = 4/128`, first with forward Euler, then with
//! backward Euler, and saves the backward Euler solution to
//! `solution.txt`.

use num_dual::DualNum;
use orange_drum::prelude::*;
use std::time::Instant;

/// y'' = t + y' - 3y
struct Damped;

impl DifferentiableRhs for Damped {
    fn eval<D: DualNum<f64> + Copy>(&self, t: D, y: &[D]) -> D {
        t + y[1] - y[0] * 3.0
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  y'' - y' + 3y = t on [0, 4]");
    println!("═══════════════════════════════════════════════════════\n");

    let y0 = [1.0, -2.0];

    // ====== Forward Euler ======

    let mut explicit = EulerExplicit::with_limits(0.0, 4.0)?;
    explicit.set_step(4.0 / 128.0)?;

    let start = Instant::now();
    let forward = explicit.solve(&Damped.as_plain(), &y0)?;
    println!(
        "Forward Euler : {} samples, y(4) ≈ {:.6} ({:?})",
        forward.len(),
        forward[forward.len() - 1],
        start.elapsed()
    );

    // ====== Backward Euler ======

    let mut implicit = EulerImplicit::with_limits(0.0, 4.0)?;
    implicit.set_step(4.0 / 128.0)?;

    let start = Instant::now();
    let backward = implicit.solve(&Damped, &y0)?;
    println!(
        "Backward Euler: {} samples, y(4) ≈ {:.6} ({:?})",
        backward.len(),
        backward[backward.len() - 1],
        start.elapsed()
    );

    if let Some(report) = implicit.last_report() {
        println!(
            "  {} Newton iterations, {} unconverged steps",
            report.newton_iterations, report.unconverged_steps
        );
    }

    // ====== Persistence ======

    implicit.save_solution_default()?;
    println!("\nBackward Euler solution written to solution.txt");

    Ok(())
}
