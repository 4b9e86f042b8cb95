//! Common utilities for integration tests

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{
    ConstantGrowth, Damped, ExponentialDecay, PoweredRollers, Resonant, StiffRelaxation,
};
pub use test_helpers::{assert_nan_tail, parse_lines, relative_error, uniform_domain};
