//! A set of utility structs and functions used when running the simulation.

#[macro_use]
pub mod number;
pub mod metrics;
