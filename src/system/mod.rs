//! A module containing the pieces that sit around the core models: deriving
//! the run's economics from a price sheet, and driving the day loop.

pub mod pricing;
pub mod simulator;
