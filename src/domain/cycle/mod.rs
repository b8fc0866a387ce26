//! Cycle domain module

mod controller;
mod suppression;

pub use controller::{CycleController, CycleMode};
pub use suppression::SuppressionWindow;
