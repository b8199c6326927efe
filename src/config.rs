//! Configuration loader and schema types.
//!
//! Everything tunable on the appliance (directory roots, timing thresholds,
//! volume ceiling, button table, display geometry) lives in `Settings`.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
