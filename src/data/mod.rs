//! Serde boundary for the republics, currents and events JSON files.

pub(crate) mod load;
pub(crate) mod model;
