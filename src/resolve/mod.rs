//! Party → current resolution.

pub(crate) mod registry;
