//! Whole-chart assembly across republics and legislatures.

pub(crate) mod assembler;
pub(crate) mod axis;
pub(crate) mod meta;
pub(crate) mod primitives;
pub(crate) mod tooltip;
