//! Per-legislature layout: visibility, proportional spans, coalitions and transitions.

pub(crate) mod coalition;
pub(crate) mod proportional;
pub(crate) mod transition;
pub(crate) mod visibility;
