//! Static export of a laid-out chart.

pub(crate) mod svg;
