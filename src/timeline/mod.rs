//! Calendar dates to a continuous year coordinate.

pub(crate) mod index;
