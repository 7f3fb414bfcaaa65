#![forbid(unsafe_code)]

//! Dense ordering arithmetic shared by the SQL store and in-memory lists.
//!
//! A scope with `n` records always holds the orders `0..n`. Appends take slot `n`,
//! removals close their gap, and moves shift only the records strictly between the
//! old and the new slot by exactly one.

mod apply;
mod plan;

pub use apply::*;
pub use plan::*;
