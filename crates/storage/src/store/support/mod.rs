#![forbid(unsafe_code)]

mod counters;
mod events;
mod rows;
mod schema;
mod scope;
mod shift;

pub(super) use counters::*;
pub(super) use events::*;
pub(super) use rows::*;
pub(super) use schema::{install_schema, preflight_gate};
pub(super) use scope::*;
pub(super) use shift::*;
