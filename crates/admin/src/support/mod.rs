#![forbid(unsafe_code)]

mod args;
mod envelope;
mod time;

pub(crate) use args::*;
pub(crate) use envelope::*;
pub(crate) use time::*;
