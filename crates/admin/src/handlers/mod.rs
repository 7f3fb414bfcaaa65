#![forbid(unsafe_code)]

mod auth;
mod collections;
mod definitions;
mod dispatch;
mod events;
mod render;

pub(crate) use dispatch::{dispatch_handler, is_public_action};
