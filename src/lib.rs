#[macro_use]
extern crate tracing;

pub mod animation;
pub mod axis;
pub mod cli;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod simulate;
