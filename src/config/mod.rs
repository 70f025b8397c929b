//! Configuration: solver parameters and the config file reader.

pub mod options;
pub use options::{CoarseSolve, GridParams, Mode};
