//! Concrete planning environments
//!
//! Implementations of [`Environment`](crate::common::Environment) that bind
//! the search core to a map representation and a vehicle model.

pub mod map_env;

pub use map_env::{MapEnv, MapEnvConfig};
