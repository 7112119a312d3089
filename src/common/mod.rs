//! Common types, traits, and error definitions for motion_primitive_planner
//!
//! This module provides the foundational building blocks shared by the
//! graph-search core and the concrete planning environments.

pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
